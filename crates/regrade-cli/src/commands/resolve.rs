//! The `regrade resolve` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use regrade_core::resolver::{heuristic_score, resolve_authoritative, timestamp_millis};
use regrade_core::store::load_attempt;

pub fn execute(attempt_path: PathBuf) -> Result<()> {
    let attempt = load_attempt(&attempt_path)?;

    if attempt.modifications.is_empty() {
        println!("No modifications recorded for attempt {}", attempt.id);
        return Ok(());
    }

    let authoritative = resolve_authoritative(&attempt.modifications);

    let mut table = Table::new();
    table.set_header(vec!["#", "Score", "Timestamp (ms)", "Grader", "Authoritative"]);
    for (position, modification) in attempt.modifications.iter().enumerate() {
        let is_authoritative = authoritative.is_some_and(|a| std::ptr::eq(a, modification));
        table.add_row(vec![
            position.to_string(),
            heuristic_score(modification).to_string(),
            timestamp_millis(modification).to_string(),
            modification
                .modified_by
                .clone()
                .unwrap_or_else(|| "-".into()),
            if is_authoritative { "*" } else { "" }.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
