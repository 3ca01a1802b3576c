//! The `regrade validate` command.

use std::path::PathBuf;

use anyhow::Result;

use regrade_core::store::{load_question_bank, load_question_directory, validate_question_bank};

pub fn execute(questions: PathBuf) -> Result<()> {
    let bank = if questions.is_dir() {
        load_question_directory(&questions)?
    } else {
        load_question_bank(&questions)?
    };

    println!("{} questions", bank.len());

    let warnings = validate_question_bank(&bank);
    if warnings.is_empty() {
        println!("All questions valid");
    } else {
        for warning in &warnings {
            println!(
                "  [{}] {}",
                warning.question_id.as_deref().unwrap_or("-"),
                warning.message
            );
        }
        println!("{} warning(s)", warnings.len());
    }

    Ok(())
}
