//! The `regrade reconcile` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use regrade_core::reconcile::reconcile;
use regrade_core::report::ReconciliationReport;
use regrade_core::store::{load_attempt, load_question_bank, load_question_directory};

pub fn execute(
    attempt_path: PathBuf,
    questions: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut attempt = load_attempt(&attempt_path)?;

    if let Some(bank_path) = questions {
        attempt.questions = if bank_path.is_dir() {
            load_question_directory(&bank_path)?
        } else {
            load_question_bank(&bank_path)?
        };
    }

    let report = ReconciliationReport::new(attempt.id.clone(), reconcile(&attempt));

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            let r = &report.reconciliation;
            println!("Attempt {}", report.attempt_id);
            println!(
                "Original: {} correct, {:.1}%, {}",
                r.original.correct_count,
                r.original.percentage,
                pass_label(r.original.is_passed)
            );
            println!(
                "Current:  {} correct, {:.1}%, {} ({:+.1}%)",
                r.current.correct_count,
                r.current.percentage,
                pass_label(r.current.is_passed),
                report.score_delta()
            );

            if !r.questions.is_empty() {
                let mut table = Table::new();
                table.set_header(vec![
                    "Question", "Answer", "", "Amended", "Points", "Accepted", "Note",
                ]);
                for row in &r.questions {
                    table.add_row(vec![
                        row.question_id.clone(),
                        row.original_answer.clone(),
                        mark(row.original_correct).to_string(),
                        row.amended_answer.clone().unwrap_or_else(|| "-".into()),
                        format!("{:.1}/{:.1}", row.earned_points, row.possible_points),
                        row.correct_answer.clone(),
                        row.note.clone().unwrap_or_default(),
                    ]);
                }
                println!("{table}");
            }
        }
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "passed"
    } else {
        "failed"
    }
}

fn mark(correct: bool) -> &'static str {
    if correct {
        "correct"
    } else {
        "incorrect"
    }
}
