//! JSON document loading and question-bank validation.
//!
//! The document store itself is an external collaborator; this module
//! only materializes already-exported JSON documents for the CLI and
//! tests, and sanity-checks question banks the way graders expect.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::StoreError;
use crate::model::{Attempt, Question, QuestionKind};

/// Load one attempt document from a JSON file.
pub fn load_attempt(path: &Path) -> Result<Attempt, StoreError> {
    let content = read(path)?;
    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a question bank from a JSON file.
///
/// Accepts either of the two stored shapes: a map of question id to
/// question document, or an array of question documents each carrying its
/// own `id`. In map form the key wins over any embedded `id`.
pub fn load_question_bank(path: &Path) -> Result<BTreeMap<String, Question>, StoreError> {
    let content = read(path)?;
    let raw: Value = serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let malformed = |source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    };

    match raw {
        Value::Object(map) => {
            let mut bank = BTreeMap::new();
            for (id, value) in map {
                let mut question: Question =
                    serde_json::from_value(value).map_err(malformed)?;
                question.id = id.clone();
                bank.insert(id, question);
            }
            Ok(bank)
        }
        Value::Array(items) => {
            let mut bank = BTreeMap::new();
            for item in items {
                let question: Question = serde_json::from_value(item).map_err(malformed)?;
                if question.id.is_empty() {
                    tracing::warn!("skipping question without id in {}", path.display());
                    continue;
                }
                if let Some(previous) = bank.insert(question.id.clone(), question) {
                    tracing::warn!(
                        "duplicate question id {} in {}; keeping the later entry",
                        previous.id,
                        path.display()
                    );
                }
            }
            Ok(bank)
        }
        _ => Err(StoreError::UnexpectedShape(path.to_path_buf())),
    }
}

/// Recursively load every `.json` question bank under a directory into one
/// merged bank. Files that fail to parse are skipped with a warning.
pub fn load_question_directory(dir: &Path) -> Result<BTreeMap<String, Question>, StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::NotADirectory(dir.to_path_buf()));
    }

    let mut bank = BTreeMap::new();
    let entries = std::fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            bank.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match load_question_bank(&path) {
                Ok(questions) => bank.extend(questions),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(bank)
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id, when the warning concerns one question.
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common authoring issues.
///
/// Warnings never block grading; every flagged shape still evaluates with
/// its documented fallback.
pub fn validate_question_bank(bank: &BTreeMap<String, Question>) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |id: &str, message: String| {
        warnings.push(ValidationWarning {
            question_id: Some(id.to_string()),
            message,
        });
    };

    for (id, question) in bank {
        match &question.kind {
            QuestionKind::MultipleChoice { options } => {
                let flagged = options.iter().filter(|o| o.is_correct).count();
                if flagged == 0 {
                    warn(id, "no option is marked correct; every answer will fail".into());
                } else if flagged > 1 {
                    warn(
                        id,
                        format!("{flagged} options are marked correct; only the first is used"),
                    );
                }
            }
            QuestionKind::FillBlank { blanks } => {
                if blanks.is_empty() {
                    warn(id, "fill-blank question has no blanks".into());
                }
            }
            QuestionKind::SpecificAnswer { acceptable_answers } => {
                if acceptable_answers.is_empty() {
                    warn(id, "no acceptable answers; every answer will fail".into());
                }
            }
            QuestionKind::ProofText { .. } => {
                if question.points == 0.0 {
                    warn(
                        id,
                        "proof-text question worth 0 points can never earn credit".into(),
                    );
                }
            }
            QuestionKind::Unknown => {
                warn(id, "unrecognized question type; every answer will fail".into());
            }
            _ => {}
        }

        if question.points < 0.0 {
            warn(id, format!("negative points: {}", question.points));
        }
    }

    warnings
}

fn read(path: &Path) -> Result<String, StoreError> {
    std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}
