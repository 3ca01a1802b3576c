//! Per-type answer evaluation and display formatting.
//!
//! Correctness is a single dispatch over [`QuestionKind`]. Every arm is
//! total: a missing field compares as the empty string, an unknown type is
//! simply never correct, and proof-text questions are never machine-graded.

use serde_json::Value;

use crate::model::{Question, QuestionKind};
use crate::normalize::{normalize, normalize_opt, normalize_str};

/// Marker rendered for an absent answer.
pub const UNANSWERED: &str = "(no answer)";

/// Marker rendered when a question has no stated correct answer.
pub const UNSPECIFIED: &str = "(not specified)";

/// Decide whether a submitted answer is correct for a question.
///
/// Pure function of the normalized inputs for every type except
/// `proof_text` and `Unknown`, which always return `false`.
pub fn is_correct(answer: &Value, question: &Question) -> bool {
    match &question.kind {
        QuestionKind::MultipleChoice { options } => {
            // First flagged option wins if several are marked correct;
            // none marked correct means no answer can be right.
            match options.iter().find(|o| o.is_correct) {
                Some(option) => normalize_str(&option.text) == normalize(answer),
                None => false,
            }
        }
        QuestionKind::FillBlank { blanks } => match answer {
            Value::Array(given) => {
                // Positional match, no partial credit: a length mismatch
                // fails outright.
                given.len() == blanks.len()
                    && given
                        .iter()
                        .zip(blanks)
                        .all(|(g, b)| normalize(g) == normalize_str(&b.correct_answer))
            }
            // Scalar answers are compared to the first blank only.
            scalar => blanks
                .first()
                .is_some_and(|b| normalize(scalar) == normalize_str(&b.correct_answer)),
        },
        QuestionKind::BookReference { correct_book } => {
            normalize_opt(correct_book.as_deref()) == normalize(answer)
        }
        QuestionKind::NarratorReference { correct_narrator } => {
            normalize_opt(correct_narrator.as_deref()) == normalize(answer)
        }
        QuestionKind::HadithAttribution {
            correct_attribution,
        } => normalize_opt(correct_attribution.as_deref()) == normalize(answer),
        QuestionKind::SpecificAnswer { acceptable_answers } => {
            let given = normalize(answer);
            acceptable_answers.iter().any(|a| normalize_str(a) == given)
        }
        // Proof-text questions are graded manually via amendments only.
        QuestionKind::ProofText { .. } => false,
        QuestionKind::Unknown => false,
    }
}

/// Render a raw answer for display. Absent or null answers become the
/// fixed [`UNANSWERED`] marker; sequences are comma-joined.
pub fn format_answer(answer: Option<&Value>) -> String {
    match answer {
        None | Some(Value::Null) => UNANSWERED.to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .map(display_scalar)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => display_scalar(other),
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Human-readable statement of the accepted answer(s) for a question.
/// Display only; has no bearing on grading.
pub fn correct_answer_label(question: &Question) -> String {
    match &question.kind {
        QuestionKind::MultipleChoice { options } => options
            .iter()
            .find(|o| o.is_correct)
            .map(|o| o.text.clone())
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        QuestionKind::FillBlank { blanks } => {
            if blanks.is_empty() {
                UNSPECIFIED.to_string()
            } else {
                blanks
                    .iter()
                    .map(|b| b.correct_answer.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        QuestionKind::BookReference { correct_book } => label_or_unspecified(correct_book),
        QuestionKind::NarratorReference { correct_narrator } => {
            label_or_unspecified(correct_narrator)
        }
        QuestionKind::HadithAttribution {
            correct_attribution,
        } => label_or_unspecified(correct_attribution),
        QuestionKind::ProofText { proof_text } => label_or_unspecified(proof_text),
        QuestionKind::SpecificAnswer { acceptable_answers } => {
            if acceptable_answers.is_empty() {
                UNSPECIFIED.to_string()
            } else {
                acceptable_answers.join(" or ")
            }
        }
        QuestionKind::Unknown => UNSPECIFIED.to_string(),
    }
}

fn label_or_unspecified(field: &Option<String>) -> String {
    match field {
        Some(s) if !s.trim().is_empty() => s.clone(),
        _ => UNSPECIFIED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blank, ChoiceOption};
    use serde_json::json;

    fn question(kind: QuestionKind) -> Question {
        Question {
            id: "q".into(),
            prompt: String::new(),
            points: 1.0,
            kind,
        }
    }

    fn multiple_choice(options: &[(&str, bool)]) -> Question {
        question(QuestionKind::MultipleChoice {
            options: options
                .iter()
                .map(|(text, is_correct)| ChoiceOption {
                    text: (*text).into(),
                    is_correct: *is_correct,
                })
                .collect(),
        })
    }

    fn fill_blank(blanks: &[&str]) -> Question {
        question(QuestionKind::FillBlank {
            blanks: blanks
                .iter()
                .map(|b| Blank {
                    correct_answer: (*b).into(),
                })
                .collect(),
        })
    }

    #[test]
    fn multiple_choice_matches_flagged_option() {
        let q = multiple_choice(&[("Option A", false), ("Option B", true)]);
        assert!(is_correct(&json!("option b"), &q));
        assert!(is_correct(&json!("  OPTION   B "), &q));
        assert!(!is_correct(&json!("Option A"), &q));
    }

    #[test]
    fn multiple_choice_no_flagged_option_never_correct() {
        let q = multiple_choice(&[("Option A", false), ("Option B", false)]);
        assert!(!is_correct(&json!("Option A"), &q));
        assert!(!is_correct(&json!("Option B"), &q));
    }

    #[test]
    fn multiple_choice_ambiguous_flags_use_first() {
        let q = multiple_choice(&[("First", true), ("Second", true)]);
        assert!(is_correct(&json!("first"), &q));
        assert!(!is_correct(&json!("second"), &q));
    }

    #[test]
    fn fill_blank_positional_match() {
        let q = fill_blank(&["alpha", "beta"]);
        assert!(is_correct(&json!(["Alpha", " BETA "]), &q));
        assert!(!is_correct(&json!(["beta", "alpha"]), &q));
    }

    #[test]
    fn fill_blank_length_mismatch_always_fails() {
        let q = fill_blank(&["alpha", "beta"]);
        assert!(!is_correct(&json!(["alpha"]), &q));
        assert!(!is_correct(&json!(["alpha", "beta", "gamma"]), &q));
        assert!(!is_correct(&json!([]), &q));
    }

    #[test]
    fn fill_blank_scalar_compares_to_first_blank() {
        let q = fill_blank(&["alpha", "beta"]);
        assert!(is_correct(&json!("ALPHA"), &q));
        assert!(!is_correct(&json!("beta"), &q));
    }

    #[test]
    fn fill_blank_scalar_with_no_blanks_fails() {
        let q = fill_blank(&[]);
        assert!(!is_correct(&json!("anything"), &q));
    }

    #[test]
    fn reference_types_normalized_equality() {
        let q = question(QuestionKind::NarratorReference {
            correct_narrator: Some("Abu Hurairah".into()),
        });
        assert!(is_correct(&json!("abu  hurairah"), &q));
        assert!(!is_correct(&json!("abu bakr"), &q));
    }

    #[test]
    fn specific_answer_any_match_case_insensitive() {
        let q = question(QuestionKind::SpecificAnswer {
            acceptable_answers: vec!["Yes".into(), "Indeed ".into()],
        });
        assert!(is_correct(&json!("INDEED"), &q));
        assert!(is_correct(&json!("yes"), &q));
        assert!(!is_correct(&json!("no"), &q));
    }

    #[test]
    fn proof_text_never_correct() {
        let q = question(QuestionKind::ProofText {
            proof_text: Some("the exact text".into()),
        });
        assert!(!is_correct(&json!("the exact text"), &q));
        assert!(!is_correct(&Value::Null, &q));
    }

    #[test]
    fn unknown_type_never_correct() {
        let q = question(QuestionKind::Unknown);
        assert!(!is_correct(&json!("anything"), &q));
    }

    #[test]
    fn format_answer_absent_is_marker() {
        assert_eq!(format_answer(None), UNANSWERED);
        assert_eq!(format_answer(Some(&Value::Null)), UNANSWERED);
    }

    #[test]
    fn format_answer_sequence_comma_joined() {
        assert_eq!(format_answer(Some(&json!(["a", "b", 3]))), "a, b, 3");
    }

    #[test]
    fn format_answer_scalars_stringified() {
        assert_eq!(format_answer(Some(&json!("text"))), "text");
        assert_eq!(format_answer(Some(&json!(7))), "7");
    }

    #[test]
    fn label_multiple_choice_uses_flagged_text() {
        let q = multiple_choice(&[("Wrong", false), ("Right", true)]);
        assert_eq!(correct_answer_label(&q), "Right");
    }

    #[test]
    fn label_falls_back_to_unspecified() {
        let q = question(QuestionKind::BookReference { correct_book: None });
        assert_eq!(correct_answer_label(&q), UNSPECIFIED);
        assert_eq!(
            correct_answer_label(&question(QuestionKind::Unknown)),
            UNSPECIFIED
        );
    }

    #[test]
    fn label_specific_answer_or_joined() {
        let q = question(QuestionKind::SpecificAnswer {
            acceptable_answers: vec!["yes".into(), "yep".into()],
        });
        assert_eq!(correct_answer_label(&q), "yes or yep");
    }

    #[test]
    fn label_fill_blank_comma_joined() {
        let q = fill_blank(&["one", "two"]);
        assert_eq!(correct_answer_label(&q), "one, two");
    }
}
