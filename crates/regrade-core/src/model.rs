//! Core document model types for regrade.
//!
//! These mirror the quiz documents as they exist in the document store:
//! field names keep their stored camelCase spellings, every field the store
//! may omit has a serde default, and loosely-typed values (raw answers,
//! grading notes, timestamps) stay as `serde_json::Value` so partial or
//! malformed documents still deserialize.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single quiz question with its type-specific correctness data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier. May be empty when the question arrives as a
    /// map value keyed by id; the loader fills it in.
    #[serde(default)]
    pub id: String,
    /// Free-text prompt shown to the student.
    #[serde(default)]
    pub prompt: String,
    /// Points awarded for a correct answer.
    #[serde(default)]
    pub points: f64,
    /// Type tag plus the correctness data that type reads.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The seven question shapes, discriminated by the stored `type` string.
///
/// Only the fields of the active variant are ever read; an unrecognized
/// tag lands on `Unknown`, which always evaluates incorrect instead of
/// erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        #[serde(default)]
        options: Vec<ChoiceOption>,
    },
    FillBlank {
        #[serde(default)]
        blanks: Vec<Blank>,
    },
    BookReference {
        #[serde(default, rename = "correctBook")]
        correct_book: Option<String>,
    },
    NarratorReference {
        #[serde(default, rename = "correctNarrator")]
        correct_narrator: Option<String>,
    },
    HadithAttribution {
        #[serde(default, rename = "correctAttribution")]
        correct_attribution: Option<String>,
    },
    ProofText {
        #[serde(default, rename = "proofText")]
        proof_text: Option<String>,
    },
    SpecificAnswer {
        #[serde(default, rename = "acceptableAnswers")]
        acceptable_answers: Vec<String>,
    },
    #[serde(other)]
    Unknown,
}

impl QuestionKind {
    /// The stored tag for this kind, as written in documents.
    pub fn tag(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::FillBlank { .. } => "fill_blank",
            QuestionKind::BookReference { .. } => "book_reference",
            QuestionKind::NarratorReference { .. } => "narrator_reference",
            QuestionKind::HadithAttribution { .. } => "hadith_attribution",
            QuestionKind::ProofText { .. } => "proof_text",
            QuestionKind::SpecificAnswer { .. } => "specific_answer",
            QuestionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses a bare type tag into an empty `QuestionKind` of that shape.
/// Unrecognized tags map to `Unknown` rather than failing, matching the
/// deserializer's fallback arm.
impl FromStr for QuestionKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "multiple_choice" => QuestionKind::MultipleChoice { options: vec![] },
            "fill_blank" => QuestionKind::FillBlank { blanks: vec![] },
            "book_reference" => QuestionKind::BookReference { correct_book: None },
            "narrator_reference" => QuestionKind::NarratorReference {
                correct_narrator: None,
            },
            "hadith_attribution" => QuestionKind::HadithAttribution {
                correct_attribution: None,
            },
            "proof_text" => QuestionKind::ProofText { proof_text: None },
            "specific_answer" => QuestionKind::SpecificAnswer {
                acceptable_answers: vec![],
            },
            _ => QuestionKind::Unknown,
        })
    }
}

/// One option of a multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "isCorrect")]
    pub is_correct: bool,
}

/// One blank of a fill-in-the-blank question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blank {
    #[serde(default, rename = "correctAnswer")]
    pub correct_answer: String,
}

/// One student's completed submission for one test.
///
/// The core treats this as read-only input; reconciliation returns derived
/// views and never writes back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attempt {
    pub id: String,
    /// The test's question set, keyed by question id.
    pub questions: BTreeMap<String, Question>,
    /// Raw student answers, keyed by question id.
    pub answers: BTreeMap<String, Value>,
    /// Append-only amendment log, chronological by creation but not
    /// guaranteed sorted.
    pub modifications: Vec<Modification>,
    /// Cached snapshot of the last-committed score state.
    pub final_score: Option<f64>,
    pub percentage: Option<f64>,
    pub is_passed: Option<bool>,
    pub total_questions: Option<u32>,
}

/// One entry in an attempt's amendment log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modification {
    /// Snapshot of the score state before this amendment was applied.
    pub before_modification: Option<ScoreState>,
    /// The amended state.
    pub after_modification: Option<Amendment>,
    /// Grader identity.
    pub modified_by: Option<String>,
    /// Timestamp, stored as a string or a raw date value.
    pub modified_at: Option<Value>,
}

/// Score state captured in a modification's `beforeModification` snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoreState {
    pub correct_answers: Option<f64>,
    pub percentage: Option<f64>,
    pub is_passed: Option<bool>,
    /// Some graders snapshot the original per-question answers here.
    pub original_answers: Option<BTreeMap<String, Value>>,
}

/// The new state recorded by a grading amendment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amendment {
    /// Per-question earned points, keyed by question id.
    pub earned_points: Option<BTreeMap<String, f64>>,
    /// Per-question grading notes; a value may be a bare string or an
    /// object carrying a `text` field.
    pub earned_notes: Option<BTreeMap<String, Value>>,
    /// Per-question replacement answers entered by the grader.
    pub modified_answers: Option<BTreeMap<String, Value>>,
    /// Explicit pass/fail override.
    pub is_passed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_tag_roundtrip() {
        for tag in [
            "multiple_choice",
            "fill_blank",
            "book_reference",
            "narrator_reference",
            "hadith_attribution",
            "proof_text",
            "specific_answer",
        ] {
            let kind: QuestionKind = tag.parse().unwrap();
            assert_eq!(kind.tag(), tag);
        }
        let kind: QuestionKind = "essay".parse().unwrap();
        assert!(matches!(kind, QuestionKind::Unknown));
    }

    #[test]
    fn question_deserializes_camel_case_fields() {
        let json = r#"{
            "id": "q1",
            "prompt": "Which book?",
            "points": 2,
            "type": "book_reference",
            "correctBook": "Sahih al-Bukhari"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.points, 2.0);
        match &q.kind {
            QuestionKind::BookReference { correct_book } => {
                assert_eq!(correct_book.as_deref(), Some("Sahih al-Bukhari"));
            }
            other => panic!("wrong kind: {other}"),
        }
    }

    #[test]
    fn unknown_type_tag_deserializes_to_unknown() {
        let json = r#"{"id": "q9", "type": "matching", "points": 1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert!(matches!(q.kind, QuestionKind::Unknown));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"type": "multiple_choice"}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.points, 0.0);
        assert!(q.prompt.is_empty());
        match &q.kind {
            QuestionKind::MultipleChoice { options } => assert!(options.is_empty()),
            other => panic!("wrong kind: {other}"),
        }
    }

    #[test]
    fn attempt_deserializes_stored_shape() {
        let json = r#"{
            "id": "attempt-1",
            "answers": {"q1": "some answer"},
            "finalScore": 3,
            "percentage": 75.0,
            "isPassed": true,
            "totalQuestions": 4,
            "modifications": [
                {
                    "afterModification": {
                        "earnedPoints": {"q1": 2},
                        "isPassed": false
                    },
                    "modifiedBy": "grader-7",
                    "modifiedAt": "2024-03-01T10:00:00Z"
                }
            ]
        }"#;
        let attempt: Attempt = serde_json::from_str(json).unwrap();
        assert_eq!(attempt.final_score, Some(3.0));
        assert_eq!(attempt.is_passed, Some(true));
        let after = attempt.modifications[0]
            .after_modification
            .as_ref()
            .unwrap();
        assert_eq!(after.earned_points.as_ref().unwrap()["q1"], 2.0);
        assert_eq!(after.is_passed, Some(false));
    }

    #[test]
    fn modification_all_fields_optional() {
        let m: Modification = serde_json::from_str("{}").unwrap();
        assert!(m.before_modification.is_none());
        assert!(m.after_modification.is_none());
        assert!(m.modified_by.is_none());
        assert!(m.modified_at.is_none());
    }

    #[test]
    fn question_serializes_back_to_stored_field_names() {
        let q = Question {
            id: "q1".into(),
            prompt: "Pick one".into(),
            points: 1.0,
            kind: QuestionKind::MultipleChoice {
                options: vec![ChoiceOption {
                    text: "A".into(),
                    is_correct: true,
                }],
            },
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "multiple_choice");
        assert_eq!(json["options"][0]["isCorrect"], true);
    }
}
