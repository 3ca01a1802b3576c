//! Score reconciliation over an attempt and its amendment log.
//!
//! Produces two views of an attempt's score: the "original" state before
//! any amendment, and the "current" state after applying the authoritative
//! amendment, plus per-question detail rows for side-by-side display.
//! Everything here is a pure function of the attempt document; inputs are
//! never mutated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::evaluator::{correct_answer_label, format_answer, is_correct};
use crate::model::{Attempt, Modification};
use crate::resolver::resolve_authoritative;

/// Percentage at or above which an attempt passes, unless the amendment
/// carries an explicit override.
pub const PASS_THRESHOLD: f64 = 60.0;

/// One view of an attempt's aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct_count: f64,
    /// 0–100.
    pub percentage: f64,
    pub is_passed: bool,
}

/// Per-question comparison row for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub prompt: String,
    /// Display form of the student's original answer.
    pub original_answer: String,
    /// Display form of the grader's replacement answer, when one exists.
    pub amended_answer: Option<String>,
    pub original_correct: bool,
    pub amended_correct: Option<bool>,
    pub earned_points: f64,
    pub possible_points: f64,
    /// Human-readable statement of the accepted answer(s).
    pub correct_answer: String,
    /// Grading note attached by the amendment, trimmed; empty notes are
    /// dropped.
    pub note: Option<String>,
}

/// Result of reconciling an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    pub original: ScoreSummary,
    pub current: ScoreSummary,
    /// The amendment selected as current truth, if any exist.
    pub authoritative: Option<Modification>,
    pub questions: Vec<QuestionReview>,
}

/// Reconcile an attempt's score against its amendment log.
pub fn reconcile(attempt: &Attempt) -> Reconciliation {
    let authoritative = resolve_authoritative(&attempt.modifications);
    let before = authoritative.and_then(|m| m.before_modification.as_ref());
    let after = authoritative.and_then(|m| m.after_modification.as_ref());

    // First-present-wins: amendment snapshot, then the attempt's cached
    // state, then zero/false.
    let original = ScoreSummary {
        correct_count: before
            .and_then(|b| b.correct_answers)
            .or(attempt.final_score)
            .unwrap_or(0.0),
        percentage: before
            .and_then(|b| b.percentage)
            .or(attempt.percentage)
            .unwrap_or(0.0),
        is_passed: before
            .and_then(|b| b.is_passed)
            .or(attempt.is_passed)
            .unwrap_or(false),
    };

    let earned_points = after.and_then(|a| a.earned_points.as_ref());
    let current = match earned_points {
        Some(points) => {
            let mut total_possible = 0.0;
            let mut total_earned = 0.0;
            let mut correct_count = 0u32;
            for (qid, question) in &attempt.questions {
                total_possible += question.points;
                let earned = points.get(qid).copied().unwrap_or(0.0);
                total_earned += earned;
                // Strictly more than half the possible points; a
                // zero-point question can never count as correct.
                if earned > question.points / 2.0 {
                    correct_count += 1;
                }
            }
            let percentage = if total_possible > 0.0 {
                100.0 * total_earned / total_possible
            } else {
                0.0
            };
            ScoreSummary {
                correct_count: f64::from(correct_count),
                percentage,
                is_passed: after
                    .and_then(|a| a.is_passed)
                    .unwrap_or(percentage >= PASS_THRESHOLD),
            }
        }
        None => ScoreSummary {
            correct_count: attempt.final_score.unwrap_or(0.0),
            percentage: attempt.percentage.unwrap_or(0.0),
            is_passed: attempt.is_passed.unwrap_or(false),
        },
    };

    let questions = attempt
        .questions
        .iter()
        .map(|(qid, question)| {
            let original_raw = attempt.answers.get(qid);
            let amended_raw = after
                .and_then(|a| a.modified_answers.as_ref())
                .and_then(|m| m.get(qid));

            let original_correct = original_raw
                .map(|answer| is_correct(answer, question))
                .unwrap_or(false);
            let amended_correct = amended_raw.map(|answer| is_correct(answer, question));

            // Authoritative earned points when recorded; otherwise full
            // points iff the graded (amended when present) answer is
            // correct.
            let earned = match earned_points.and_then(|p| p.get(qid)) {
                Some(points) => *points,
                None => {
                    let graded_correct = amended_correct.unwrap_or(original_correct);
                    if graded_correct {
                        question.points
                    } else {
                        0.0
                    }
                }
            };

            let note = after
                .and_then(|a| a.earned_notes.as_ref())
                .and_then(|notes| notes.get(qid))
                .and_then(note_text);

            QuestionReview {
                question_id: qid.clone(),
                prompt: question.prompt.clone(),
                original_answer: format_answer(original_raw),
                amended_answer: amended_raw.map(|a| format_answer(Some(a))),
                original_correct,
                amended_correct,
                earned_points: earned,
                possible_points: question.points,
                correct_answer: correct_answer_label(question),
                note,
            }
        })
        .collect();

    Reconciliation {
        original,
        current,
        authoritative: authoritative.cloned(),
        questions,
    }
}

/// Extract the display text of a stored grading note.
///
/// Notes are stored either as a bare string or as an object carrying a
/// `text` field. Trimmed; a blank note is treated as no note.
fn note_text(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Object(map) => match map.get("text") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => return None,
        other => other.to_string(),
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
