//! Authoritative-amendment selection.
//!
//! An attempt's modification log was never designed to have a canonical
//! "current" record, so the resolver picks the most plausibly complete
//! amendment with an explicit total order: heuristic score, then
//! timestamp, then position in the log. The positional component makes
//! the degenerate case (every modification scoring zero with no usable
//! timestamp) resolve to the last recorded entry.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::model::Modification;

/// Additive completeness heuristic over a modification's fields.
///
/// Non-empty `earnedNotes` and `earnedPoints` each add 10, a recorded
/// grader adds 5. Absent or malformed fields contribute 0.
pub fn heuristic_score(modification: &Modification) -> u32 {
    let mut score = 0;
    if let Some(after) = &modification.after_modification {
        if after.earned_notes.as_ref().is_some_and(|n| !n.is_empty()) {
            score += 10;
        }
        if after.earned_points.as_ref().is_some_and(|p| !p.is_empty()) {
            score += 10;
        }
    }
    if modification.modified_by.is_some() {
        score += 5;
    }
    score
}

/// Epoch milliseconds for a modification's `modifiedAt`, or 0 when the
/// value is absent or unparsable (the earliest possible timestamp).
pub fn timestamp_millis(modification: &Modification) -> i64 {
    match &modification.modified_at {
        Some(Value::String(raw)) => parse_timestamp(raw).unwrap_or(0),
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        _ => 0,
    }
}

fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(
            date.and_hms_opt(0, 0, 0)
                .unwrap_or_default()
                .and_utc()
                .timestamp_millis(),
        );
    }
    None
}

/// Select the single authoritative amendment from a modification log.
///
/// Empty input returns `None`. Otherwise the maximum under the
/// (score, timestamp, position) order wins: a strictly higher heuristic
/// score beats everything, a later timestamp breaks score ties, and a
/// later log position breaks full ties — which is what makes an
/// all-zero-score log resolve to its last element.
pub fn resolve_authoritative(modifications: &[Modification]) -> Option<&Modification> {
    let (position, best) = modifications
        .iter()
        .enumerate()
        .max_by_key(|(position, m)| (heuristic_score(m), timestamp_millis(m), *position))?;
    tracing::debug!(
        position,
        score = heuristic_score(best),
        timestamp_ms = timestamp_millis(best),
        "resolved authoritative modification"
    );
    Some(best)
}
