//! Reconciliation report with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reconcile::Reconciliation;

/// A persisted record of one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The attempt this report covers.
    pub attempt_id: String,
    /// The reconciliation result.
    pub reconciliation: Reconciliation,
}

impl ReconciliationReport {
    pub fn new(attempt_id: impl Into<String>, reconciliation: Reconciliation) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            attempt_id: attempt_id.into(),
            reconciliation,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ReconciliationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Signed percentage-point change from the original view to the
    /// current one.
    pub fn score_delta(&self) -> f64 {
        self.reconciliation.current.percentage - self.reconciliation.original.percentage
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let r = &self.reconciliation;
        let mut md = String::new();

        md.push_str(&format!("## Attempt {}\n\n", self.attempt_id));
        md.push_str(&format!(
            "**Original:** {} correct, {:.1}%, {}\n\n",
            r.original.correct_count,
            r.original.percentage,
            pass_label(r.original.is_passed)
        ));
        md.push_str(&format!(
            "**Current:** {} correct, {:.1}%, {} ({:+.1}%)\n\n",
            r.current.correct_count,
            r.current.percentage,
            pass_label(r.current.is_passed),
            self.score_delta()
        ));

        if !r.questions.is_empty() {
            md.push_str("| Question | Answer | Amended | Points | Note |\n");
            md.push_str("|----------|--------|---------|--------|------|\n");
            for row in &r.questions {
                md.push_str(&format!(
                    "| {} | {} {} | {} | {:.1}/{:.1} | {} |\n",
                    row.question_id,
                    row.original_answer,
                    if row.original_correct { "✓" } else { "✗" },
                    row.amended_answer.as_deref().unwrap_or("-"),
                    row.earned_points,
                    row.possible_points,
                    row.note.as_deref().unwrap_or("")
                ));
            }
        }

        md
    }
}

fn pass_label(passed: bool) -> &'static str {
    if passed {
        "passed"
    } else {
        "failed"
    }
}
