//! Completion report aggregation.
//!
//! A report is a pure point-in-time snapshot computed from the model; it
//! takes no side effects and does not observe later changes. Callers
//! regenerate on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matrix::{Quadrant, TaskModel};

/// Completion summary for one quadrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrantReport {
    /// Which quadrant this summarizes
    pub quadrant: Quadrant,
    /// Human-readable quadrant label
    pub label: String,
    /// Number of tasks in the quadrant
    pub total: usize,
    /// Number of completed tasks
    pub completed: usize,
    /// Texts of the completed tasks, in sequence order
    pub completed_texts: Vec<String>,
}

/// Complete point-in-time completion report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// When the snapshot was taken
    pub generated_at: DateTime<Utc>,
    /// Per-quadrant summaries in model order
    pub quadrants: Vec<QuadrantReport>,
    /// Total number of tasks across all quadrants
    pub total: usize,
    /// Completed tasks across all quadrants
    pub completed: usize,
    /// Overall completion percentage rounded to one decimal place;
    /// 0.0 when there are no tasks at all
    pub rate: f64,
}

/// Build a completion report from the current model.
pub fn generate_report(model: &TaskModel) -> Report {
    let mut quadrants = Vec::with_capacity(Quadrant::ALL.len());
    for (quadrant, tasks) in model.iter() {
        let completed_texts: Vec<String> = tasks
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.text.clone())
            .collect();
        quadrants.push(QuadrantReport {
            quadrant,
            label: quadrant.label().to_string(),
            total: tasks.len(),
            completed: completed_texts.len(),
            completed_texts,
        });
    }

    let total: usize = quadrants.iter().map(|q| q.total).sum();
    let completed: usize = quadrants.iter().map(|q| q.completed).sum();
    let rate = if total == 0 {
        0.0
    } else {
        round1(completed as f64 / total as f64 * 100.0)
    };

    Report {
        generated_at: Utc::now(),
        quadrants,
        total,
        completed,
        rate,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
