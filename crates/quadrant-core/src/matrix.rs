//! Eisenhower matrix data model.
//!
//! Tasks are partitioned across four fixed quadrants formed by crossing
//! urgency and importance. Each quadrant holds an ordered sequence of tasks;
//! the order is the user-controlled priority order within that quadrant and
//! is meaningful everywhere (persistence, export, reports).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One of the four fixed priority quadrants.
///
/// The set is closed: no quadrant may be added or removed at runtime. Wire
/// codes ("IU", "IN", "UU", "UN") are the persisted and exported key names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Important and urgent: do it now.
    #[serde(rename = "IU")]
    ImportantUrgent,
    /// Important but not urgent: plan it.
    #[serde(rename = "IN")]
    ImportantNotUrgent,
    /// Urgent but not important: delegate or batch it.
    #[serde(rename = "UU")]
    UnimportantUrgent,
    /// Neither important nor urgent: drop or defer it.
    #[serde(rename = "UN")]
    UnimportantNotUrgent,
}

impl Quadrant {
    /// All quadrants in model order. This is the canonical iteration order
    /// for persistence, export, and reports.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ImportantUrgent,
        Quadrant::ImportantNotUrgent,
        Quadrant::UnimportantUrgent,
        Quadrant::UnimportantNotUrgent,
    ];

    /// Quadrant that newly added tasks land in.
    pub const DEFAULT: Quadrant = Quadrant::ImportantNotUrgent;

    /// Two-letter wire code used as the JSON key for this quadrant.
    pub fn code(&self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "IU",
            Quadrant::ImportantNotUrgent => "IN",
            Quadrant::UnimportantUrgent => "UU",
            Quadrant::UnimportantNotUrgent => "UN",
        }
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "Important & Urgent",
            Quadrant::ImportantNotUrgent => "Important & Not Urgent",
            Quadrant::UnimportantUrgent => "Not Important & Urgent",
            Quadrant::UnimportantNotUrgent => "Not Important & Not Urgent",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Quadrant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IU" => Ok(Quadrant::ImportantUrgent),
            "IN" => Ok(Quadrant::ImportantNotUrgent),
            "UU" => Ok(Quadrant::UnimportantUrgent),
            "UN" => Ok(Quadrant::UnimportantNotUrgent),
            _ => Err(ValidationError::UnknownQuadrant(s.to_string())),
        }
    }
}

/// One actionable item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier, assigned at creation, immutable, never reused.
    pub id: String,
    /// User-editable label.
    pub text: String,
    /// Whether the task is completed.
    pub completed: bool,
}

impl Task {
    /// Create a new uncompleted task with a fresh id.
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            id: format!(
                "task-{}-{}",
                chrono::Utc::now().timestamp(),
                uuid::Uuid::new_v4()
            ),
            text: text.into(),
            completed: false,
        }
    }
}

/// The full task state: one ordered task sequence per quadrant.
///
/// The wire shape is a JSON object with exactly the four quadrant codes as
/// keys. Decoding rejects missing or unknown keys so a structurally wrong
/// document never silently loses a quadrant.
///
/// Sequences are not exposed for external mutation; all writes go through
/// [`crate::store::TaskStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaskModel {
    #[serde(rename = "IU")]
    important_urgent: Vec<Task>,
    #[serde(rename = "IN")]
    important_not_urgent: Vec<Task>,
    #[serde(rename = "UU")]
    unimportant_urgent: Vec<Task>,
    #[serde(rename = "UN")]
    unimportant_not_urgent: Vec<Task>,
}

impl TaskModel {
    /// Empty model with all four quadrants present.
    pub fn new() -> Self {
        TaskModel::default()
    }

    /// Tasks in one quadrant, in priority order.
    pub fn tasks(&self, quadrant: Quadrant) -> &[Task] {
        match quadrant {
            Quadrant::ImportantUrgent => &self.important_urgent,
            Quadrant::ImportantNotUrgent => &self.important_not_urgent,
            Quadrant::UnimportantUrgent => &self.unimportant_urgent,
            Quadrant::UnimportantNotUrgent => &self.unimportant_not_urgent,
        }
    }

    pub(crate) fn tasks_mut(&mut self, quadrant: Quadrant) -> &mut Vec<Task> {
        match quadrant {
            Quadrant::ImportantUrgent => &mut self.important_urgent,
            Quadrant::ImportantNotUrgent => &mut self.important_not_urgent,
            Quadrant::UnimportantUrgent => &mut self.unimportant_urgent,
            Quadrant::UnimportantNotUrgent => &mut self.unimportant_not_urgent,
        }
    }

    /// Iterate quadrants and their sequences in model order.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[Task])> {
        Quadrant::ALL.into_iter().map(move |q| (q, self.tasks(q)))
    }

    /// Find the quadrant and index holding the task with this id.
    ///
    /// Ids appear in at most one sequence, so the first match is the only
    /// match.
    pub fn locate(&self, task_id: &str) -> Option<(Quadrant, usize)> {
        for (quadrant, tasks) in self.iter() {
            if let Some(index) = tasks.iter().position(|t| t.id == task_id) {
                return Some((quadrant, index));
            }
        }
        None
    }

    /// Look up a task by id.
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        let (quadrant, index) = self.locate(task_id)?;
        self.tasks(quadrant).get(index)
    }

    /// Total number of tasks across all quadrants.
    pub fn len(&self) -> usize {
        Quadrant::ALL.iter().map(|&q| self.tasks(q).len()).sum()
    }

    /// True when every quadrant is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when a quadrant is non-empty and every task in it is completed.
    ///
    /// This is the celebration trigger the presentation layer watches for.
    pub fn all_completed(&self, quadrant: Quadrant) -> bool {
        let tasks = self.tasks(quadrant);
        !tasks.is_empty() && tasks.iter().all(|t| t.completed)
    }

    /// First task id that appears more than once, if any.
    pub fn find_duplicate_id(&self) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        for (_, tasks) in self.iter() {
            for task in tasks {
                if !seen.insert(task.id.as_str()) {
                    return Some(task.id.clone());
                }
            }
        }
        None
    }
}

fn default_true() -> bool {
    true
}

/// Per-quadrant "show completed tasks" flags.
///
/// Independent lifecycle from the task model: persisted under its own
/// storage entry, and absent or partial entries decay to all-visible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayPrefs {
    #[serde(rename = "IU", default = "default_true")]
    important_urgent: bool,
    #[serde(rename = "IN", default = "default_true")]
    important_not_urgent: bool,
    #[serde(rename = "UU", default = "default_true")]
    unimportant_urgent: bool,
    #[serde(rename = "UN", default = "default_true")]
    unimportant_not_urgent: bool,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        DisplayPrefs {
            important_urgent: true,
            important_not_urgent: true,
            unimportant_urgent: true,
            unimportant_not_urgent: true,
        }
    }
}

impl DisplayPrefs {
    /// Whether completed tasks are shown for this quadrant.
    pub fn show_completed(&self, quadrant: Quadrant) -> bool {
        match quadrant {
            Quadrant::ImportantUrgent => self.important_urgent,
            Quadrant::ImportantNotUrgent => self.important_not_urgent,
            Quadrant::UnimportantUrgent => self.unimportant_urgent,
            Quadrant::UnimportantNotUrgent => self.unimportant_not_urgent,
        }
    }

    /// Set the flag for one quadrant.
    pub fn set_show_completed(&mut self, quadrant: Quadrant, show: bool) {
        let slot = match quadrant {
            Quadrant::ImportantUrgent => &mut self.important_urgent,
            Quadrant::ImportantNotUrgent => &mut self.important_not_urgent,
            Quadrant::UnimportantUrgent => &mut self.unimportant_urgent,
            Quadrant::UnimportantNotUrgent => &mut self.unimportant_not_urgent,
        };
        *slot = show;
    }

    /// Flip the flag for one quadrant and return the new value.
    pub fn toggle(&mut self, quadrant: Quadrant) -> bool {
        let next = !self.show_completed(quadrant);
        self.set_show_completed(quadrant, next);
        next
    }
}
