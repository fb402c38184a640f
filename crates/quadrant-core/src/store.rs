//! Task store: the single owner of the task model.
//!
//! Every mutation is synchronous, runs to completion, and is atomic from
//! the caller's perspective. Each successful mutation triggers a
//! best-effort persistence write through the injected backend; a failed
//! write never rolls the model back (the in-memory model is the source of
//! truth) and is stashed for the caller to surface.
//!
//! Unknown task ids are treated as no-ops, not errors, so stale references
//! from an already-applied delete stay harmless.

use crate::error::{StorageError, ValidationError};
use crate::matrix::{Quadrant, Task, TaskModel};
use crate::storage::{MemoryBackend, StorageBackend};

/// Owner of the canonical quadrant-partitioned task lists.
pub struct TaskStore {
    model: TaskModel,
    backend: Box<dyn StorageBackend>,
    save_error: Option<StorageError>,
}

impl TaskStore {
    /// Open a store over a backend, reading the persisted model.
    pub fn load(mut backend: Box<dyn StorageBackend>) -> Self {
        let model = backend.load_model();
        TaskStore {
            model,
            backend,
            save_error: None,
        }
    }

    /// Store over a fresh in-memory backend, starting empty.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryBackend::new()))
    }

    /// Current model. Read-only; all writes go through store operations.
    pub fn model(&self) -> &TaskModel {
        &self.model
    }

    /// Error from the most recent failed persistence write, if any.
    /// Cleared on read.
    pub fn take_save_error(&mut self) -> Option<StorageError> {
        self.save_error.take()
    }

    fn persist(&mut self) {
        if let Err(e) = self.backend.save_model(&self.model) {
            self.save_error = Some(e);
        }
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Create a task and append it to the end of the default quadrant.
    ///
    /// The text is stored trimmed; trimmed-empty text is rejected.
    pub fn add_task(&mut self, text: &str) -> Result<Task, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let task = Task::new(trimmed);
        self.model.tasks_mut(Quadrant::DEFAULT).push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Move a task to another quadrant, appending it at the end.
    ///
    /// Returns false without writing when the id is unknown or the task is
    /// already in the target quadrant.
    pub fn move_task(&mut self, task_id: &str, target: Quadrant) -> bool {
        let Some((source, index)) = self.model.locate(task_id) else {
            return false;
        };
        if source == target {
            return false;
        }
        let task = self.model.tasks_mut(source).remove(index);
        self.model.tasks_mut(target).push(task);
        self.persist();
        true
    }

    /// Flip a task's completed flag, returning the new value.
    pub fn toggle_task(&mut self, task_id: &str) -> Option<bool> {
        let (quadrant, index) = self.model.locate(task_id)?;
        let task = self.model.tasks_mut(quadrant).get_mut(index)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();
        Some(completed)
    }

    /// Remove a task from whichever quadrant holds it.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let Some((quadrant, index)) = self.model.locate(task_id) else {
            return false;
        };
        self.model.tasks_mut(quadrant).remove(index);
        self.persist();
        true
    }

    /// Replace a task's text, stored trimmed.
    ///
    /// Trimmed-empty replacements are rejected and the prior text is
    /// retained. `Ok(false)` means the id is unknown.
    pub fn edit_task(&mut self, task_id: &str, new_text: &str) -> Result<bool, ValidationError> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let Some((quadrant, index)) = self.model.locate(task_id) else {
            return Ok(false);
        };
        if let Some(task) = self.model.tasks_mut(quadrant).get_mut(index) {
            task.text = trimmed.to_string();
        }
        self.persist();
        Ok(true)
    }

    /// Remove the task at `from` and reinsert it at `to` within one
    /// quadrant.
    ///
    /// Both indices are validated against the current sequence length;
    /// out-of-range requests change nothing. `from == to` succeeds without
    /// mutating or writing.
    pub fn reorder_task(
        &mut self,
        quadrant: Quadrant,
        from: usize,
        to: usize,
    ) -> Result<(), ValidationError> {
        let len = self.model.tasks(quadrant).len();
        for index in [from, to] {
            if index >= len {
                return Err(ValidationError::OutOfBounds {
                    collection: format!("quadrant {quadrant}"),
                    index,
                    len,
                });
            }
        }
        if from == to {
            return Ok(());
        }
        let tasks = self.model.tasks_mut(quadrant);
        let task = tasks.remove(from);
        tasks.insert(to, task);
        self.persist();
        Ok(())
    }

    /// Wholesale model replacement, used by import.
    ///
    /// Rejects models with duplicate task ids; on failure the current
    /// model is untouched.
    pub fn replace_all(&mut self, model: TaskModel) -> Result<(), ValidationError> {
        if let Some(id) = model.find_duplicate_id() {
            return Err(ValidationError::DuplicateId(id));
        }
        self.model = model;
        self.persist();
        Ok(())
    }

    /// Reset every quadrant to an empty sequence.
    ///
    /// Irreversible; obtaining user confirmation is the calling layer's
    /// job.
    pub fn clear_all(&mut self) {
        self.model = TaskModel::new();
        self.persist();
    }
}
