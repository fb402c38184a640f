//! Task management commands.

use clap::Subcommand;
use quadrant_core::storage::{Database, StorageBackend};
use quadrant_core::{CoreError, Quadrant, TaskStore};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task (new tasks land in the "important, not urgent" quadrant)
    Add {
        /// Task text
        text: String,
    },
    /// List tasks grouped by quadrant
    List {
        /// Restrict to one quadrant (IU, IN, UU, UN)
        #[arg(long)]
        quadrant: Option<String>,
        /// Show completed tasks even where preferences hide them
        #[arg(long)]
        all: bool,
    },
    /// Toggle a task's completed flag
    Toggle {
        /// Task id
        id: String,
    },
    /// Replace a task's text
    Edit {
        /// Task id
        id: String,
        /// New text
        text: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },
    /// Move a task to the end of another quadrant
    Move {
        /// Task id
        id: String,
        /// Target quadrant (IU, IN, UU, UN)
        quadrant: String,
    },
    /// Move a task to a new position within its quadrant
    Reorder {
        /// Quadrant (IU, IN, UU, UN)
        quadrant: String,
        /// Current position
        from: usize,
        /// New position
        to: usize,
    },
}

pub fn run(action: TaskAction) -> Result<(), CoreError> {
    let mut db = Database::open()?;
    let prefs = db.load_prefs();
    let mut store = TaskStore::load(Box::new(db));

    match action {
        TaskAction::Add { text } => {
            let task = store.add_task(&text)?;
            super::warn_on_save_error(&mut store);
            println!("Task added to {}: {}", Quadrant::DEFAULT.code(), task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { quadrant, all } => {
            let only: Option<Quadrant> = quadrant.as_deref().map(str::parse).transpose()?;
            for (quadrant, tasks) in store.model().iter() {
                if only.is_some_and(|q| q != quadrant) {
                    continue;
                }
                let completed = tasks.iter().filter(|t| t.completed).count();
                println!(
                    "{}  {} ({completed}/{} done)",
                    quadrant.code(),
                    quadrant.label(),
                    tasks.len()
                );
                let hide_completed = !all && !prefs.show_completed(quadrant);
                for (index, task) in tasks.iter().enumerate() {
                    if hide_completed && task.completed {
                        continue;
                    }
                    let mark = if task.completed { "x" } else { " " };
                    println!("  [{index}] [{mark}] {}  ({})", task.text, task.id);
                }
                if hide_completed && completed > 0 {
                    println!("  (+{completed} completed hidden)");
                }
            }
        }
        TaskAction::Toggle { id } => match store.toggle_task(&id) {
            Some(completed) => {
                super::warn_on_save_error(&mut store);
                let state = if completed { "completed" } else { "reopened" };
                println!("Task {state}: {id}");
                if completed {
                    if let Some((quadrant, _)) = store.model().locate(&id) {
                        if store.model().all_completed(quadrant) {
                            println!("All tasks in {} are complete!", quadrant.label());
                        }
                    }
                }
            }
            None => println!("Task not found: {id}"),
        },
        TaskAction::Edit { id, text } => {
            if store.edit_task(&id, &text)? {
                super::warn_on_save_error(&mut store);
                println!("Task updated: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if store.delete_task(&id) {
                super::warn_on_save_error(&mut store);
                println!("Task deleted: {id}");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Move { id, quadrant } => {
            let target: Quadrant = quadrant.parse()?;
            if store.move_task(&id, target) {
                super::warn_on_save_error(&mut store);
                println!("Task moved to {}: {id}", target.code());
            } else if store.model().locate(&id).is_some() {
                println!("Task already in {}: {id}", target.code());
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Reorder { quadrant, from, to } => {
            let quadrant: Quadrant = quadrant.parse()?;
            store.reorder_task(quadrant, from, to)?;
            super::warn_on_save_error(&mut store);
            println!("Moved position {from} to {to} in {}", quadrant.code());
        }
    }

    Ok(())
}
