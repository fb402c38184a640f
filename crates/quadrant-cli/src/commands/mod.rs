pub mod completions;
pub mod config;
pub mod data;
pub mod prefs;
pub mod report;
pub mod task;

use quadrant_core::TaskStore;

/// Reports a stashed persistence failure without failing the command.
/// The in-memory change already took effect; storage is best-effort.
pub(crate) fn warn_on_save_error(store: &mut TaskStore) {
    if let Some(e) = store.take_save_error() {
        eprintln!("warning: failed to persist tasks: {e}");
    }
}
