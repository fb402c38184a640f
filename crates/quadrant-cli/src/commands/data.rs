//! Import, export, and full reset of the task set.

use std::path::PathBuf;

use clap::Subcommand;
use quadrant_core::codec;
use quadrant_core::storage::{AppConfig, Database, StorageBackend};
use quadrant_core::{CoreError, TaskStore};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write all tasks to a dated JSON file
    Export {
        /// Directory to write into (defaults to the export.dir config, else ".")
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace every task with the contents of an exported JSON file
    Import {
        /// Exported document to read
        file: PathBuf,
        /// Confirm the destructive replacement
        #[arg(long)]
        yes: bool,
    },
    /// Delete every task in every quadrant
    Clear {
        /// Confirm the destructive reset
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), CoreError> {
    match action {
        DataAction::Export { out } => {
            let mut db = Database::open()?;
            let model = db.load_model();
            let config = AppConfig::load_or_default();
            let document = if config.export.pretty {
                codec::export_model(&model)?
            } else {
                codec::export_model_compact(&model)?
            };
            let dir = out
                .or_else(|| config.export.dir.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from("."));
            let path = dir.join(codec::export_file_name(chrono::Utc::now().date_naive()));
            std::fs::write(&path, document)?;
            println!("Exported {} tasks to {}", model.len(), path.display());
        }
        DataAction::Import { file, yes } => {
            if !yes {
                return Err(CoreError::Custom(
                    "import replaces every existing task; rerun with --yes to confirm".to_string(),
                ));
            }
            let raw = std::fs::read_to_string(&file)?;
            let model = codec::import_document(&raw)?;
            let count = model.len();
            let mut store = TaskStore::load(Box::new(Database::open()?));
            store.replace_all(model)?;
            super::warn_on_save_error(&mut store);
            println!("Imported {count} tasks from {}", file.display());
        }
        DataAction::Clear { yes } => {
            if !yes {
                return Err(CoreError::Custom(
                    "this deletes every task; rerun with --yes to confirm".to_string(),
                ));
            }
            let mut store = TaskStore::load(Box::new(Database::open()?));
            store.clear_all();
            super::warn_on_save_error(&mut store);
            println!("All tasks cleared");
        }
    }

    Ok(())
}
