//! Import/export codec for the task model.
//!
//! The export document is the model's wire shape verbatim: a JSON object
//! with exactly the four quadrant keys, each an array of task objects.
//! There is no partial export and import never merges; a successfully
//! decoded document is a full replacement for the current model.
//!
//! Import validates in two tiers so callers can tell garbage from
//! almost-right: text that is not JSON at all is a document error, JSON
//! with the wrong shape is a schema error. Either way nothing is applied.

use chrono::NaiveDate;

use crate::error::ImportError;
use crate::matrix::{Quadrant, TaskModel};

/// Serialize the full model as a pretty-printed export document.
pub fn export_model(model: &TaskModel) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(model)
}

/// Serialize the full model on a single line, for scripting pipelines.
pub fn export_model_compact(model: &TaskModel) -> Result<String, serde_json::Error> {
    serde_json::to_string(model)
}

/// File name for an export written on `date`: `tasks-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tasks-{}.json", date.format("%Y-%m-%d"))
}

/// Decode and validate an import document.
///
/// Schema requirements: a top-level object carrying exactly the four
/// quadrant keys, each an array of task objects (`id`, `text`,
/// `completed`), with no id repeated. Task `text` may be empty here;
/// import is a restore path and must not strand an otherwise valid
/// backup.
pub fn import_document(raw: &str) -> Result<TaskModel, ImportError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(ImportError::Document)?;

    let Some(object) = value.as_object() else {
        return Err(ImportError::Schema(
            "top level is not an object".to_string(),
        ));
    };
    for quadrant in Quadrant::ALL {
        match object.get(quadrant.code()) {
            None => {
                return Err(ImportError::Schema(format!(
                    "missing quadrant key '{}'",
                    quadrant.code()
                )))
            }
            Some(entry) if !entry.is_array() => {
                return Err(ImportError::Schema(format!(
                    "quadrant '{}' is not an array",
                    quadrant.code()
                )))
            }
            Some(_) => {}
        }
    }
    for key in object.keys() {
        if !Quadrant::ALL.iter().any(|q| q.code() == key) {
            return Err(ImportError::Schema(format!("unexpected key '{key}'")));
        }
    }

    let model: TaskModel =
        serde_json::from_value(value).map_err(|e| ImportError::Schema(e.to_string()))?;

    if let Some(id) = model.find_duplicate_id() {
        return Err(ImportError::Schema(format!("duplicate task id '{id}'")));
    }
    Ok(model)
}
