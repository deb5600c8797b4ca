//! Loads the single JSON `TaskConfig` document (§6) the search engine
//! runs against.

use crate::error::{Result, SchedulerError};
use crate::types::TaskConfig;
use std::fs;
use std::path::Path;

/// Reads and deserializes a `TaskConfig` from `path`. Schema errors
/// (missing fields, wrong types) surface as [`SchedulerError::JsonParse`];
/// callers MUST still run [`crate::parser::validate_task`] before
/// building a [`crate::task::TaskModel`] from the result, since `serde`
/// alone can't express positivity/referential-integrity checks.
pub fn load_task_config(path: &Path) -> Result<TaskConfig> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;
    parse_task_config(&content, &path_str)
}

/// Deserializes a `TaskConfig` from an in-memory JSON string, reusing the
/// same error mapping as [`load_task_config`]. The split exists so tests
/// and the `demo` CLI subcommand don't need a file on disk.
pub fn parse_task_config(content: &str, source_name: &str) -> Result<TaskConfig> {
    serde_json::from_str(content).map_err(|e| {
        SchedulerError::JsonParse {
            file: source_name.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}
