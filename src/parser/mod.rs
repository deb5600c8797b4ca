//! JSON input loading and pre-search validation (§4.7).

mod json;
mod validation;

pub use json::{load_task_config, parse_task_config};
pub use validation::{require_valid, validate_task, ValidationReport};
