use super::ClassroomPairs;
use crate::error::Result;

/// Renders the result in the literal wire shape §6 specifies.
pub fn render_json(result: &[ClassroomPairs]) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
