use super::CourseId;
use serde::{Deserialize, Serialize};

/// A discipline taught across one or more study-classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
}
