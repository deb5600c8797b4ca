use super::{ClassroomFeature, RoomId, WeekTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Preferences attached to a teacher or a study-class: rooms, times, and
/// classroom features the owner would like to be scheduled with. An empty
/// set means "no preference" for that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub classrooms: HashSet<RoomId>,
    #[serde(default)]
    pub times: HashSet<WeekTime>,
    #[serde(rename = "classroomFeatures", default)]
    pub classroom_features: HashSet<ClassroomFeature>,
}
