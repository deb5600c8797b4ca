use super::{ClassroomFeature, ClassroomSpecialization, RoomId, WeekTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A physical classroom: a capacity, a specialization, a feature set, and
/// the week-times it is open for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: RoomId,
    pub name: String,
    pub capacity: u32,
    /// How many classes may run in this room at the same week-time.
    pub parallels: u32,
    pub specialization: ClassroomSpecialization,
    #[serde(default)]
    pub features: HashSet<ClassroomFeature>,
    #[serde(rename = "availableTimes")]
    pub available_times: Vec<WeekTime>,
}
