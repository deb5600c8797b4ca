use serde::{Deserialize, Serialize};

/// A feature a classroom may offer (e.g. a projector).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassroomFeature {
    Projector,
    ChalkDesk,
    MarkerDesk,
}

/// Degree a student group is studying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Degree {
    Bachelor,
    Master,
}

/// Classroom category. A `StudyClass` can only be placed in a room whose
/// specialization matches the class's required specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassroomSpecialization {
    Default,
    Computers,
    Sportsroom,
}
