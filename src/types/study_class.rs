use super::{ClassroomSpecialization, CourseId, GroupId, Preferences, RoomId, TeacherId, WeekTime};
use serde::{Deserialize, Serialize};

/// One session to be scheduled: a course taught by a teacher to a set of
/// groups, requiring a classroom of a given specialization.
///
/// A class with both `fixed_time` and `fixed_classroom_id` set is never
/// encoded in a genome. It is injected directly by the evaluator at every
/// reset (see [`crate::evaluator::Evaluator`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyClass {
    #[serde(rename = "courseId")]
    pub course_id: CourseId,
    #[serde(rename = "teacherId")]
    pub teacher_id: TeacherId,
    #[serde(rename = "groupsIds")]
    pub groups_ids: Vec<GroupId>,
    #[serde(rename = "classroomSpecialization")]
    pub classroom_specialization: ClassroomSpecialization,
    pub preferences: Preferences,
    #[serde(rename = "fixedTime")]
    pub fixed_time: Option<WeekTime>,
    #[serde(rename = "fixedClassroomId")]
    pub fixed_classroom_id: Option<RoomId>,
}

impl StudyClass {
    /// Whether this class is pinned to a specific (classroom, week-time)
    /// and therefore excluded from the genome.
    pub fn is_fixed(&self) -> bool {
        self.fixed_classroom_id.is_some()
    }
}
