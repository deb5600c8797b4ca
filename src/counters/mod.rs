//! The 14 error counters that drive fitness evaluation (§4.2).
//!
//! Each counter is a small capability: `reset`, `count`, `temp_count`,
//! `get_count`. `temp_count` MUST be side-effect-free: it is what lets the
//! constructive creator (§4.4) probe candidate placements without
//! committing to them.

mod excess;
mod overflow;
mod parallel;
mod preference;
mod unavailable;
mod window;

pub use excess::ExcessClass;
pub use overflow::{SpecialClassroomOverflow, StandardClassroomOverflow};
pub use parallel::{GroupParallel, TeacherParallel};
pub use preference::{
    SCPrefClassroom, SCPrefClassroomFeature, SCPrefTime, TeacherPrefClassroom,
    TeacherPrefClassroomFeature, TeacherPrefTime,
};
pub use unavailable::UnavailableGroupTime;
pub use window::{GroupWindow, TeacherWindow};

use crate::types::{Classroom, Preferences, StudentGroup, Teacher, TeacherId, WeekTime};

/// Everything a counter needs about the study-class being placed, resolved
/// up front by the evaluator so counters never have to reach back into the
/// task model themselves.
pub struct ClassContext<'a> {
    pub teacher_id: TeacherId,
    pub teacher: &'a Teacher,
    pub groups: Vec<&'a StudentGroup>,
    pub preferences: &'a Preferences,
}

/// The shared contract every error counter implements.
pub trait ErrorCounter {
    fn reset(&mut self);
    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom);
    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64;
    fn get_count(&self) -> i64;
}

/// The 14 counter names in the frozen order that matches
/// [`crate::types::FitnessWeights::as_slice`]. Changing this order changes
/// score semantics for every config on disk.
pub const COUNTER_NAMES: [&str; 14] = [
    "gWindow",
    "tWindow",
    "gParallelClass",
    "tParallelClass",
    "gExcessClass",
    "cStandardOverflow",
    "cSpecialOverflow",
    "gUnavailableTime",
    "tPrefClassroom",
    "tPrefTime",
    "tPrefClassroomFeature",
    "scPrefClassroom",
    "scPrefTime",
    "scPrefClassroomFeature",
];

/// Builds a fresh counter set in the frozen order.
pub fn build_counters() -> Vec<Box<dyn ErrorCounter>> {
    vec![
        Box::new(GroupWindow::default()),
        Box::new(TeacherWindow::default()),
        Box::new(GroupParallel::default()),
        Box::new(TeacherParallel::default()),
        Box::new(ExcessClass::default()),
        Box::new(StandardClassroomOverflow::default()),
        Box::new(SpecialClassroomOverflow::default()),
        Box::new(UnavailableGroupTime::default()),
        Box::new(TeacherPrefClassroom::default()),
        Box::new(TeacherPrefTime::default()),
        Box::new(TeacherPrefClassroomFeature::default()),
        Box::new(SCPrefClassroom::default()),
        Box::new(SCPrefTime::default()),
        Box::new(SCPrefClassroomFeature::default()),
    ]
}

/// Gap between the earliest and latest entry in a day's set of daytimes:
/// `max - min - |set| + 1`. Zero for an empty or single-entry day.
pub(crate) fn window_gap(daytimes: &std::collections::HashSet<u32>) -> i64 {
    if daytimes.is_empty() {
        return 0;
    }
    let max = *daytimes.iter().max().unwrap() as i64;
    let min = *daytimes.iter().min().unwrap() as i64;
    max - min - daytimes.len() as i64 + 1
}
