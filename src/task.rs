//! The read-only, preprocessed description of one scheduling instance.

use crate::error::SchedulerError;
use crate::types::{
    Classroom, ClassroomSpecialization, Course, CourseId, GroupId, RoomId, StudentGroup,
    StudyClass, TaskData, Teacher, TeacherId, WeekTime,
};
use std::collections::HashMap;

/// All classroom specializations the genome and slot table are indexed by.
pub const ALL_SPECIALIZATIONS: [ClassroomSpecialization; 3] = [
    ClassroomSpecialization::Default,
    ClassroomSpecialization::Computers,
    ClassroomSpecialization::Sportsroom,
];

/// Immutable, preprocessed description of one scheduling instance.
///
/// Built once from a validated [`TaskData`] and shared read-only by every
/// genome evaluation thereafter (§3, §5).
#[derive(Debug)]
pub struct TaskModel {
    pub classrooms: HashMap<RoomId, Classroom>,
    pub teachers: HashMap<TeacherId, Teacher>,
    pub groups: HashMap<GroupId, StudentGroup>,
    pub courses: HashMap<CourseId, Course>,

    /// Non-fixed study-classes, partitioned by required specialization.
    classes: HashMap<ClassroomSpecialization, Vec<StudyClass>>,
    /// Fixed pre-placements: room -> week-time -> classes pinned there.
    fixed: HashMap<RoomId, HashMap<WeekTime, Vec<StudyClass>>>,

    /// Slot table: parallel arrays of (room, week-time) offerings per spec.
    cl_by_pos: HashMap<ClassroomSpecialization, Vec<RoomId>>,
    cl_times: HashMap<ClassroomSpecialization, Vec<WeekTime>>,
}

impl TaskModel {
    /// Builds the task model from validated data. Fails with
    /// [`SchedulerError::TooManyStudyClasses`] or
    /// [`SchedulerError::NoMatchingClassrooms`] if the instance is
    /// infeasible (§7.2): more classes than slots for a specialization,
    /// or no rooms at all for a required specialization.
    pub fn build(data: &TaskData) -> Result<TaskModel, SchedulerError> {
        let classrooms: HashMap<RoomId, Classroom> =
            data.classrooms.iter().cloned().map(|c| (c.id, c)).collect();
        let teachers: HashMap<TeacherId, Teacher> =
            data.teachers.iter().cloned().map(|t| (t.id, t)).collect();
        let groups: HashMap<GroupId, StudentGroup> = data
            .student_groups
            .iter()
            .cloned()
            .map(|g| (g.id, g))
            .collect();
        let courses: HashMap<CourseId, Course> =
            data.courses.iter().cloned().map(|c| (c.id, c)).collect();

        let mut classes: HashMap<ClassroomSpecialization, Vec<StudyClass>> = HashMap::new();
        let mut fixed: HashMap<RoomId, HashMap<WeekTime, Vec<StudyClass>>> = HashMap::new();

        for sc in &data.study_classes {
            if sc.is_fixed() {
                if let (Some(room_id), Some(time)) = (sc.fixed_classroom_id, sc.fixed_time) {
                    fixed
                        .entry(room_id)
                        .or_default()
                        .entry(time)
                        .or_default()
                        .push(sc.clone());
                    continue;
                }
            }
            classes
                .entry(sc.classroom_specialization)
                .or_default()
                .push(sc.clone());
        }

        let mut cl_by_pos: HashMap<ClassroomSpecialization, Vec<RoomId>> = HashMap::new();
        let mut cl_times: HashMap<ClassroomSpecialization, Vec<WeekTime>> = HashMap::new();

        // Iterate rooms in definition order so position indices are
        // deterministic across runs with the same input (§4.1).
        for room in &data.classrooms {
            let mut times = Vec::with_capacity(room.available_times.len() * room.parallels as usize);
            for _ in 0..room.parallels {
                times.extend(room.available_times.iter().copied());
            }

            if let Some(fixed_for_room) = fixed.get(&room.id) {
                for (fixed_time, classes_here) in fixed_for_room {
                    for _ in 0..classes_here.len() {
                        match times.iter().position(|t| t == fixed_time) {
                            Some(pos) => {
                                times.remove(pos);
                            }
                            None => break,
                        }
                    }
                }
            }

            let entry_by_pos = cl_by_pos.entry(room.specialization).or_default();
            entry_by_pos.extend(std::iter::repeat(room.id).take(times.len()));
            cl_times.entry(room.specialization).or_default().extend(times);
        }

        for spec in ALL_SPECIALIZATIONS {
            let m = classes.get(&spec).map(Vec::len).unwrap_or(0);
            let n = cl_by_pos.get(&spec).map(Vec::len).unwrap_or(0);
            if m > 0 && n == 0 {
                return Err(SchedulerError::NoMatchingClassrooms {
                    specialization: format!("{spec:?}"),
                });
            }
            if m > n {
                return Err(SchedulerError::TooManyStudyClasses {
                    specialization: format!("{spec:?}"),
                    needed: m,
                    available: n,
                });
            }
        }

        Ok(TaskModel {
            classrooms,
            teachers,
            groups,
            courses,
            classes,
            fixed,
            cl_by_pos,
            cl_times,
        })
    }

    /// Non-fixed study-classes requiring specialization `spec`, in the
    /// order they were read from input. Index into this list is the
    /// `class_num` encoded in the genome.
    pub fn classes(&self, spec: ClassroomSpecialization) -> &[StudyClass] {
        self.classes.get(&spec).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `M_S`: number of non-fixed study-classes for this specialization.
    pub fn class_count(&self, spec: ClassroomSpecialization) -> usize {
        self.classes(spec).len()
    }

    /// `N_S`: number of (room, week-time) slots for this specialization.
    pub fn slot_count(&self, spec: ClassroomSpecialization) -> usize {
        self.cl_by_pos.get(&spec).map(Vec::len).unwrap_or(0)
    }

    /// O(1) lookup of the (room, week-time) offering at `pos` within `spec`.
    pub fn get_slot(&self, spec: ClassroomSpecialization, pos: usize) -> (RoomId, WeekTime) {
        (self.cl_by_pos[&spec][pos], self.cl_times[&spec][pos])
    }

    /// All fixed pre-placements, to be replayed into the counters at every
    /// reset: `(room, week_time, study_class)`.
    pub fn fixed_placements(&self) -> impl Iterator<Item = (RoomId, WeekTime, &StudyClass)> {
        self.fixed.iter().flat_map(|(&room, by_time)| {
            by_time
                .iter()
                .flat_map(move |(&time, classes)| classes.iter().map(move |sc| (room, time, sc)))
        })
    }
}
