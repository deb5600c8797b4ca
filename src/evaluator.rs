//! Turns a genome into a weighted error score by replaying every placement
//! it encodes through the 14 error counters (§4.2, §5).

use crate::counters::{build_counters, ClassContext, ErrorCounter};
use crate::genome::Individual;
use crate::task::{TaskModel, ALL_SPECIALIZATIONS};
use crate::types::{Classroom, FitnessWeights, RoomId, StudyClass, WeekTime};

/// Evaluates individuals against one fixed task instance and weight set.
///
/// Cheap to construct: it borrows the [`TaskModel`] and [`FitnessWeights`]
/// rather than copying them, so a fresh `Evaluator` can be built per
/// generation (or per thread) without cost.
pub struct Evaluator<'a> {
    task: &'a TaskModel,
    weights: &'a FitnessWeights,
}

impl<'a> Evaluator<'a> {
    pub fn new(task: &'a TaskModel, weights: &'a FitnessWeights) -> Self {
        Evaluator { task, weights }
    }

    /// Full weighted error score for `individual`. Lower is better; a
    /// perfectly conflict-free schedule scores 0.
    pub fn evaluate(&self, individual: &Individual) -> f64 {
        let mut counters = self.counters_with_fixed_seeded();
        for spec in ALL_SPECIALIZATIONS {
            let m = self.task.class_count(spec);
            let classes = self.task.classes(spec);
            for (pos, &class_num) in individual.genes(spec).iter().enumerate() {
                let class_num = class_num as usize;
                if class_num >= m {
                    // Padding position: `pi_S[pos] >= M_S`, not materialized.
                    continue;
                }
                let sc = &classes[class_num];
                let (room_id, week_time) = self.task.get_slot(spec, pos);
                self.commit(&mut counters, week_time, sc, room_id);
            }
        }
        self.weighted_sum(counters.iter())
    }

    /// Builds a fresh counter set with every fixed pre-placement already
    /// replayed into it. Used both by [`Evaluator::evaluate`] and by the
    /// constructive creator (§4.4), which needs the same starting state
    /// before it probes candidate slots one at a time.
    pub fn counters_with_fixed_seeded(&self) -> Vec<Box<dyn ErrorCounter>> {
        let mut counters = build_counters();
        for (room_id, week_time, sc) in self.task.fixed_placements() {
            self.commit(&mut counters, week_time, sc, room_id);
        }
        counters
    }

    /// Resolves a study-class into the context its counters need, borrowing
    /// from the task model.
    pub fn context_for<'c>(&'c self, sc: &'c StudyClass) -> ClassContext<'c> {
        let teacher = &self.task.teachers[&sc.teacher_id];
        let groups = sc
            .groups_ids
            .iter()
            .map(|id| &self.task.groups[id])
            .collect();
        ClassContext {
            teacher_id: sc.teacher_id,
            teacher,
            groups,
            preferences: &sc.preferences,
        }
    }

    /// Weighted error score if `sc` were placed at `(room_id, week_time)`,
    /// without mutating `counters`. The constructive creator uses this to
    /// rank candidate slots before committing to one via
    /// [`Evaluator::commit`].
    pub fn score_hypothetical(
        &self,
        counters: &[Box<dyn ErrorCounter>],
        week_time: WeekTime,
        sc: &StudyClass,
        room_id: RoomId,
    ) -> f64 {
        let room = &self.task.classrooms[&room_id];
        let ctx = self.context_for(sc);
        self.weighted_sum_temp(counters, week_time, &ctx, room)
    }

    /// Commits a placement into `counters`, mutating their running state.
    pub fn commit(
        &self,
        counters: &mut [Box<dyn ErrorCounter>],
        week_time: WeekTime,
        sc: &StudyClass,
        room_id: RoomId,
    ) {
        let room = &self.task.classrooms[&room_id];
        let ctx = self.context_for(sc);
        for counter in counters.iter_mut() {
            counter.count(week_time, &ctx, room);
        }
    }

    fn weighted_sum<'b>(&self, counters: impl Iterator<Item = &'b Box<dyn ErrorCounter>>) -> f64 {
        self.weights
            .as_slice()
            .iter()
            .zip(counters)
            .map(|(&weight, counter)| weight * counter.get_count() as f64)
            .sum()
    }

    fn weighted_sum_temp(
        &self,
        counters: &[Box<dyn ErrorCounter>],
        week_time: WeekTime,
        ctx: &ClassContext<'_>,
        room: &Classroom,
    ) -> f64 {
        self.weights
            .as_slice()
            .iter()
            .zip(counters.iter())
            .map(|(&weight, counter)| weight * counter.temp_count(week_time, ctx, room) as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ClassroomSpecialization, Course, CourseId, Degree, GroupId, Preferences, StudentGroup,
        Teacher, TeacherId, TaskData,
    };
    use std::collections::HashSet;

    fn flat_weights(value: f64) -> FitnessWeights {
        FitnessWeights {
            g_window: value,
            t_window: value,
            g_parallel_class: value,
            t_parallel_class: value,
            g_excess_class: value,
            c_standard_overflow: value,
            c_special_overflow: value,
            g_unavailable_time: value,
            t_pref_classroom: value,
            t_pref_time: value,
            t_pref_classroom_feature: value,
            sc_pref_classroom: value,
            sc_pref_time: value,
            sc_pref_classroom_feature: value,
        }
    }

    fn sample_task() -> TaskModel {
        let data = TaskData {
            study_classes: vec![crate::types::StudyClass {
                course_id: CourseId(1),
                teacher_id: TeacherId(1),
                groups_ids: vec![GroupId(1)],
                classroom_specialization: ClassroomSpecialization::Default,
                preferences: Preferences::default(),
                fixed_time: None,
                fixed_classroom_id: None,
            }],
            teachers: vec![Teacher {
                id: TeacherId(1),
                name: "t".into(),
                preferences: Preferences::default(),
                windows_allowed: true,
            }],
            student_groups: vec![StudentGroup {
                id: GroupId(1),
                name: "g".into(),
                size: 10,
                degree: Degree::Bachelor,
                available_times: (0..42).collect(),
            }],
            classrooms: vec![Classroom {
                id: RoomId(1),
                name: "r".into(),
                capacity: 30,
                parallels: 1,
                specialization: ClassroomSpecialization::Default,
                features: HashSet::new(),
                available_times: vec![0, 1],
            }],
            courses: vec![Course {
                id: CourseId(1),
                name: "c".into(),
            }],
        };
        TaskModel::build(&data).unwrap()
    }

    #[test]
    fn conflict_free_schedule_scores_zero() {
        let task = sample_task();
        let weights = flat_weights(1.0);
        let evaluator = Evaluator::new(&task, &weights);
        let mut genes = std::collections::HashMap::new();
        genes.insert(ClassroomSpecialization::Default, vec![0]);
        let individual = Individual::new(genes);
        assert_eq!(evaluator.evaluate(&individual), 0.0);
    }

    #[test]
    fn padding_position_is_not_materialized() {
        let task = sample_task();
        let weights = flat_weights(1.0);
        let evaluator = Evaluator::new(&task, &weights);
        // Two slots, one real class: position holding `1` (== M_S) is padding.
        let mut genes = std::collections::HashMap::new();
        genes.insert(ClassroomSpecialization::Default, vec![1, 0]);
        let individual = Individual::new(genes);
        assert_eq!(evaluator.evaluate(&individual), 0.0);
    }

    /// Spec §8 scenario 5: a fixed placement is seeded into the counters at
    /// every reset and interacts with the genome's non-fixed placements.
    /// Here, the genome-placed class shares the fixed class's group and
    /// lands at the same week-time, triggering one `gParallelClass`
    /// violation the evaluator could only see by replaying the fixed class.
    #[test]
    fn fixed_placement_is_seeded_and_interacts_with_genome() {
        let data = TaskData {
            study_classes: vec![
                crate::types::StudyClass {
                    course_id: CourseId(1),
                    teacher_id: TeacherId(1),
                    groups_ids: vec![GroupId(1)],
                    classroom_specialization: ClassroomSpecialization::Default,
                    preferences: Preferences::default(),
                    fixed_time: Some(0),
                    fixed_classroom_id: Some(RoomId(1)),
                },
                crate::types::StudyClass {
                    course_id: CourseId(2),
                    teacher_id: TeacherId(2),
                    groups_ids: vec![GroupId(1)],
                    classroom_specialization: ClassroomSpecialization::Default,
                    preferences: Preferences::default(),
                    fixed_time: None,
                    fixed_classroom_id: None,
                },
            ],
            teachers: vec![
                Teacher {
                    id: TeacherId(1),
                    name: "t1".into(),
                    preferences: Preferences::default(),
                    windows_allowed: true,
                },
                Teacher {
                    id: TeacherId(2),
                    name: "t2".into(),
                    preferences: Preferences::default(),
                    windows_allowed: true,
                },
            ],
            student_groups: vec![StudentGroup {
                id: GroupId(1),
                name: "g".into(),
                size: 10,
                degree: Degree::Bachelor,
                available_times: (0..42).collect(),
            }],
            classrooms: vec![Classroom {
                id: RoomId(1),
                name: "r".into(),
                capacity: 30,
                parallels: 2,
                specialization: ClassroomSpecialization::Default,
                features: HashSet::new(),
                available_times: vec![0],
            }],
            courses: vec![
                Course { id: CourseId(1), name: "c1".into() },
                Course { id: CourseId(2), name: "c2".into() },
            ],
        };
        let task = TaskModel::build(&data).unwrap();
        let weights = flat_weights(1.0);
        let evaluator = Evaluator::new(&task, &weights);

        // Only one non-fixed class, one remaining slot (parallels=2 minus
        // the one consumed by the fixed class at time 0).
        let mut genes = std::collections::HashMap::new();
        genes.insert(ClassroomSpecialization::Default, vec![0]);
        let individual = Individual::new(genes);

        // g_parallel_class is the only nonzero-weighted counter here, and
        // the genome class lands at the same (room, time) the fixed class
        // occupies for the same group, so it scores exactly 1.
        assert_eq!(evaluator.evaluate(&individual), 1.0);
    }
}
