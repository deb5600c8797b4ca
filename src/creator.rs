//! Builds initial individuals for the population (§4.4): either a uniform
//! random permutation per specialization, or a greedy constructive build
//! that places each study-class at its locally best-scoring free slot.

use crate::counters::ErrorCounter;
use crate::evaluator::Evaluator;
use crate::genome::Individual;
use crate::task::{TaskModel, ALL_SPECIALIZATIONS};
use crate::types::{ClassroomSpecialization, FitnessWeights, StudyClass};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

pub struct IndividualCreator<'a> {
    task: &'a TaskModel,
    evaluator: Evaluator<'a>,
}

impl<'a> IndividualCreator<'a> {
    pub fn new(task: &'a TaskModel, weights: &'a FitnessWeights) -> Self {
        IndividualCreator {
            task,
            evaluator: Evaluator::new(task, weights),
        }
    }

    /// Picks the constructive strategy with probability `p_made_by_algorithm`,
    /// uniform-random otherwise. This is the mix the population init draws from.
    pub fn create(&self, p_made_by_algorithm: f64, rng: &mut impl Rng) -> Individual {
        if rng.random::<f64>() < p_made_by_algorithm {
            self.create_constructive(rng)
        } else {
            self.create_random(rng)
        }
    }

    /// A uniform-random permutation of `[0, N_S)` for every specialization.
    pub fn create_random(&self, rng: &mut impl Rng) -> Individual {
        let mut genes = HashMap::new();
        for spec in ALL_SPECIALIZATIONS {
            let n = self.task.slot_count(spec) as u32;
            let mut perm: Vec<u32> = (0..n).collect();
            perm.shuffle(rng);
            genes.insert(spec, perm);
        }
        Individual::new(genes)
    }

    /// Greedily places each study-class, in random order, at whichever free
    /// slot currently scores lowest, then fills the remaining (padding)
    /// positions with sentinel class numbers `>= M_S`.
    pub fn create_constructive(&self, rng: &mut impl Rng) -> Individual {
        let mut slots: HashMap<ClassroomSpecialization, Vec<Option<u32>>> = ALL_SPECIALIZATIONS
            .into_iter()
            .map(|spec| (spec, vec![None; self.task.slot_count(spec)]))
            .collect();
        let mut counters = self.evaluator.counters_with_fixed_seeded();

        for spec in ALL_SPECIALIZATIONS {
            let classes = self.task.classes(spec);
            let mut order: Vec<usize> = (0..classes.len()).collect();
            order.shuffle(rng);
            for class_num in order {
                let sc = &classes[class_num];
                let free = slots.get_mut(&spec).expect("specialization always present");
                let pos = self.find_best_pos(free, spec, sc, &counters, rng);
                free[pos] = Some(class_num as u32);
                let (room_id, week_time) = self.task.get_slot(spec, pos);
                self.evaluator.commit(&mut counters, week_time, sc, room_id);
            }
        }

        Individual::new(fill_padding(slots))
    }

    /// Among the still-free positions for `spec`, returns one that
    /// minimizes the hypothetical score of placing `sc` there, breaking
    /// ties uniformly at random.
    fn find_best_pos(
        &self,
        free: &[Option<u32>],
        spec: ClassroomSpecialization,
        sc: &StudyClass,
        counters: &[Box<dyn ErrorCounter>],
        rng: &mut impl Rng,
    ) -> usize {
        let mut best_positions = Vec::new();
        let mut best_score = f64::INFINITY;
        for (pos, slot) in free.iter().enumerate() {
            if slot.is_some() {
                continue;
            }
            let (room_id, week_time) = self.task.get_slot(spec, pos);
            let score = self.evaluator.score_hypothetical(counters, week_time, sc, room_id);
            if score < best_score {
                best_score = score;
                best_positions.clear();
                best_positions.push(pos);
            } else if score == best_score {
                best_positions.push(pos);
            }
        }
        best_positions[rng.random_range(0..best_positions.len())]
    }
}

/// Assigns padding positions (left `None` by the constructive build) the
/// sentinel class numbers `M_S, M_S + 1, ...`, each `>= M_S`, so
/// [`Individual::genes`] readers can tell real placements from padding by a
/// single bounds check, never by sign.
fn fill_padding(
    slots: HashMap<ClassroomSpecialization, Vec<Option<u32>>>,
) -> HashMap<ClassroomSpecialization, Vec<u32>> {
    slots
        .into_iter()
        .map(|(spec, positions)| {
            let mut next_padding = positions.iter().filter(|s| s.is_some()).count() as u32;
            let genes = positions
                .into_iter()
                .map(|slot| match slot {
                    Some(class_num) => class_num,
                    None => {
                        let padding = next_padding;
                        next_padding += 1;
                        padding
                    }
                })
                .collect();
            (spec, genes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        Classroom, ClassroomSpecialization, Course, CourseId, Degree, GroupId, Preferences,
        RoomId, StudentGroup, Teacher, TeacherId, TaskData,
    };
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn weights() -> FitnessWeights {
        FitnessWeights {
            g_window: 1.0,
            t_window: 1.0,
            g_parallel_class: 5.0,
            t_parallel_class: 5.0,
            g_excess_class: 1.0,
            c_standard_overflow: 1.0,
            c_special_overflow: 1.0,
            g_unavailable_time: 5.0,
            t_pref_classroom: 1.0,
            t_pref_time: 1.0,
            t_pref_classroom_feature: 1.0,
            sc_pref_classroom: 1.0,
            sc_pref_time: 1.0,
            sc_pref_classroom_feature: 1.0,
        }
    }

    fn sample_task() -> TaskModel {
        let data = TaskData {
            study_classes: vec![
                StudyClass {
                    course_id: CourseId(1),
                    teacher_id: TeacherId(1),
                    groups_ids: vec![GroupId(1)],
                    classroom_specialization: ClassroomSpecialization::Default,
                    preferences: Preferences::default(),
                    fixed_time: None,
                    fixed_classroom_id: None,
                },
                StudyClass {
                    course_id: CourseId(2),
                    teacher_id: TeacherId(1),
                    groups_ids: vec![GroupId(1)],
                    classroom_specialization: ClassroomSpecialization::Default,
                    preferences: Preferences::default(),
                    fixed_time: None,
                    fixed_classroom_id: None,
                },
            ],
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
                available_times: vec![0, 1, 2, 3],
            }],
            courses: vec![
                Course { id: CourseId(1), name: "c1".into() },
                Course { id: CourseId(2), name: "c2".into() },
            ],
        };
        TaskModel::build(&data).unwrap()
    }

    #[test]
    fn random_individual_is_a_valid_permutation() {
        let task = sample_task();
        let w = weights();
        let creator = IndividualCreator::new(&task, &w);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let ind = creator.create_random(&mut rng);
        assert!(ind.is_valid());
    }

    #[test]
    fn constructive_individual_is_a_valid_permutation() {
        let task = sample_task();
        let w = weights();
        let creator = IndividualCreator::new(&task, &w);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let ind = creator.create_constructive(&mut rng);
        assert!(ind.is_valid());
    }

    #[test]
    fn constructive_individual_avoids_avoidable_conflicts() {
        let task = sample_task();
        let w = weights();
        let creator = IndividualCreator::new(&task, &w);
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let ind = creator.create_constructive(&mut rng);
        let evaluator = Evaluator::new(&task, &w);
        // Four open slots for two classes sharing a teacher/group: a
        // greedy build should always find a parallel-free placement.
        assert_eq!(evaluator.evaluate(&ind), 0.0);
    }
}
