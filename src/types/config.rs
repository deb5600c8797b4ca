use super::{Classroom, Course, StudentGroup, StudyClass, Teacher};
use serde::{Deserialize, Serialize};

/// Raw entity lists for one scheduling instance, as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskData {
    #[serde(rename = "studyClasses")]
    pub study_classes: Vec<StudyClass>,
    pub teachers: Vec<Teacher>,
    #[serde(rename = "studentGroups")]
    pub student_groups: Vec<StudentGroup>,
    pub classrooms: Vec<Classroom>,
    pub courses: Vec<Course>,
}

/// Weight for each of the 14 error counters. Field order here IS the
/// counter ordering used everywhere else in the crate (see
/// [`crate::counters::COUNTER_NAMES`]). Changing it changes score
/// semantics, so it must never be reordered independently of the counter
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitnessWeights {
    #[serde(rename = "gWindow")]
    pub g_window: f64,
    #[serde(rename = "tWindow")]
    pub t_window: f64,
    #[serde(rename = "gParallelClass")]
    pub g_parallel_class: f64,
    #[serde(rename = "tParallelClass")]
    pub t_parallel_class: f64,
    #[serde(rename = "gExcessClass")]
    pub g_excess_class: f64,
    #[serde(rename = "cStandardOverflow")]
    pub c_standard_overflow: f64,
    #[serde(rename = "cSpecialOverflow")]
    pub c_special_overflow: f64,
    #[serde(rename = "gUnavailableTime")]
    pub g_unavailable_time: f64,
    #[serde(rename = "tPrefClassroom")]
    pub t_pref_classroom: f64,
    #[serde(rename = "tPrefTime")]
    pub t_pref_time: f64,
    #[serde(rename = "tPrefClassroomFeature")]
    pub t_pref_classroom_feature: f64,
    #[serde(rename = "scPrefClassroom")]
    pub sc_pref_classroom: f64,
    #[serde(rename = "scPrefTime")]
    pub sc_pref_time: f64,
    #[serde(rename = "scPrefClassroomFeature")]
    pub sc_pref_classroom_feature: f64,
}

impl FitnessWeights {
    /// The 14 weights in the frozen counter order.
    pub fn as_slice(&self) -> [f64; 14] {
        [
            self.g_window,
            self.t_window,
            self.g_parallel_class,
            self.t_parallel_class,
            self.g_excess_class,
            self.c_standard_overflow,
            self.c_special_overflow,
            self.g_unavailable_time,
            self.t_pref_classroom,
            self.t_pref_time,
            self.t_pref_classroom_feature,
            self.sc_pref_classroom,
            self.sc_pref_time,
            self.sc_pref_classroom_feature,
        ]
    }
}

/// Tunables for the genetic algorithm driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParams {
    #[serde(rename = "populationSize")]
    pub population_size: usize,
    #[serde(rename = "pMadeByAlgorithm")]
    pub p_made_by_algorithm: f64,
    #[serde(rename = "hallOfFameSize")]
    pub hall_of_fame_size: usize,
    #[serde(rename = "pMutation")]
    pub p_mutation: f64,
    #[serde(rename = "pCrossover")]
    pub p_crossover: f64,
    #[serde(rename = "tourSize")]
    pub tour_size: usize,
    /// Both `distance_threshold` and `sharing_extent` must be set to
    /// enable fitness sharing during selection.
    #[serde(rename = "distanceTrashold", default)]
    pub distance_threshold: Option<u32>,
    #[serde(rename = "sharingExtent", default)]
    pub sharing_extent: Option<f64>,
}

impl AlgorithmParams {
    pub fn sharing_enabled(&self) -> bool {
        self.distance_threshold.is_some() && self.sharing_extent.is_some()
    }
}

/// The whole wire-format input: entities, weights, and algorithm params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub data: TaskData,
    pub weights: FitnessWeights,
    pub params: AlgorithmParams,
}
