use super::{Degree, GroupId, WeekTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A cohort of students that attends classes together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: GroupId,
    pub name: String,
    pub size: u32,
    pub degree: Degree,
    #[serde(rename = "availableTimes")]
    pub available_times: HashSet<WeekTime>,
}
