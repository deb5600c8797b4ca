//! Turns the best genome into the `ClassroomsPairs` result shape (§6) and
//! renders it in more than one output format (§4.8).

mod json;
mod markdown;
mod text;

pub use json::render_json;
pub use markdown::render_markdown;
pub use text::{print_summary, render_text};

use crate::domain::weekday_and_daytime;
use crate::genome::Individual;
use crate::task::{TaskModel, ALL_SPECIALIZATIONS};
use crate::types::{RoomId, StudyClass, WeekTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One scheduled (teacher, course, groups) session within a classroom's
/// listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePair {
    pub weekday: u32,
    pub time: u32,
    pub teacher: String,
    pub course: String,
    pub groups: Vec<String>,
}

/// All sessions held in one classroom, the wire shape §6 specifies.
///
/// `Deserialize` lets the `report` subcommand read back a `schedule.json`
/// written by `solve`, without re-running the GA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassroomPairs {
    pub classroom: String,
    pub pairs: Vec<SchedulePair>,
}

/// Output format selector for the `solve`/`report` CLI subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Decodes `best` into the result shape: every non-padding genome
/// placement plus every fixed pre-placement, grouped by classroom name
/// and sorted for deterministic output.
pub fn build_result(task: &TaskModel, best: &Individual) -> Vec<ClassroomPairs> {
    let mut by_room: HashMap<RoomId, Vec<SchedulePair>> = HashMap::new();

    for spec in ALL_SPECIALIZATIONS {
        let m = task.class_count(spec);
        let classes = task.classes(spec);
        for (pos, &class_num) in best.genes(spec).iter().enumerate() {
            let class_num = class_num as usize;
            if class_num >= m {
                continue;
            }
            let sc = &classes[class_num];
            let (room_id, week_time) = task.get_slot(spec, pos);
            push_pair(&mut by_room, task, room_id, week_time, sc);
        }
    }

    for (room_id, week_time, sc) in task.fixed_placements() {
        push_pair(&mut by_room, task, room_id, week_time, sc);
    }

    let mut result: Vec<ClassroomPairs> = by_room
        .into_iter()
        .map(|(room_id, mut pairs)| {
            pairs.sort_by_key(|p| (p.weekday, p.time));
            ClassroomPairs {
                classroom: task.classrooms[&room_id].name.clone(),
                pairs,
            }
        })
        .collect();
    result.sort_by(|a, b| a.classroom.cmp(&b.classroom));
    result
}

fn push_pair(
    by_room: &mut HashMap<RoomId, Vec<SchedulePair>>,
    task: &TaskModel,
    room_id: RoomId,
    week_time: WeekTime,
    sc: &StudyClass,
) {
    let (weekday, daytime) = weekday_and_daytime(week_time);
    let teacher = &task.teachers[&sc.teacher_id];
    let course = &task.courses[&sc.course_id];
    let groups = sc
        .groups_ids
        .iter()
        .map(|id| task.groups[id].name.clone())
        .collect();
    by_room.entry(room_id).or_default().push(SchedulePair {
        weekday,
        time: daytime,
        teacher: teacher.name.clone(),
        course: course.name.clone(),
        groups,
    });
}

/// All pairs across every classroom where `teacher_name` appears, for the
/// `report --teacher` CLI view.
pub fn teacher_view<'a>(result: &'a [ClassroomPairs], teacher_name: &str) -> Vec<(&'a str, &'a SchedulePair)> {
    result
        .iter()
        .flat_map(|room| room.pairs.iter().map(move |p| (room.classroom.as_str(), p)))
        .filter(|(_, p)| p.teacher == teacher_name)
        .collect()
}

/// All pairs across every classroom that include `group_name`, for the
/// `report --group` CLI view.
pub fn group_view<'a>(result: &'a [ClassroomPairs], group_name: &str) -> Vec<(&'a str, &'a SchedulePair)> {
    result
        .iter()
        .flat_map(|room| room.pairs.iter().map(move |p| (room.classroom.as_str(), p)))
        .filter(|(_, p)| p.groups.iter().any(|g| g == group_name))
        .collect()
}
