//! Pre-search validation (§7.1, §7.2): schema checks `serde` can't
//! express, referential integrity, and the infeasibility check, all
//! required to pass before a [`crate::task::TaskModel`] is built.

use crate::error::Result;
use crate::task::TaskModel;
use crate::types::TaskConfig;
use std::collections::HashSet;

/// Collected validation errors and warnings. Errors mean the GA must not
/// start; warnings are surfaced to the caller but don't block a run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Runs every pre-search check against `config`. Returns `Err` (rather
/// than a report with errors) when any hard error is found, so callers
/// that only want a go/no-go answer can use `?` directly; [`validate_task`]
/// is the richer entry point that always returns a report for inspection
/// (e.g. by the `validate` CLI subcommand).
pub fn validate_task(config: &TaskConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    let data = &config.data;

    check_duplicate_ids(config, &mut report);
    check_positivity(config, &mut report);
    check_referential_integrity(config, &mut report);
    check_algorithm_params(config, &mut report);

    // Only attempt the feasibility check (§7.2) once the structural checks
    // above pass. Building the slot table assumes well-formed ids.
    if report.is_valid() {
        if let Err(e) = TaskModel::build(data) {
            report.add_error(e.to_string());
        }
    }

    report
}

/// Convenience wrapper for callers that just want a hard stop on error.
pub fn require_valid(config: &TaskConfig) -> Result<ValidationReport> {
    let report = validate_task(config);
    if !report.is_valid() {
        return Err(anyhow::anyhow!(
            "validation failed with {} error(s):\n{}",
            report.errors.len(),
            report.errors.join("\n")
        ));
    }
    Ok(report)
}

fn check_duplicate_ids(config: &TaskConfig, report: &mut ValidationReport) {
    let data = &config.data;

    let mut seen = HashSet::new();
    for r in &data.classrooms {
        if !seen.insert(r.id) {
            report.add_error(format!("Duplicate classroom id: {}", r.id));
        }
    }
    let mut seen = HashSet::new();
    for t in &data.teachers {
        if !seen.insert(t.id) {
            report.add_error(format!("Duplicate teacher id: {}", t.id));
        }
    }
    let mut seen = HashSet::new();
    for g in &data.student_groups {
        if !seen.insert(g.id) {
            report.add_error(format!("Duplicate student group id: {}", g.id));
        }
    }
    let mut seen = HashSet::new();
    for c in &data.courses {
        if !seen.insert(c.id) {
            report.add_error(format!("Duplicate course id: {}", c.id));
        }
    }
}

fn check_positivity(config: &TaskConfig, report: &mut ValidationReport) {
    let data = &config.data;

    for r in &data.classrooms {
        if r.capacity == 0 {
            report.add_error(format!("Classroom {} has zero capacity", r.id));
        }
        if r.parallels == 0 {
            report.add_error(format!("Classroom {} has zero parallels", r.id));
        }
        if r.available_times.is_empty() {
            report.add_warning(format!("Classroom {} has no available times", r.id));
        }
    }
    for g in &data.student_groups {
        if g.size == 0 {
            report.add_error(format!("Student group {} has zero size", g.id));
        }
    }
    for (name, weight) in config.weights.as_slice().iter().zip(crate::counters::COUNTER_NAMES) {
        if *weight < 0.0 {
            report.add_error(format!("Weight '{name}' is negative: {weight}"));
        }
    }
}

fn check_referential_integrity(config: &TaskConfig, report: &mut ValidationReport) {
    let data = &config.data;
    let teacher_ids: HashSet<_> = data.teachers.iter().map(|t| t.id).collect();
    let group_ids: HashSet<_> = data.student_groups.iter().map(|g| g.id).collect();
    let course_ids: HashSet<_> = data.courses.iter().map(|c| c.id).collect();
    let classroom_ids: HashSet<_> = data.classrooms.iter().map(|c| c.id).collect();
    let classrooms_by_id: std::collections::HashMap<_, _> =
        data.classrooms.iter().map(|c| (c.id, c)).collect();

    for (i, sc) in data.study_classes.iter().enumerate() {
        if !teacher_ids.contains(&sc.teacher_id) {
            report.add_error(format!(
                "Study-class #{i} references unknown teacher {}",
                sc.teacher_id
            ));
        }
        if !course_ids.contains(&sc.course_id) {
            report.add_error(format!(
                "Study-class #{i} references unknown course {}",
                sc.course_id
            ));
        }
        if sc.groups_ids.is_empty() {
            report.add_warning(format!("Study-class #{i} has no student groups"));
        }
        for group_id in &sc.groups_ids {
            if !group_ids.contains(group_id) {
                report.add_error(format!(
                    "Study-class #{i} references unknown group {group_id}"
                ));
            }
        }
        match (sc.fixed_classroom_id, sc.fixed_time) {
            (Some(room_id), Some(time)) => {
                match classrooms_by_id.get(&room_id) {
                    None => report.add_error(format!(
                        "Study-class #{i} is pinned to unknown classroom {room_id}"
                    )),
                    Some(room) => {
                        if !room.available_times.contains(&time) {
                            report.add_error(format!(
                                "Study-class #{i} is pinned to time {time} which classroom {room_id} does not offer"
                            ));
                        }
                    }
                }
            }
            (None, None) => {}
            _ => report.add_error(format!(
                "Study-class #{i} sets only one of fixedTime/fixedClassroomId; both or neither are required"
            )),
        }
        for pref_room in &sc.preferences.classrooms {
            if !classroom_ids.contains(pref_room) {
                report.add_warning(format!(
                    "Study-class #{i} prefers unknown classroom {pref_room}"
                ));
            }
        }
    }

    for t in &data.teachers {
        for pref_room in &t.preferences.classrooms {
            if !classroom_ids.contains(pref_room) {
                report.add_warning(format!(
                    "Teacher {} prefers unknown classroom {pref_room}",
                    t.id
                ));
            }
        }
    }
}

fn check_algorithm_params(config: &TaskConfig, report: &mut ValidationReport) {
    let p = &config.params;
    if p.population_size == 0 {
        report.add_error("params.populationSize must be > 0");
    }
    if p.hall_of_fame_size > p.population_size {
        report.add_error("params.hallOfFameSize must not exceed populationSize");
    }
    if !(0.0..=1.0).contains(&p.p_made_by_algorithm) {
        report.add_error("params.pMadeByAlgorithm must be in [0, 1]");
    }
    if !(0.0..=1.0).contains(&p.p_mutation) {
        report.add_error("params.pMutation must be in [0, 1]");
    }
    if !(0.0..=1.0).contains(&p.p_crossover) {
        report.add_error("params.pCrossover must be in [0, 1]");
    }
    if p.tour_size < 2 {
        report.add_error("params.tourSize must be > 1");
    }
    if let Some(dt) = p.distance_threshold {
        if dt < 1 {
            report.add_error("params.distanceTrashold must be >= 1");
        }
    }
    if let Some(se) = p.sharing_extent {
        if se < 1.0 {
            report.add_error("params.sharingExtent must be >= 1.0");
        }
    }
    if p.distance_threshold.is_some() != p.sharing_extent.is_some() {
        report.add_error("distanceTrashold and sharingExtent must both be set to enable sharing");
    }
}
