use super::{window_gap, ClassContext, ErrorCounter};
use crate::domain::weekday_and_daytime;
use crate::types::{Classroom, GroupId, TeacherId, WeekTime};
use std::collections::{HashMap, HashSet};

/// Sum, over each (group, weekday), of the gap between that group's
/// earliest and latest class that day.
#[derive(Default)]
pub struct GroupWindow {
    cur_count: i64,
    schedule: HashMap<GroupId, HashMap<u32, HashSet<u32>>>,
}

impl ErrorCounter for GroupWindow {
    fn reset(&mut self) {
        self.cur_count = 0;
        self.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        for group in &class.groups {
            let day = self.schedule.entry(group.id).or_default().entry(weekday).or_default();
            self.cur_count -= window_gap(day);
            day.insert(daytime);
            self.cur_count += window_gap(day);
        }
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let mut temp = self.cur_count;
        for group in &class.groups {
            let empty = HashSet::new();
            let day = self
                .schedule
                .get(&group.id)
                .and_then(|by_day| by_day.get(&weekday))
                .unwrap_or(&empty);
            if !day.contains(&daytime) {
                let mut with_added = day.clone();
                temp -= window_gap(&with_added);
                with_added.insert(daytime);
                temp += window_gap(&with_added);
            }
        }
        temp
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

#[cfg(test)]
mod group_window_tests {
    use super::*;
    use crate::types::{
        ClassroomSpecialization, Degree, Preferences, RoomId, Teacher, TeacherId,
    };

    fn room() -> Classroom {
        Classroom {
            id: RoomId(1),
            name: "r".into(),
            capacity: 30,
            parallels: 1,
            specialization: ClassroomSpecialization::Default,
            features: Default::default(),
            available_times: vec![],
        }
    }

    fn group(id: u32) -> crate::types::StudentGroup {
        crate::types::StudentGroup {
            id: GroupId(id),
            name: "g".into(),
            size: 10,
            degree: Degree::Bachelor,
            available_times: Default::default(),
        }
    }

    fn teacher() -> Teacher {
        Teacher {
            id: TeacherId(1),
            name: "t".into(),
            preferences: Preferences::default(),
            windows_allowed: true,
        }
    }

    fn ctx<'a>(teacher: &'a Teacher, groups: Vec<&'a crate::types::StudentGroup>, prefs: &'a Preferences) -> ClassContext<'a> {
        ClassContext { teacher_id: teacher.id, teacher, groups, preferences: prefs }
    }

    /// Spec §8 scenario 4: classes at daytimes 0 and 2 leave a gap at 1.
    #[test]
    fn gap_between_classes_counts_empty_slots_between() {
        let t = teacher();
        let g = group(1);
        let prefs = Preferences::default();
        let context = ctx(&t, vec![&g], &prefs);
        let r = room();
        let mut counter = GroupWindow::default();
        counter.count(0, &context, &r);
        counter.count(2, &context, &r);
        assert_eq!(counter.get_count(), 1);
    }

    #[test]
    fn adjacent_classes_have_no_gap() {
        let t = teacher();
        let g = group(1);
        let prefs = Preferences::default();
        let context = ctx(&t, vec![&g], &prefs);
        let r = room();
        let mut counter = GroupWindow::default();
        counter.count(0, &context, &r);
        counter.count(1, &context, &r);
        assert_eq!(counter.get_count(), 0);
    }

    #[test]
    fn temp_count_matches_count_then_get() {
        let t = teacher();
        let g = group(1);
        let prefs = Preferences::default();
        let context = ctx(&t, vec![&g], &prefs);
        let r = room();
        let mut counter = GroupWindow::default();
        counter.count(0, &context, &r);
        let predicted = counter.temp_count(3, &context, &r);
        counter.count(3, &context, &r);
        assert_eq!(predicted, counter.get_count());
    }

    #[test]
    fn temp_count_does_not_mutate_state() {
        let t = teacher();
        let g = group(1);
        let prefs = Preferences::default();
        let context = ctx(&t, vec![&g], &prefs);
        let r = room();
        let mut counter = GroupWindow::default();
        counter.count(0, &context, &r);
        let before = counter.get_count();
        let _ = counter.temp_count(5, &context, &r);
        assert_eq!(counter.get_count(), before);
    }
}

/// Same gap metric, per teacher, but only counted when the teacher does
/// not allow windows (`windows_allowed == false`).
#[derive(Default)]
pub struct TeacherWindow {
    cur_count: i64,
    schedule: HashMap<TeacherId, HashMap<u32, HashSet<u32>>>,
}

impl ErrorCounter for TeacherWindow {
    fn reset(&mut self) {
        self.cur_count = 0;
        self.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        if class.teacher.windows_allowed {
            return;
        }
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let day = self
            .schedule
            .entry(class.teacher_id)
            .or_default()
            .entry(weekday)
            .or_default();
        self.cur_count -= window_gap(day);
        day.insert(daytime);
        self.cur_count += window_gap(day);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        if class.teacher.windows_allowed {
            return self.cur_count;
        }
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let empty = HashSet::new();
        let day = self
            .schedule
            .get(&class.teacher_id)
            .and_then(|by_day| by_day.get(&weekday))
            .unwrap_or(&empty);
        if day.contains(&daytime) {
            return self.cur_count;
        }
        let mut with_added = day.clone();
        let mut temp = self.cur_count;
        temp -= window_gap(&with_added);
        with_added.insert(daytime);
        temp += window_gap(&with_added);
        temp
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}
