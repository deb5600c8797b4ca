use super::{ClassContext, ErrorCounter};
use crate::domain::{weekday_and_daytime, MAX_CLASSES_PER_DAY};
use crate::types::{Classroom, GroupId, WeekTime};
use std::collections::HashMap;

/// Counts, per group and weekday, how many classes exceed
/// [`MAX_CLASSES_PER_DAY`].
#[derive(Default)]
pub struct ExcessClass {
    cur_count: i64,
    schedule: HashMap<GroupId, HashMap<u32, u32>>,
}

fn excess(count: u32) -> i64 {
    (count as i64 - *MAX_CLASSES_PER_DAY as i64).max(0)
}

impl ErrorCounter for ExcessClass {
    fn reset(&mut self) {
        self.cur_count = 0;
        self.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        let (weekday, _) = weekday_and_daytime(week_time);
        for group in &class.groups {
            let slot = self.schedule.entry(group.id).or_default().entry(weekday).or_insert(0);
            self.cur_count -= excess(*slot);
            *slot += 1;
            self.cur_count += excess(*slot);
        }
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        let (weekday, _) = weekday_and_daytime(week_time);
        let mut temp = self.cur_count;
        for group in &class.groups {
            let before = self
                .schedule
                .get(&group.id)
                .and_then(|by_day| by_day.get(&weekday))
                .copied()
                .unwrap_or(0);
            temp -= excess(before);
            temp += excess(before + 1);
        }
        temp
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ClassroomSpecialization, Degree, Preferences, RoomId, StudentGroup, Teacher, TeacherId,
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

    fn group() -> StudentGroup {
        StudentGroup {
            id: GroupId(1),
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

    #[test]
    fn up_to_the_limit_does_not_count() {
        let t = teacher();
        let g = group();
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room();
        let mut counter = ExcessClass::default();
        for daytime in 0..*crate::domain::MAX_CLASSES_PER_DAY {
            counter.count(daytime, &context, &r);
        }
        assert_eq!(counter.get_count(), 0);
    }

    #[test]
    fn fifth_class_in_a_day_is_excess() {
        let t = teacher();
        let g = group();
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room();
        let mut counter = ExcessClass::default();
        for daytime in 0..=*crate::domain::MAX_CLASSES_PER_DAY {
            counter.count(daytime, &context, &r);
        }
        assert_eq!(counter.get_count(), 1);
    }

    #[test]
    fn temp_count_matches_committed_count() {
        let t = teacher();
        let g = group();
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room();
        let mut counter = ExcessClass::default();
        for daytime in 0..*crate::domain::MAX_CLASSES_PER_DAY {
            counter.count(daytime, &context, &r);
        }
        let predicted = counter.temp_count(*crate::domain::MAX_CLASSES_PER_DAY, &context, &r);
        counter.count(*crate::domain::MAX_CLASSES_PER_DAY, &context, &r);
        assert_eq!(predicted, counter.get_count());
    }
}
