use super::{ClassContext, ErrorCounter};
use crate::domain::weekday_and_daytime;
use crate::types::{Classroom, GroupId, TeacherId, WeekTime};
use std::collections::HashMap;

/// +1 for every class beyond the first that lands a given id on the same
/// (weekday, daytime), i.e. a double-booking.
#[derive(Default)]
pub struct GroupParallel {
    cur_count: i64,
    schedule: HashMap<GroupId, HashMap<u32, HashMap<u32, u32>>>,
}

impl ErrorCounter for GroupParallel {
    fn reset(&mut self) {
        self.cur_count = 0;
        self.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        for group in &class.groups {
            let slot = self
                .schedule
                .entry(group.id)
                .or_default()
                .entry(weekday)
                .or_default()
                .entry(daytime)
                .or_insert(0);
            *slot += 1;
            if *slot > 1 {
                self.cur_count += 1;
            }
        }
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let mut temp = self.cur_count;
        for group in &class.groups {
            let before = self
                .schedule
                .get(&group.id)
                .and_then(|by_day| by_day.get(&weekday))
                .and_then(|by_time| by_time.get(&daytime))
                .copied()
                .unwrap_or(0);
            if before >= 1 {
                temp += 1;
            }
        }
        temp
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}


/// Same double-booking metric, for the teacher delivering the class.
#[derive(Default)]
pub struct TeacherParallel {
    cur_count: i64,
    schedule: HashMap<TeacherId, HashMap<u32, HashMap<u32, u32>>>,
}

impl ErrorCounter for TeacherParallel {
    fn reset(&mut self) {
        self.cur_count = 0;
        self.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let slot = self
            .schedule
            .entry(class.teacher_id)
            .or_default()
            .entry(weekday)
            .or_default()
            .entry(daytime)
            .or_insert(0);
        *slot += 1;
        if *slot > 1 {
            self.cur_count += 1;
        }
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let before = self
            .schedule
            .get(&class.teacher_id)
            .and_then(|by_day| by_day.get(&weekday))
            .and_then(|by_time| by_time.get(&daytime))
            .copied()
            .unwrap_or(0);
        if before >= 1 {
            self.cur_count + 1
        } else {
            self.cur_count
        }
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

#[cfg(test)]
mod teacher_parallel_tests {
    use super::*;
    use crate::types::{
        ClassroomSpecialization, Preferences, RoomId, StudentGroup, Teacher,
    };

    fn room() -> Classroom {
        Classroom {
            id: RoomId(1),
            name: "r".into(),
            capacity: 30,
            parallels: 2,
            specialization: ClassroomSpecialization::Default,
            features: Default::default(),
            available_times: vec![],
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
    fn teacher_double_booked_at_same_slot_counts_one() {
        let t = teacher();
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: Vec::<&StudentGroup>::new(), preferences: &prefs };
        let r = room();
        let mut counter = TeacherParallel::default();
        counter.count(0, &context, &r);
        counter.count(0, &context, &r);
        assert_eq!(counter.get_count(), 1);
    }

    #[test]
    fn different_teachers_do_not_share_state() {
        let t1 = teacher();
        let t2 = Teacher { id: TeacherId(2), ..teacher() };
        let prefs = Preferences::default();
        let ctx1 = ClassContext { teacher_id: t1.id, teacher: &t1, groups: Vec::<&StudentGroup>::new(), preferences: &prefs };
        let ctx2 = ClassContext { teacher_id: t2.id, teacher: &t2, groups: Vec::<&StudentGroup>::new(), preferences: &prefs };
        let r = room();
        let mut counter = TeacherParallel::default();
        counter.count(0, &ctx1, &r);
        counter.count(0, &ctx2, &r);
        assert_eq!(counter.get_count(), 0);
    }
}
