use super::{ClassContext, ErrorCounter};
use crate::domain::weekday_and_daytime;
use crate::types::{Classroom, ClassroomSpecialization, RoomId, WeekTime};
use std::collections::HashMap;

fn overflow(students: u32, capacity: u32) -> i64 {
    (students as i64 - capacity as i64).max(0)
}

fn group_size_sum(class: &ClassContext<'_>) -> u32 {
    class.groups.iter().map(|g| g.size).sum()
}

/// Base bookkeeping shared by [`StandardClassroomOverflow`] and
/// [`SpecialClassroomOverflow`]: the running student headcount placed in
/// each (room, weekday, daytime) slot.
#[derive(Default)]
struct RoomOccupancy {
    cur_count: i64,
    schedule: HashMap<RoomId, HashMap<u32, HashMap<u32, u32>>>,
}

impl RoomOccupancy {
    fn count(&mut self, week_time: WeekTime, students: u32, room: &Classroom) {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let slot = self
            .schedule
            .entry(room.id)
            .or_default()
            .entry(weekday)
            .or_default()
            .entry(daytime)
            .or_insert(0);
        self.cur_count -= overflow(*slot, room.capacity);
        *slot += students;
        self.cur_count += overflow(*slot, room.capacity);
    }

    fn temp_count(&self, week_time: WeekTime, students: u32, room: &Classroom) -> i64 {
        let (weekday, daytime) = weekday_and_daytime(week_time);
        let before = self
            .schedule
            .get(&room.id)
            .and_then(|by_day| by_day.get(&weekday))
            .and_then(|by_time| by_time.get(&daytime))
            .copied()
            .unwrap_or(0);
        self.cur_count - overflow(before, room.capacity) + overflow(before + students, room.capacity)
    }
}

/// Student-count overflow in standard (non-specialized) classrooms.
#[derive(Default)]
pub struct StandardClassroomOverflow(RoomOccupancy);

impl ErrorCounter for StandardClassroomOverflow {
    fn reset(&mut self) {
        self.0.cur_count = 0;
        self.0.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        if room.specialization != ClassroomSpecialization::Default {
            return;
        }
        self.0.count(week_time, group_size_sum(class), room);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        if room.specialization != ClassroomSpecialization::Default {
            return self.0.cur_count;
        }
        self.0.temp_count(week_time, group_size_sum(class), room)
    }

    fn get_count(&self) -> i64 {
        self.0.cur_count
    }
}

#[cfg(test)]
mod standard_overflow_tests {
    use super::*;
    use crate::types::{Degree, GroupId, Preferences, StudentGroup, Teacher, TeacherId};

    fn room(capacity: u32, specialization: ClassroomSpecialization) -> Classroom {
        Classroom {
            id: RoomId(1),
            name: "r".into(),
            capacity,
            parallels: 1,
            specialization,
            features: Default::default(),
            available_times: vec![],
        }
    }

    fn group(size: u32) -> StudentGroup {
        StudentGroup {
            id: GroupId(1),
            name: "g".into(),
            size,
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

    /// Spec §8 scenario 2: 40 students in a 30-seat room overflows by 10.
    #[test]
    fn group_larger_than_capacity_overflows_by_the_difference() {
        let t = teacher();
        let g = group(40);
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room(30, ClassroomSpecialization::Default);
        let mut counter = StandardClassroomOverflow::default();
        counter.count(0, &context, &r);
        assert_eq!(counter.get_count(), 10);
    }

    #[test]
    fn group_within_capacity_does_not_overflow() {
        let t = teacher();
        let g = group(10);
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room(30, ClassroomSpecialization::Default);
        let mut counter = StandardClassroomOverflow::default();
        counter.count(0, &context, &r);
        assert_eq!(counter.get_count(), 0);
    }

    #[test]
    fn non_default_room_is_ignored() {
        let t = teacher();
        let g = group(40);
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room(30, ClassroomSpecialization::Computers);
        let mut counter = StandardClassroomOverflow::default();
        counter.count(0, &context, &r);
        assert_eq!(counter.get_count(), 0);
    }

    #[test]
    fn temp_count_matches_subsequent_count() {
        let t = teacher();
        let g = group(20);
        let prefs = Preferences::default();
        let context = ClassContext { teacher_id: t.id, teacher: &t, groups: vec![&g], preferences: &prefs };
        let r = room(30, ClassroomSpecialization::Default);
        let mut counter = StandardClassroomOverflow::default();
        counter.count(0, &context, &r);
        let predicted = counter.temp_count(0, &context, &r);
        counter.count(0, &context, &r);
        assert_eq!(predicted, counter.get_count());
    }
}

/// Student-count overflow in specialized (computer lab, sportsroom)
/// classrooms.
#[derive(Default)]
pub struct SpecialClassroomOverflow(RoomOccupancy);

impl ErrorCounter for SpecialClassroomOverflow {
    fn reset(&mut self) {
        self.0.cur_count = 0;
        self.0.schedule.clear();
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        if room.specialization == ClassroomSpecialization::Default {
            return;
        }
        self.0.count(week_time, group_size_sum(class), room);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        if room.specialization == ClassroomSpecialization::Default {
            return self.0.cur_count;
        }
        self.0.temp_count(week_time, group_size_sum(class), room)
    }

    fn get_count(&self) -> i64 {
        self.0.cur_count
    }
}
