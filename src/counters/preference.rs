use super::{ClassContext, ErrorCounter};
use crate::types::{Classroom, Preferences, WeekTime};

fn classroom_mismatch(prefs: &Preferences, room: &Classroom) -> i64 {
    if prefs.classrooms.is_empty() || prefs.classrooms.contains(&room.id) {
        0
    } else {
        1
    }
}

fn time_mismatch(prefs: &Preferences, week_time: WeekTime) -> i64 {
    if prefs.times.is_empty() || prefs.times.contains(&week_time) {
        0
    } else {
        1
    }
}

fn feature_mismatch(prefs: &Preferences, room: &Classroom) -> i64 {
    prefs.classroom_features.difference(&room.features).count() as i64
}

/// +1 if the teacher has named preferred classrooms and this one isn't
/// among them.
#[derive(Default)]
pub struct TeacherPrefClassroom {
    cur_count: i64,
}

impl ErrorCounter for TeacherPrefClassroom {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        self.cur_count += classroom_mismatch(&class.teacher.preferences, room);
    }

    fn temp_count(&self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        self.cur_count + classroom_mismatch(&class.teacher.preferences, room)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

/// +1 if the teacher has named preferred times and this week-time isn't
/// among them.
#[derive(Default)]
pub struct TeacherPrefTime {
    cur_count: i64,
}

impl ErrorCounter for TeacherPrefTime {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        self.cur_count += time_mismatch(&class.teacher.preferences, week_time);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        self.cur_count + time_mismatch(&class.teacher.preferences, week_time)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

/// Counts classroom features the teacher prefers that this room lacks.
#[derive(Default)]
pub struct TeacherPrefClassroomFeature {
    cur_count: i64,
}

impl ErrorCounter for TeacherPrefClassroomFeature {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        self.cur_count += feature_mismatch(&class.teacher.preferences, room);
    }

    fn temp_count(&self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        self.cur_count + feature_mismatch(&class.teacher.preferences, room)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

/// Same as [`TeacherPrefClassroom`] but for preferences attached to the
/// study-class itself rather than the teacher.
#[derive(Default)]
pub struct SCPrefClassroom {
    cur_count: i64,
}

impl ErrorCounter for SCPrefClassroom {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        self.cur_count += classroom_mismatch(class.preferences, room);
    }

    fn temp_count(&self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        self.cur_count + classroom_mismatch(class.preferences, room)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

/// Same as [`TeacherPrefTime`] but for study-class preferences.
#[derive(Default)]
pub struct SCPrefTime {
    cur_count: i64,
}

impl ErrorCounter for SCPrefTime {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        self.cur_count += time_mismatch(class.preferences, week_time);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        self.cur_count + time_mismatch(class.preferences, week_time)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}

/// Same as [`TeacherPrefClassroomFeature`] but for study-class preferences.
#[derive(Default)]
pub struct SCPrefClassroomFeature {
    cur_count: i64,
}

impl ErrorCounter for SCPrefClassroomFeature {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) {
        self.cur_count += feature_mismatch(class.preferences, room);
    }

    fn temp_count(&self, _week_time: WeekTime, class: &ClassContext<'_>, room: &Classroom) -> i64 {
        self.cur_count + feature_mismatch(class.preferences, room)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}
