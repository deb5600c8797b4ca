use super::{ClassContext, ErrorCounter};
use crate::types::{Classroom, WeekTime};

/// +1 per group placed at a week-time outside its `available_times`.
#[derive(Default)]
pub struct UnavailableGroupTime {
    cur_count: i64,
}

fn unavailable_delta(class: &ClassContext<'_>, week_time: WeekTime) -> i64 {
    class
        .groups
        .iter()
        .filter(|g| !g.available_times.contains(&week_time))
        .count() as i64
}

impl ErrorCounter for UnavailableGroupTime {
    fn reset(&mut self) {
        self.cur_count = 0;
    }

    fn count(&mut self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) {
        self.cur_count += unavailable_delta(class, week_time);
    }

    fn temp_count(&self, week_time: WeekTime, class: &ClassContext<'_>, _room: &Classroom) -> i64 {
        self.cur_count + unavailable_delta(class, week_time)
    }

    fn get_count(&self) -> i64 {
        self.cur_count
    }
}
