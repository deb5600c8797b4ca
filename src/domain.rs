//! Domain constants and week-time ↔ (weekday, daytime) conversions.
//!
//! A week-time is a single integer `t` in `[0, DAYS_PER_WEEK *
//! CLASSES_PER_DAY)`. All three constants are compile-time defaults that
//! can be overridden at process start via environment variables, per the
//! external-interface contract.

use once_cell::sync::Lazy;
use std::env;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub static DAYS_PER_WEEK: Lazy<u32> = Lazy::new(|| env_or("SCHEDULING_DAYS_PER_WEEK", 6));
pub static CLASSES_PER_DAY: Lazy<u32> = Lazy::new(|| env_or("SCHEDULING_CLASSES_PER_DAY", 7));
pub static MAX_CLASSES_PER_DAY: Lazy<u32> =
    Lazy::new(|| env_or("SCHEDULING_MAX_CLASSES_PER_DAY", 4));

/// Split a week-time into `(weekday, daytime)` using the current
/// [`CLASSES_PER_DAY`].
pub fn weekday_and_daytime(week_time: u32) -> (u32, u32) {
    (week_time / *CLASSES_PER_DAY, week_time % *CLASSES_PER_DAY)
}

/// Recombine a `(weekday, daytime)` pair into a week-time.
pub fn week_time_of(weekday: u32, daytime: u32) -> u32 {
    weekday * *CLASSES_PER_DAY + daytime
}

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Display name for a weekday index, for reporter output. Falls back to a
/// numbered label past a 7-day week (the domain constants are
/// env-overridable, see above).
pub fn weekday_name(weekday: u32) -> String {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Day {weekday}"))
}
