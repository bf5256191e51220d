use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

/// Start boundaries of the two rolling report windows, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub month_start: NaiveDateTime,
    pub week_start: NaiveDateTime,
}

/// Compute the current report windows from a reference instant:
/// the first of `now`'s month at midnight, and the Monday on or
/// before `now` at midnight. Pure and deterministic.
pub fn resolve_windows(now: NaiveDateTime) -> Windows {
    let today = now.date();

    // Day 1 exists in every month; the fallback is unreachable.
    let month_start = today.with_day(1).unwrap_or(today).and_time(NaiveTime::MIN);

    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let week_start = (today - Duration::days(days_since_monday)).and_time(NaiveTime::MIN);

    Windows {
        month_start,
        week_start,
    }
}
