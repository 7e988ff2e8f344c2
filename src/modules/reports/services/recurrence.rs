use chrono::{DateTime, Datelike, Duration, Utc};

use crate::modules::reports::models::{Frequency, Schedule};

/// Minimum gap between two daily sends. One hour short of a day so an early
/// trigger does not skip a day.
pub fn daily_threshold() -> Duration {
    Duration::hours(23)
}

/// Minimum gap between two weekly sends, checked after the weekday gate
pub fn weekly_threshold() -> Duration {
    Duration::days(6)
}

/// Minimum gap between two monthly sends, checked after the day-of-month gate
pub fn monthly_threshold() -> Duration {
    Duration::days(27)
}

/// Decide whether a schedule is due at `now`
///
/// Weekly and monthly schedules only fire on their configured day
/// (Sunday = 0 for weekdays); the elapsed-time threshold then keeps them from
/// firing twice on that day. Unrecognized frequencies are never due.
pub fn is_due(schedule: &Schedule, now: DateTime<Utc>) -> bool {
    match schedule.frequency {
        Some(Frequency::Daily) => elapsed_beyond(schedule.last_sent_at, now, daily_threshold()),
        Some(Frequency::Weekly) => {
            now.weekday().num_days_from_sunday() == schedule.day_of_week
                && elapsed_beyond(schedule.last_sent_at, now, weekly_threshold())
        }
        Some(Frequency::Monthly) => {
            now.day() == schedule.day_of_month
                && elapsed_beyond(schedule.last_sent_at, now, monthly_threshold())
        }
        None => false,
    }
}

fn elapsed_beyond(last_sent_at: Option<DateTime<Utc>>, now: DateTime<Utc>, threshold: Duration) -> bool {
    match last_sent_at {
        None => true,
        Some(sent) => now - sent > threshold,
    }
}
