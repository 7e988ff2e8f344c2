use chrono::{DateTime, Duration, Months, Utc};

use crate::modules::reports::models::{Frequency, ReportPeriod};

pub const FALLBACK_PERIOD_LABEL: &str = "Past 7 days";

/// Compute the window a run summarizes, ending at `now`
///
/// Monthly windows subtract a calendar month, clamping to the last valid
/// day (Mar 31 starts on Feb 28/29). An unrecognized frequency falls back
/// to the past seven days.
pub fn period_for(frequency: Option<Frequency>, now: DateTime<Utc>) -> ReportPeriod {
    match frequency {
        Some(Frequency::Daily) => {
            let start = now - Duration::days(1);
            ReportPeriod {
                start,
                end: now,
                label: start.format("%B %-d, %Y").to_string(),
            }
        }
        Some(Frequency::Weekly) => {
            let start = now - Duration::days(7);
            ReportPeriod {
                start,
                end: now,
                label: format!("{} – {}", start.format("%b %-d"), now.format("%b %-d, %Y")),
            }
        }
        Some(Frequency::Monthly) => {
            let start = now
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| now - Duration::days(30));
            ReportPeriod {
                start,
                end: now,
                label: start.format("%B %Y").to_string(),
            }
        }
        None => ReportPeriod {
            start: now - Duration::days(7),
            end: now,
            label: FALLBACK_PERIOD_LABEL.to_string(),
        },
    }
}
