// Period calculator tests
//
// - Every period ends at `now` and has positive length
// - Monthly windows use calendar months and clamp short months
// - Labels follow the per-frequency formats

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use proptest::prelude::*;

use reportflow::reports::models::Frequency;
use reportflow::reports::services::period_calculator::FALLBACK_PERIOD_LABEL;
use reportflow::reports::services::period_for;

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

#[test]
fn test_march_31_monthly_window_is_february() {
    let now = at(2026, 3, 31);
    let period = period_for(Some(Frequency::Monthly), now);

    assert_eq!(period.start, at(2026, 2, 28));
    assert_eq!(period.end, now);
    assert!(period.end - period.start <= Duration::days(31));
    assert!(period.end - period.start > Duration::zero());
    assert_eq!(period.label, "February 2026");
}

#[test]
fn test_january_monthly_window_crosses_year() {
    let period = period_for(Some(Frequency::Monthly), at(2027, 1, 15));

    assert_eq!(period.start, at(2026, 12, 15));
    assert_eq!(period.label, "December 2026");
}

#[test]
fn test_daily_label_names_previous_day() {
    let period = period_for(Some(Frequency::Daily), at(2026, 11, 1));

    assert_eq!(period.label, "October 31, 2026");
}

#[test]
fn test_weekly_label_spans_both_ends() {
    let period = period_for(Some(Frequency::Weekly), at(2026, 10, 19));

    assert_eq!(period.label, "Oct 12 – Oct 19, 2026");
}

#[test]
fn test_unrecognized_frequency_label() {
    let now = at(2026, 10, 19);
    let period = period_for(None, now);

    assert_eq!(period.label, FALLBACK_PERIOD_LABEL);
    assert_eq!(period.end - period.start, Duration::days(7));
}

proptest! {
    #[test]
    fn test_periods_end_at_now_with_positive_length(
        secs in 1_577_836_800i64..2_051_222_400i64,
        which in 0usize..4,
    ) {
        let now = Utc.timestamp_opt(secs, 0).unwrap();
        let frequency = [
            Some(Frequency::Daily),
            Some(Frequency::Weekly),
            Some(Frequency::Monthly),
            None,
        ][which];

        let period = period_for(frequency, now);

        prop_assert_eq!(period.end, now);
        prop_assert!(period.start < period.end);
        prop_assert!(period.end - period.start <= Duration::days(31));
    }

    #[test]
    fn test_monthly_start_is_in_previous_calendar_month(
        secs in 1_577_836_800i64..2_051_222_400i64,
    ) {
        let now = Utc.timestamp_opt(secs, 0).unwrap();
        let period = period_for(Some(Frequency::Monthly), now);

        let expected_month = if now.month() == 1 { 12 } else { now.month() - 1 };
        prop_assert_eq!(period.start.month(), expected_month);
        prop_assert!(period.start.day() <= now.day());
    }
}
