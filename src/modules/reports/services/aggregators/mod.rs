//! Per-category metric aggregation.
//!
//! Each submodule turns store rows for one organization into an ordered
//! `ReportData`. Dispatch is an exhaustive match on `ReportType`, so a new
//! category does not compile until it has an aggregator.
//!
//! Shared display policy lives here: percentages round to whole numbers,
//! a zero denominator reports `0%`, credit amounts drop trailing zeros.

mod billing;
mod calls;
mod campaigns;
mod deals;
mod team;
mod usage;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::Result;
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

/// Build the report rows for `report_type` over `[start, end]`
pub async fn aggregate(
    report_type: ReportType,
    store: &dyn MetricsRepository,
    organization_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportData> {
    match report_type {
        ReportType::Usage => usage::aggregate(store, organization_id).await,
        ReportType::Calls => calls::aggregate(store, organization_id, start, end).await,
        ReportType::Campaigns => campaigns::aggregate(store, organization_id, start, end).await,
        ReportType::Billing => billing::aggregate(store, organization_id, start, end).await,
        ReportType::Team => team::aggregate(store, organization_id, start, end).await,
        ReportType::Deals => deals::aggregate(store, organization_id).await,
    }
}

/// Whole-number percentage; 0 when the denominator is zero
pub(crate) fn percent(numerator: Decimal, denominator: Decimal) -> i64 {
    if denominator.is_zero() {
        return 0;
    }
    round_whole(numerator / denominator * Decimal::ONE_HUNDRED)
}

fn round_whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Integer division rounded to nearest; 0 when the divisor is zero
pub(crate) fn rounded_div(numerator: i64, divisor: i64) -> i64 {
    if divisor == 0 {
        return 0;
    }
    round_whole(Decimal::from(numerator) / Decimal::from(divisor))
}

pub(crate) fn format_credits(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

pub(crate) fn format_percent(value: i64) -> String {
    format!("{}%", value)
}
