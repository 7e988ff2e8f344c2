use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::reports::models::metrics::CALL_STATUS_ENDED;
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

use super::{format_percent, percent, rounded_div};

pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportData> {
    let calls = store.calls(organization_id, start, end).await?;

    let total = calls.len() as i64;
    let completed = calls
        .iter()
        .filter(|call| call.status == CALL_STATUS_ENDED)
        .count() as i64;
    let total_seconds: i64 = calls
        .iter()
        .map(|call| call.duration_seconds.unwrap_or(0).max(0))
        .sum();

    let completion_rate = percent(Decimal::from(completed), Decimal::from(total));

    Ok(ReportData::new(ReportType::Calls.title())
        .row("Total Calls", total)
        .row("Completed Calls", completed)
        .row("Completion Rate", format_percent(completion_rate))
        .row("Total Duration", format!("{} min", rounded_div(total_seconds, 60)))
        .row("Average Duration", format!("{}s", rounded_div(total_seconds, total))))
}
