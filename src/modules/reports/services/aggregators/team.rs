use chrono::{DateTime, Utc};

use crate::core::Result;
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

/// Headcount is a snapshot; call volume is organization-wide for the period
pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportData> {
    let members = store.members(organization_id).await?;
    let calls = store.count_calls(organization_id, start, end).await?;

    let admins = members.iter().filter(|m| m.is_admin()).count();

    Ok(ReportData::new(ReportType::Team.title())
        .row("Total Members", members.len())
        .row("Admins", admins)
        .row("Calls This Period", calls))
}
