use crate::core::{AppError, Result};
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

use super::{format_credits, format_percent, percent};

/// Plan consumption as of now; not period-scoped
pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
) -> Result<ReportData> {
    let org = store.organization(organization_id).await?.ok_or_else(|| {
        AppError::aggregation(format!("Organization '{}' not found", organization_id))
    })?;

    let capacity = percent(org.credits_used, org.credits_included);

    Ok(ReportData::new(ReportType::Usage.title())
        .row("Plan", &org.plan_tier)
        .row("AI Employees", org.assistant_count)
        .row(
            "Credits Used",
            format!(
                "{} / {}",
                format_credits(org.credits_used),
                format_credits(org.credits_included)
            ),
        )
        .row("Capacity Used", format_percent(capacity))
        .row("Overage Balance", org.currency.format_amount(org.overage_balance)))
}
