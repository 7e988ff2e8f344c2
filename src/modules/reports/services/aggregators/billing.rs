use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{LedgerEntryType, ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

use super::format_credits;

/// Period ledger movements alongside the current balance
pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportData> {
    let org = store.organization(organization_id).await?.ok_or_else(|| {
        AppError::aggregation(format!("Organization '{}' not found", organization_id))
    })?;
    let entries = store.ledger_entries(organization_id, start, end).await?;

    let consumed: Decimal = entries
        .iter()
        .filter(|e| e.entry_type == LedgerEntryType::Usage)
        .map(|e| e.amount.abs())
        .sum();
    let added: Decimal = entries
        .iter()
        .filter(|e| e.entry_type.is_credit_addition())
        .map(|e| e.amount)
        .sum();

    Ok(ReportData::new(ReportType::Billing.title())
        .row("Plan", &org.plan_tier)
        .row("Credits Used", format_credits(consumed))
        .row("Credits Added", format_credits(added))
        .row("Current Balance", format_credits(org.credit_balance))
        .row(
            "Overage Rate",
            format!("{} / credit", org.currency.format_amount(org.overage_rate)),
        ))
}
