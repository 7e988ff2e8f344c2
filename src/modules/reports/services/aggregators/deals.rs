use rust_decimal::Decimal;

use crate::core::{Currency, Result};
use crate::modules::reports::models::metrics::{DEAL_STATUS_LOST, DEAL_STATUS_WON};
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

/// All-time deal snapshot; deals are not period-scoped
pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
) -> Result<ReportData> {
    let deals = store.deals(organization_id).await?;
    let currency = store
        .organization(organization_id)
        .await?
        .map(|org| org.currency)
        .unwrap_or_default();

    let mut won = 0usize;
    let mut lost = 0usize;
    let mut won_revenue = Decimal::ZERO;
    let mut pipeline_value = Decimal::ZERO;

    for deal in &deals {
        match deal.status.as_str() {
            DEAL_STATUS_WON => {
                won += 1;
                won_revenue += deal.value;
            }
            DEAL_STATUS_LOST => lost += 1,
            _ => pipeline_value += deal.value,
        }
    }

    Ok(rows(deals.len(), won, lost, won_revenue, pipeline_value, currency))
}

fn rows(
    total: usize,
    won: usize,
    lost: usize,
    won_revenue: Decimal,
    pipeline_value: Decimal,
    currency: Currency,
) -> ReportData {
    ReportData::new(ReportType::Deals.title())
        .row("Total Deals", total)
        .row("Won", won)
        .row("Lost", lost)
        .row("In Pipeline", total - won - lost)
        .row("Won Revenue", currency.format_amount(won_revenue))
        .row("Pipeline Value", currency.format_amount(pipeline_value))
}
