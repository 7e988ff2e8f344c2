use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::core::Result;
use crate::modules::reports::models::metrics::{CAMPAIGN_STATUS_ACTIVE, CAMPAIGN_STATUS_COMPLETED};
use crate::modules::reports::models::{ReportData, ReportType};
use crate::modules::reports::repositories::MetricsRepository;

pub(super) async fn aggregate(
    store: &dyn MetricsRepository,
    organization_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportData> {
    let campaigns = store.campaigns(organization_id, start, end).await?;

    let active = campaigns
        .iter()
        .filter(|c| c.status == CAMPAIGN_STATUS_ACTIVE)
        .count();
    let completed = campaigns
        .iter()
        .filter(|c| c.status == CAMPAIGN_STATUS_COMPLETED)
        .count();

    // Contacts are counted once even when reached by several campaigns
    let contacts_reached = if campaigns.is_empty() {
        0
    } else {
        let ids: Vec<String> = campaigns.iter().map(|c| c.id.clone()).collect();
        store
            .completed_campaign_items(&ids)
            .await?
            .into_iter()
            .map(|item| item.contact_id)
            .collect::<HashSet<_>>()
            .len()
    };

    Ok(ReportData::new(ReportType::Campaigns.title())
        .row("Total Campaigns", campaigns.len())
        .row("Active Campaigns", active)
        .row("Completed Campaigns", completed)
        .row("Contacts Reached", contacts_reached))
}
