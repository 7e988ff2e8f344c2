//! In-memory report store for standalone runs and tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::reports::models::metrics::CAMPAIGN_ITEM_STATUS_COMPLETED;
use crate::modules::reports::models::{
    CallRecord, CampaignItemRecord, CampaignRecord, DealRecord, LedgerEntry, MemberRecord,
    OrganizationSnapshot, ReportDefinitionRecord,
};

use super::{MetricsRepository, ReportDefinitionRepository};

#[derive(Debug, Default)]
struct MemoryState {
    /// Keyed by ID so listing order is stable
    definitions: BTreeMap<String, ReportDefinitionRecord>,
    organizations: HashMap<String, OrganizationSnapshot>,
    calls: HashMap<String, Vec<CallRecord>>,
    campaigns: HashMap<String, Vec<CampaignRecord>>,
    campaign_items: Vec<CampaignItemRecord>,
    ledger: HashMap<String, Vec<LedgerEntry>>,
    members: HashMap<String, Vec<MemberRecord>>,
    deals: HashMap<String, Vec<DealRecord>>,
}

/// Implements both repository seams over process memory
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    state: RwLock<MemoryState>,
}

fn within(created_at: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    created_at >= start && created_at <= end
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_definition(&self, record: ReportDefinitionRecord) {
        self.state
            .write()
            .await
            .definitions
            .insert(record.id.clone(), record);
    }

    /// Current stored copy of a definition
    pub async fn definition(&self, id: &str) -> Option<ReportDefinitionRecord> {
        self.state.read().await.definitions.get(id).cloned()
    }

    pub async fn insert_organization(&self, snapshot: OrganizationSnapshot) {
        self.state
            .write()
            .await
            .organizations
            .insert(snapshot.id.clone(), snapshot);
    }

    pub async fn insert_call(&self, organization_id: &str, call: CallRecord) {
        self.state
            .write()
            .await
            .calls
            .entry(organization_id.to_string())
            .or_default()
            .push(call);
    }

    pub async fn insert_campaign(&self, organization_id: &str, campaign: CampaignRecord) {
        self.state
            .write()
            .await
            .campaigns
            .entry(organization_id.to_string())
            .or_default()
            .push(campaign);
    }

    pub async fn insert_campaign_item(&self, item: CampaignItemRecord) {
        self.state.write().await.campaign_items.push(item);
    }

    pub async fn insert_ledger_entry(&self, organization_id: &str, entry: LedgerEntry) {
        self.state
            .write()
            .await
            .ledger
            .entry(organization_id.to_string())
            .or_default()
            .push(entry);
    }

    pub async fn insert_member(&self, organization_id: &str, member: MemberRecord) {
        self.state
            .write()
            .await
            .members
            .entry(organization_id.to_string())
            .or_default()
            .push(member);
    }

    pub async fn insert_deal(&self, organization_id: &str, deal: DealRecord) {
        self.state
            .write()
            .await
            .deals
            .entry(organization_id.to_string())
            .or_default()
            .push(deal);
    }
}

#[async_trait]
impl ReportDefinitionRepository for InMemoryReportStore {
    async fn list_active(&self) -> Result<Vec<ReportDefinitionRecord>> {
        Ok(self
            .state
            .read()
            .await
            .definitions
            .values()
            .filter(|record| record.is_active)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ReportDefinitionRecord>> {
        Ok(self.definition(id).await)
    }

    async fn mark_sent(&self, id: &str, sent_at: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.write().await;
        let record = state
            .definitions
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Report definition '{}'", id)))?;
        record.last_sent_at = Some(sent_at);
        Ok(())
    }
}

#[async_trait]
impl MetricsRepository for InMemoryReportStore {
    async fn organization(&self, organization_id: &str) -> Result<Option<OrganizationSnapshot>> {
        Ok(self
            .state
            .read()
            .await
            .organizations
            .get(organization_id)
            .cloned())
    }

    async fn calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CallRecord>> {
        let state = self.state.read().await;
        Ok(state
            .calls
            .get(organization_id)
            .map(|calls| {
                calls
                    .iter()
                    .filter(|call| within(call.created_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn count_calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        let calls = self.calls(organization_id, start, end).await?;
        Ok(calls.len() as i64)
    }

    async fn campaigns(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CampaignRecord>> {
        let state = self.state.read().await;
        Ok(state
            .campaigns
            .get(organization_id)
            .map(|campaigns| {
                campaigns
                    .iter()
                    .filter(|campaign| within(campaign.created_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn completed_campaign_items(
        &self,
        campaign_ids: &[String],
    ) -> Result<Vec<CampaignItemRecord>> {
        let state = self.state.read().await;
        Ok(state
            .campaign_items
            .iter()
            .filter(|item| item.status == CAMPAIGN_ITEM_STATUS_COMPLETED)
            .filter(|item| campaign_ids.contains(&item.campaign_id))
            .cloned()
            .collect())
    }

    async fn ledger_entries(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>> {
        let state = self.state.read().await;
        Ok(state
            .ledger
            .get(organization_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|entry| within(entry.created_at, start, end))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn members(&self, organization_id: &str) -> Result<Vec<MemberRecord>> {
        Ok(self
            .state
            .read()
            .await
            .members
            .get(organization_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn deals(&self, organization_id: &str) -> Result<Vec<DealRecord>> {
        Ok(self
            .state
            .read()
            .await
            .deals
            .get(organization_id)
            .cloned()
            .unwrap_or_default())
    }
}
