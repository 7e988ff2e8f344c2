use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::core::Result;
use crate::modules::reports::models::metrics::CAMPAIGN_ITEM_STATUS_COMPLETED;
use crate::modules::reports::models::{
    CallRecord, CampaignItemRecord, CampaignRecord, DealRecord, LedgerEntry, MemberRecord,
    OrganizationSnapshot,
};

/// Read-only queries backing the metric aggregators
///
/// Every method is scoped to one organization. Period-bounded methods filter
/// on `created_at` within `[start, end]` inclusive.
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    async fn organization(&self, organization_id: &str) -> Result<Option<OrganizationSnapshot>>;

    async fn calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CallRecord>>;

    async fn count_calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64>;

    async fn campaigns(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CampaignRecord>>;

    /// Completed items belonging to any of `campaign_ids`
    async fn completed_campaign_items(
        &self,
        campaign_ids: &[String],
    ) -> Result<Vec<CampaignItemRecord>>;

    async fn ledger_entries(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>>;

    async fn members(&self, organization_id: &str) -> Result<Vec<MemberRecord>>;

    async fn deals(&self, organization_id: &str) -> Result<Vec<DealRecord>>;
}

pub struct MySqlMetricsRepository {
    pool: MySqlPool,
}

impl MySqlMetricsRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsRepository for MySqlMetricsRepository {
    async fn organization(&self, organization_id: &str) -> Result<Option<OrganizationSnapshot>> {
        let snapshot = sqlx::query_as::<_, OrganizationSnapshot>(
            r#"
            SELECT
                o.id, o.name, o.plan_tier,
                (SELECT COUNT(*) FROM assistants a WHERE a.organization_id = o.id) AS assistant_count,
                o.credits_used, o.credits_included, o.credit_balance,
                o.overage_balance, o.overage_rate, o.currency
            FROM organizations o
            WHERE o.id = ?
            "#,
        )
        .bind(organization_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    async fn calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CallRecord>> {
        let calls = sqlx::query_as::<_, CallRecord>(
            r#"
            SELECT status, CAST(duration_seconds AS SIGNED) AS duration_seconds, created_at
            FROM calls
            WHERE organization_id = ? AND created_at >= ? AND created_at <= ?
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(calls)
    }

    async fn count_calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM calls
            WHERE organization_id = ? AND created_at >= ? AND created_at <= ?
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn campaigns(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CampaignRecord>> {
        let campaigns = sqlx::query_as::<_, CampaignRecord>(
            r#"
            SELECT id, status, created_at
            FROM campaigns
            WHERE organization_id = ? AND created_at >= ? AND created_at <= ?
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(campaigns)
    }

    async fn completed_campaign_items(
        &self,
        campaign_ids: &[String],
    ) -> Result<Vec<CampaignItemRecord>> {
        if campaign_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<MySql>::new(
            "SELECT campaign_id, contact_id, status FROM campaign_items WHERE status = ",
        );
        builder.push_bind(CAMPAIGN_ITEM_STATUS_COMPLETED);
        builder.push(" AND campaign_id IN (");
        let mut ids = builder.separated(", ");
        for id in campaign_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(")");

        let items = builder
            .build_query_as::<CampaignItemRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn ledger_entries(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT entry_type, amount, created_at
            FROM credit_ledger
            WHERE organization_id = ? AND created_at >= ? AND created_at <= ?
            "#,
        )
        .bind(organization_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn members(&self, organization_id: &str) -> Result<Vec<MemberRecord>> {
        let members = sqlx::query_as::<_, MemberRecord>(
            "SELECT user_id, role FROM organization_members WHERE organization_id = ?",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn deals(&self, organization_id: &str) -> Result<Vec<DealRecord>> {
        let deals = sqlx::query_as::<_, DealRecord>(
            "SELECT status, COALESCE(value, 0) AS value FROM deals WHERE organization_id = ?",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(deals)
    }
}
