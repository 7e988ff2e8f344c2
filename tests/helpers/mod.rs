// Shared fixtures for unit, integration and contract tests
//
// Include from a test crate with:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//
// Everything runs against InMemoryReportStore; no database or mail
// transport is needed.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use reportflow::core::{AppError, Currency, Result};
use reportflow::reports::models::{
    CallRecord, CampaignItemRecord, CampaignRecord, DealRecord, LedgerEntry, MemberRecord,
    OrganizationSnapshot, ReportDefinitionRecord,
};
use reportflow::reports::repositories::{
    InMemoryReportStore, MetricsRepository, ReportDefinitionRepository,
};
use reportflow::reports::services::{DeliveryStatus, ReportMailer, ReportRunner};

/// Monday 2026-10-19 09:00 UTC
pub fn monday() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
}

/// Active daily definition for `org-acme` with one recipient
pub fn definition(id: &str, report_type: &str) -> ReportDefinitionRecord {
    ReportDefinitionRecord {
        id: id.to_string(),
        organization_id: "org-acme".to_string(),
        report_type: report_type.to_string(),
        frequency: "daily".to_string(),
        recipients: vec!["ops@acme.io".to_string()],
        is_active: true,
        ..Default::default()
    }
}

pub fn acme() -> OrganizationSnapshot {
    OrganizationSnapshot {
        id: "org-acme".to_string(),
        name: "Acme".to_string(),
        plan_tier: "growth".to_string(),
        assistant_count: 3,
        credits_used: Decimal::from(750),
        credits_included: Decimal::from(1000),
        credit_balance: Decimal::from(250),
        overage_balance: Decimal::ZERO,
        overage_rate: Decimal::new(10, 2),
        currency: Currency::USD,
    }
}

/// Store seeded with the Acme organization
pub async fn acme_store() -> Arc<InMemoryReportStore> {
    let store = Arc::new(InMemoryReportStore::new());
    store.insert_organization(acme()).await;
    store
}

pub async fn insert_call(
    store: &InMemoryReportStore,
    status: &str,
    duration_seconds: i64,
    created_at: DateTime<Utc>,
) {
    store
        .insert_call(
            "org-acme",
            CallRecord {
                status: status.to_string(),
                duration_seconds: Some(duration_seconds),
                created_at,
            },
        )
        .await;
}

/// One recorded `send` call
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Mailer returning a fixed status and recording every attempt
pub struct ScriptedMailer {
    status: DeliveryStatus,
    sent: Mutex<Vec<SentEmail>>,
}

impl ScriptedMailer {
    pub fn new(status: DeliveryStatus) -> Arc<Self> {
        Arc::new(Self {
            status,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn delivering() -> Arc<Self> {
        Self::new(DeliveryStatus::Delivered)
    }

    pub fn rejecting() -> Arc<Self> {
        Self::new(DeliveryStatus::Rejected)
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ReportMailer for ScriptedMailer {
    async fn send(&self, recipients: &[String], subject: &str, html: &str) -> DeliveryStatus {
        self.sent.lock().await.push(SentEmail {
            recipients: recipients.to_vec(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        self.status
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Metrics store that fails every query for one organization
pub struct UnreachableFor {
    inner: Arc<InMemoryReportStore>,
    organization_id: String,
}

impl UnreachableFor {
    pub fn new(inner: Arc<InMemoryReportStore>, organization_id: &str) -> Arc<Self> {
        Arc::new(Self {
            inner,
            organization_id: organization_id.to_string(),
        })
    }

    fn check(&self, organization_id: &str) -> Result<()> {
        if organization_id == self.organization_id {
            return Err(AppError::internal("metrics store unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MetricsRepository for UnreachableFor {
    async fn organization(&self, organization_id: &str) -> Result<Option<OrganizationSnapshot>> {
        self.check(organization_id)?;
        self.inner.organization(organization_id).await
    }

    async fn calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CallRecord>> {
        self.check(organization_id)?;
        self.inner.calls(organization_id, start, end).await
    }

    async fn count_calls(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        self.check(organization_id)?;
        self.inner.count_calls(organization_id, start, end).await
    }

    async fn campaigns(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CampaignRecord>> {
        self.check(organization_id)?;
        self.inner.campaigns(organization_id, start, end).await
    }

    async fn completed_campaign_items(
        &self,
        campaign_ids: &[String],
    ) -> Result<Vec<CampaignItemRecord>> {
        self.inner.completed_campaign_items(campaign_ids).await
    }

    async fn ledger_entries(
        &self,
        organization_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LedgerEntry>> {
        self.check(organization_id)?;
        self.inner.ledger_entries(organization_id, start, end).await
    }

    async fn members(&self, organization_id: &str) -> Result<Vec<MemberRecord>> {
        self.check(organization_id)?;
        self.inner.members(organization_id).await
    }

    async fn deals(&self, organization_id: &str) -> Result<Vec<DealRecord>> {
        self.check(organization_id)?;
        self.inner.deals(organization_id).await
    }
}

/// Definition store whose listing or `mark_sent` write can be made to fail
pub struct BrokenDefinitions {
    inner: Arc<InMemoryReportStore>,
    fail_listing: bool,
    fail_writes: bool,
}

impl BrokenDefinitions {
    pub fn listing(inner: Arc<InMemoryReportStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_listing: true,
            fail_writes: false,
        })
    }

    pub fn writes(inner: Arc<InMemoryReportStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            fail_listing: false,
            fail_writes: true,
        })
    }
}

#[async_trait]
impl ReportDefinitionRepository for BrokenDefinitions {
    async fn list_active(&self) -> Result<Vec<ReportDefinitionRecord>> {
        if self.fail_listing {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.list_active().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ReportDefinitionRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn mark_sent(&self, id: &str, sent_at: DateTime<Utc>) -> Result<()> {
        if self.fail_writes {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.mark_sent(id, sent_at).await
    }
}

/// Runner over one in-memory store for both seams
pub fn runner(store: Arc<InMemoryReportStore>, mailer: Arc<ScriptedMailer>) -> ReportRunner {
    ReportRunner::new(store.clone(), store, mailer)
}
