use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::reports::models::{
    FailureReason, ReportDefinition, ReportDefinitionRecord, RunOutcome, Schedule, SweepSummary,
};
use crate::modules::reports::repositories::{MetricsRepository, ReportDefinitionRepository};

use super::aggregators::aggregate;
use super::mailer::{DeliveryStatus, ReportMailer};
use super::period_calculator::period_for;
use super::recurrence::is_due;
use super::renderer::render;

/// Shown in place of the organization name when the snapshot row is missing
pub const DEFAULT_ORGANIZATION_NAME: &str = "Your organization";

/// What the caller asked the runner to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunRequest {
    /// Evaluate every active definition
    Sweep,
    /// Process one definition, due or not, active or not
    OnDemand { report_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    Single(RunOutcome),
    Sweep(SweepSummary),
}

/// Drives definitions through period → aggregate → render → dispatch
///
/// Due definitions are processed one at a time; the mail transport's rate
/// limit is the shared resource. `last_sent_at` is written only after the
/// mailer reports `Delivered`, so a failed run stays due and the next sweep
/// retries it.
pub struct ReportRunner {
    definitions: Arc<dyn ReportDefinitionRepository>,
    metrics: Arc<dyn MetricsRepository>,
    mailer: Arc<dyn ReportMailer>,
}

impl ReportRunner {
    pub fn new(
        definitions: Arc<dyn ReportDefinitionRepository>,
        metrics: Arc<dyn MetricsRepository>,
        mailer: Arc<dyn ReportMailer>,
    ) -> Self {
        Self {
            definitions,
            metrics,
            mailer,
        }
    }

    /// Handle a request at the current time
    pub async fn run(&self, request: RunRequest) -> Result<RunResult> {
        let now = Utc::now();
        match request {
            RunRequest::Sweep => self.run_sweep(now).await.map(RunResult::Sweep),
            RunRequest::OnDemand { report_id } => self
                .run_on_demand(&report_id, now)
                .await
                .map(RunResult::Single),
        }
    }

    /// Process a single definition, bypassing the due check
    ///
    /// # Errors
    /// `NotFound` when the ID does not resolve; store errors from the lookup
    /// itself. Processing failures are reported in the outcome instead.
    pub async fn run_on_demand(&self, report_id: &str, now: DateTime<Utc>) -> Result<RunOutcome> {
        let record = self
            .definitions
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Report definition '{}'", report_id)))?;

        info!(report_id = %report_id, "Processing report on demand");

        Ok(self.process(record, now).await)
    }

    /// Evaluate all active definitions and process the due ones in order
    ///
    /// # Errors
    /// Only when the active definitions cannot be listed. Per-definition
    /// failures are counted in the summary.
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> Result<SweepSummary> {
        let run_id = Uuid::new_v4();
        let active = self.definitions.list_active().await?;
        let active_count = active.len();

        let due: Vec<ReportDefinitionRecord> = active
            .into_iter()
            .filter(|record| is_due(&Schedule::from_record(record), now))
            .collect();

        info!(
            run_id = %run_id,
            active = active_count,
            due = due.len(),
            "Starting scheduled report sweep"
        );

        let mut summary = SweepSummary {
            total: due.len(),
            ..Default::default()
        };

        for record in due {
            let outcome = self.process(record, now).await;
            summary.record(outcome);
        }

        info!(
            run_id = %run_id,
            processed = summary.processed,
            failed = summary.failed,
            total = summary.total,
            "Scheduled report sweep finished"
        );

        Ok(summary)
    }

    async fn process(&self, record: ReportDefinitionRecord, now: DateTime<Utc>) -> RunOutcome {
        let report_id = record.id.clone();

        match ReportDefinition::try_from(record) {
            Ok(definition) => self.process_definition(&definition, now).await,
            Err(e) => {
                error!(report_id = %report_id, error = %e, "Cannot process report definition");
                RunOutcome::failed(report_id, FailureReason::UnknownReportType)
            }
        }
    }

    async fn process_definition(&self, definition: &ReportDefinition, now: DateTime<Utc>) -> RunOutcome {
        let report_id = definition.id.as_str();

        if definition.recipients.is_empty() {
            warn!(report_id = %report_id, "Report has no recipients, skipping");
            return RunOutcome::failed(report_id, FailureReason::NoRecipients);
        }

        let period = period_for(definition.schedule.frequency, now);

        let organization_name = match self.metrics.organization(&definition.organization_id).await {
            Ok(Some(org)) => org.name,
            Ok(None) => DEFAULT_ORGANIZATION_NAME.to_string(),
            Err(e) => {
                error!(report_id = %report_id, error = %e, "Failed to load organization");
                return RunOutcome::failed(report_id, FailureReason::AggregationFailed);
            }
        };

        let data = match aggregate(
            definition.report_type,
            self.metrics.as_ref(),
            &definition.organization_id,
            period.start,
            period.end,
        )
        .await
        {
            Ok(data) => data,
            Err(e) => {
                error!(
                    report_id = %report_id,
                    report_type = %definition.report_type,
                    error = %e,
                    "Report aggregation failed"
                );
                return RunOutcome::failed(report_id, FailureReason::AggregationFailed);
            }
        };

        let html = render(&data, &organization_name, &period.label);
        let subject = format!("{} for {} ({})", data.title, organization_name, period.label);

        match self.mailer.send(&definition.recipients, &subject, &html).await {
            DeliveryStatus::Delivered => {}
            DeliveryStatus::NotConfigured => {
                return RunOutcome::failed(report_id, FailureReason::NotConfigured);
            }
            DeliveryStatus::Rejected => {
                warn!(
                    report_id = %report_id,
                    transport = self.mailer.name(),
                    "Report not delivered, will retry on next sweep"
                );
                return RunOutcome::failed(report_id, FailureReason::DeliveryFailed);
            }
        }

        if let Err(e) = self.definitions.mark_sent(report_id, now).await {
            error!(
                report_id = %report_id,
                error = %e,
                "Report delivered but last_sent_at was not updated"
            );
            return RunOutcome::failed(report_id, FailureReason::StateUpdateFailed);
        }

        info!(
            report_id = %report_id,
            report_type = %definition.report_type,
            recipients = definition.recipients.len(),
            period = %period.label,
            "Report sent"
        );

        RunOutcome::succeeded(report_id)
    }
}
