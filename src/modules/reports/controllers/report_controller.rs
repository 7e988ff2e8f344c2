use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::reports::models::{FailureReason, RunOutcome, SweepSummary};
use crate::modules::reports::services::{ReportRunner, RunRequest, RunResult};

/// Body of `POST /reports/run`; absent or `{}` means a scheduled sweep
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportsRequest {
    #[serde(default)]
    pub report_id: Option<String>,
}

impl RunReportsRequest {
    /// Parse a possibly empty request body
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(body)?)
    }

    pub fn into_run_request(self) -> Result<RunRequest, AppError> {
        match self.report_id {
            None => Ok(RunRequest::Sweep),
            Some(id) if id.trim().is_empty() => {
                Err(AppError::validation("reportId must not be empty"))
            }
            Some(id) => Ok(RunRequest::OnDemand {
                report_id: id.trim().to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnDemandRunResponse {
    pub success: bool,
    pub report_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl From<RunOutcome> for OnDemandRunResponse {
    fn from(outcome: RunOutcome) -> Self {
        Self {
            success: outcome.success,
            report_id: outcome.report_id,
            failure: outcome.failure,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SweepRunResponse {
    pub success: bool,
    pub processed: usize,
    pub failed: usize,
    pub total: usize,
}

impl From<SweepSummary> for SweepRunResponse {
    fn from(summary: SweepSummary) -> Self {
        // The sweep itself completed; per-report failures are counted, not raised
        Self {
            success: true,
            processed: summary.processed,
            failed: summary.failed,
            total: summary.total,
        }
    }
}

/// Run reports
/// POST /reports/run
///
/// `{"reportId": "..."}` processes that definition immediately, skipping the
/// due check. Any other body (or none) sweeps all due definitions.
pub async fn run_reports(
    runner: web::Data<Arc<ReportRunner>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let request = RunReportsRequest::from_body(&body)?.into_run_request()?;

    let response = match runner.run(request).await? {
        RunResult::Single(outcome) => HttpResponse::Ok().json(OnDemandRunResponse::from(outcome)),
        RunResult::Sweep(summary) => HttpResponse::Ok().json(SweepRunResponse::from(summary)),
    };

    Ok(response)
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/run", web::post().to(run_reports)));
}
