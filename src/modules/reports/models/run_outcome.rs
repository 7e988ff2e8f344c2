use serde::{Deserialize, Serialize};

/// Why a single definition's run did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No transport credential configured
    NotConfigured,
    NoRecipients,
    UnknownReportType,
    AggregationFailed,
    /// Transport rejected the message or the request failed
    DeliveryFailed,
    /// Delivered, but `last_sent_at` could not be written
    StateUpdateFailed,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::NotConfigured => write!(f, "delivery not configured"),
            FailureReason::NoRecipients => write!(f, "no recipients"),
            FailureReason::UnknownReportType => write!(f, "unknown report type"),
            FailureReason::AggregationFailed => write!(f, "aggregation failed"),
            FailureReason::DeliveryFailed => write!(f, "delivery failed"),
            FailureReason::StateUpdateFailed => write!(f, "state update failed"),
        }
    }
}

/// Result of processing one definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub report_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
}

impl RunOutcome {
    pub fn succeeded(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            success: true,
            failure: None,
        }
    }

    pub fn failed(report_id: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            report_id: report_id.into(),
            success: false,
            failure: Some(reason),
        }
    }
}

/// Aggregate counts for one scheduled sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub processed: usize,
    pub failed: usize,
    /// Number of due definitions, not of all active ones
    pub total: usize,
    #[serde(skip)]
    pub outcomes: Vec<RunOutcome>,
}

impl SweepSummary {
    pub fn record(&mut self, outcome: RunOutcome) {
        if outcome.success {
            self.processed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }
}
