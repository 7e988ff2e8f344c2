pub mod metrics;
pub mod report_data;
pub mod report_definition;
pub mod run_outcome;

pub use metrics::{
    CallRecord, CampaignItemRecord, CampaignRecord, DealRecord, LedgerEntry, LedgerEntryType,
    MemberRecord, OrganizationSnapshot,
};
pub use report_data::{ReportData, ReportPeriod, ReportRow};
pub use report_definition::{
    Frequency, ReportDefinition, ReportDefinitionRecord, ReportType, Schedule,
};
pub use run_outcome::{FailureReason, RunOutcome, SweepSummary};
