pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ReportDefinition, ReportType, RunOutcome, SweepSummary};
pub use repositories::{InMemoryReportStore, MetricsRepository, ReportDefinitionRepository};
pub use services::{ReportMailer, ReportRunner, ReportScheduler};
