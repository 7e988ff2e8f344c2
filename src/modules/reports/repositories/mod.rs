pub mod memory;
pub mod metrics_repository;
pub mod report_repository;

pub use memory::InMemoryReportStore;
pub use metrics_repository::{MetricsRepository, MySqlMetricsRepository};
pub use report_repository::{MySqlReportDefinitionRepository, ReportDefinitionRepository};
