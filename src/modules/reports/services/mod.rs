pub mod aggregators;
pub mod mailer;
pub mod period_calculator;
pub mod recurrence;
pub mod renderer;
pub mod report_runner;
pub mod scheduler;

pub use aggregators::aggregate;
pub use mailer::{DeliveryStatus, ReportMailer, ResendMailer};
pub use period_calculator::period_for;
pub use recurrence::is_due;
pub use renderer::render;
pub use report_runner::{ReportRunner, RunRequest, RunResult};
pub use scheduler::ReportScheduler;
