//! Reportflow scheduled report engine
//!
//! Evaluates recurring report definitions, aggregates per-organization
//! metrics for the matching period, renders them as HTML email and hands
//! them to the mail transport.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::reports;
