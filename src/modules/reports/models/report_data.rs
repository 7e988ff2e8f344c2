use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reporting window for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Human-readable window, e.g. "Oct 9 – Oct 16, 2026"
    pub label: String,
}

/// One `(label, value)` pair of a rendered report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

/// Normalized, renderer-agnostic metrics for one report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    pub title: String,
    /// Category-specific order, preserved by the renderer
    pub rows: Vec<ReportRow>,
}

impl ReportData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row, keeping insertion order
    pub fn row(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.rows.push(ReportRow {
            label: label.into(),
            value: value.to_string(),
        });
        self
    }

    /// Look up a row value by label
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }
}
