// Scheduled report definitions
//
// Definitions are created and edited outside this service. Rows come out of
// the store as `ReportDefinitionRecord` (string columns exactly as persisted)
// and are narrowed into the closed enums here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::AppError;

pub const DEFAULT_DAY_OF_WEEK: u32 = 1; // Monday
pub const DEFAULT_DAY_OF_MONTH: u32 = 1;

/// Report category, one aggregator per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Usage,
    Calls,
    Campaigns,
    Billing,
    Team,
    Deals,
}

impl ReportType {
    pub const ALL: [ReportType; 6] = [
        ReportType::Usage,
        ReportType::Calls,
        ReportType::Campaigns,
        ReportType::Billing,
        ReportType::Team,
        ReportType::Deals,
    ];

    /// Display name used as the report title
    pub fn title(&self) -> &'static str {
        match self {
            ReportType::Usage => "Usage Summary",
            ReportType::Calls => "Call Activity",
            ReportType::Campaigns => "Campaign Performance",
            ReportType::Billing => "Billing Summary",
            ReportType::Team => "Team Activity",
            ReportType::Deals => "Deal Pipeline",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportType::Usage => write!(f, "usage"),
            ReportType::Calls => write!(f, "calls"),
            ReportType::Campaigns => write!(f, "campaigns"),
            ReportType::Billing => write!(f, "billing"),
            ReportType::Team => write!(f, "team"),
            ReportType::Deals => write!(f, "deals"),
        }
    }
}

impl std::str::FromStr for ReportType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usage" => Ok(ReportType::Usage),
            "calls" => Ok(ReportType::Calls),
            "campaigns" => Ok(ReportType::Campaigns),
            "billing" => Ok(ReportType::Billing),
            "team" => Ok(ReportType::Team),
            "deals" => Ok(ReportType::Deals),
            other => Err(AppError::UnknownReportType(other.to_string())),
        }
    }
}

/// Recurrence of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(format!("Invalid frequency: {}", s)),
        }
    }
}

/// Report definition row as stored, before any narrowing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinitionRecord {
    pub id: String,
    pub organization_id: String,
    pub report_type: String,
    pub frequency: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: Option<u32>,
    pub day_of_month: Option<u32>,
    pub recipients: Vec<String>,
    pub is_active: bool,
    pub last_sent_at: Option<DateTime<Utc>>,
}

/// The recurrence-relevant slice of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// `None` when the stored frequency is not recognized
    pub frequency: Option<Frequency>,
    pub day_of_week: u32,
    pub day_of_month: u32,
    pub last_sent_at: Option<DateTime<Utc>>,
}

impl Schedule {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency: Some(frequency),
            day_of_week: DEFAULT_DAY_OF_WEEK,
            day_of_month: DEFAULT_DAY_OF_MONTH,
            last_sent_at: None,
        }
    }

    pub fn from_record(record: &ReportDefinitionRecord) -> Self {
        Self {
            frequency: record.frequency.parse().ok(),
            day_of_week: record.day_of_week.unwrap_or(DEFAULT_DAY_OF_WEEK),
            day_of_month: record.day_of_month.unwrap_or(DEFAULT_DAY_OF_MONTH),
            last_sent_at: record.last_sent_at,
        }
    }
}

/// A definition whose report type has been validated
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDefinition {
    pub id: String,
    pub organization_id: String,
    pub report_type: ReportType,
    pub schedule: Schedule,
    pub recipients: Vec<String>,
    pub is_active: bool,
}

impl TryFrom<ReportDefinitionRecord> for ReportDefinition {
    type Error = AppError;

    fn try_from(record: ReportDefinitionRecord) -> Result<Self, Self::Error> {
        let report_type = record.report_type.parse()?;
        let schedule = Schedule::from_record(&record);

        Ok(Self {
            id: record.id,
            organization_id: record.organization_id,
            report_type,
            schedule,
            recipients: record
                .recipients
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            is_active: record.is_active,
        })
    }
}
