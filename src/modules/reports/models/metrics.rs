// Read models for metric aggregation
//
// These mirror the tenant store's rows closely; aggregators turn them into
// `ReportData`. Snapshot rows (organization, members, deals) are current
// state, the rest carry `created_at` and are queried by period.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::Currency;

/// Call status that counts as a completed call
pub const CALL_STATUS_ENDED: &str = "ended";
pub const CAMPAIGN_STATUS_ACTIVE: &str = "active";
pub const CAMPAIGN_STATUS_COMPLETED: &str = "completed";
pub const CAMPAIGN_ITEM_STATUS_COMPLETED: &str = "completed";
pub const DEAL_STATUS_WON: &str = "won";
pub const DEAL_STATUS_LOST: &str = "lost";

/// Current-state view of an organization's plan and balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrganizationSnapshot {
    pub id: String,
    pub name: String,
    pub plan_tier: String,
    /// AI employees (assistants) provisioned
    pub assistant_count: i64,
    /// Credits consumed in the current billing cycle
    pub credits_used: Decimal,
    /// Credits included with the plan
    pub credits_included: Decimal,
    pub credit_balance: Decimal,
    /// Money owed for usage beyond the included credits
    pub overage_balance: Decimal,
    /// Price of one overage credit
    pub overage_rate: Decimal,
    #[sqlx(try_from = "String")]
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CallRecord {
    pub status: String,
    pub duration_seconds: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CampaignRecord {
    pub id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CampaignItemRecord {
    pub campaign_id: String,
    pub contact_id: String,
    pub status: String,
}

/// Kind of credit ledger movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// Credits consumed by calls and assistants
    Usage,
    /// One-off credit purchase
    TopUp,
    /// Credits granted by the plan renewal
    Subscription,
    Refund,
    Adjustment,
}

impl LedgerEntryType {
    /// Entries that add credits to the balance in billing reports
    pub fn is_credit_addition(&self) -> bool {
        matches!(self, LedgerEntryType::TopUp | LedgerEntryType::Subscription)
    }
}

impl std::fmt::Display for LedgerEntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerEntryType::Usage => write!(f, "usage"),
            LedgerEntryType::TopUp => write!(f, "top_up"),
            LedgerEntryType::Subscription => write!(f, "subscription"),
            LedgerEntryType::Refund => write!(f, "refund"),
            LedgerEntryType::Adjustment => write!(f, "adjustment"),
        }
    }
}

impl std::str::FromStr for LedgerEntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usage" => Ok(LedgerEntryType::Usage),
            "top_up" => Ok(LedgerEntryType::TopUp),
            "subscription" => Ok(LedgerEntryType::Subscription),
            "refund" => Ok(LedgerEntryType::Refund),
            "adjustment" => Ok(LedgerEntryType::Adjustment),
            _ => Err(format!("Invalid ledger entry type: {}", s)),
        }
    }
}

impl TryFrom<String> for LedgerEntryType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    #[sqlx(try_from = "String")]
    pub entry_type: LedgerEntryType,
    /// Signed credit amount; usage rows may be stored negative
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MemberRecord {
    pub user_id: String,
    pub role: String,
}

impl MemberRecord {
    pub fn is_admin(&self) -> bool {
        matches!(self.role.as_str(), "admin" | "owner")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DealRecord {
    pub status: String,
    pub value: Decimal,
}
