use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::reports::models::ReportDefinitionRecord;

/// Access to stored report definitions
///
/// The only write this service performs is `mark_sent`.
#[async_trait]
pub trait ReportDefinitionRepository: Send + Sync {
    /// All definitions with `is_active = true`
    async fn list_active(&self) -> Result<Vec<ReportDefinitionRecord>>;

    /// Find a definition by ID regardless of its active flag
    async fn find_by_id(&self, id: &str) -> Result<Option<ReportDefinitionRecord>>;

    /// Record a confirmed delivery
    async fn mark_sent(&self, id: &str, sent_at: DateTime<Utc>) -> Result<()>;
}

/// Raw `scheduled_reports` row
#[derive(Debug, FromRow)]
struct DefinitionRow {
    id: String,
    organization_id: String,
    report_type: String,
    frequency: String,
    day_of_week: Option<i32>,
    day_of_month: Option<i32>,
    /// JSON array of addresses
    recipients: Option<String>,
    is_active: bool,
    last_sent_at: Option<DateTime<Utc>>,
}

impl DefinitionRow {
    fn into_record(self) -> ReportDefinitionRecord {
        let recipients = match self.recipients.as_deref() {
            None | Some("") => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<String>>(raw).unwrap_or_else(|e| {
                warn!(
                    report_id = %self.id,
                    error = %e,
                    "Malformed recipients column, treating as empty"
                );
                Vec::new()
            }),
        };

        ReportDefinitionRecord {
            day_of_week: self.day_of_week.and_then(|d| u32::try_from(d).ok()),
            day_of_month: self.day_of_month.and_then(|d| u32::try_from(d).ok()),
            id: self.id,
            organization_id: self.organization_id,
            report_type: self.report_type,
            frequency: self.frequency,
            recipients,
            is_active: self.is_active,
            last_sent_at: self.last_sent_at,
        }
    }
}

const DEFINITION_COLUMNS: &str = r#"
    id, organization_id, report_type, frequency, day_of_week, day_of_month,
    CAST(recipients AS CHAR) AS recipients, is_active, last_sent_at
"#;

pub struct MySqlReportDefinitionRepository {
    pool: MySqlPool,
}

impl MySqlReportDefinitionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportDefinitionRepository for MySqlReportDefinitionRepository {
    async fn list_active(&self) -> Result<Vec<ReportDefinitionRecord>> {
        let sql = format!(
            "SELECT {} FROM scheduled_reports WHERE is_active = TRUE ORDER BY id",
            DEFINITION_COLUMNS
        );

        let rows = sqlx::query_as::<_, DefinitionRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(DefinitionRow::into_record).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ReportDefinitionRecord>> {
        let sql = format!("SELECT {} FROM scheduled_reports WHERE id = ?", DEFINITION_COLUMNS);

        let row = sqlx::query_as::<_, DefinitionRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(DefinitionRow::into_record))
    }

    async fn mark_sent(&self, id: &str, sent_at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query("UPDATE scheduled_reports SET last_sent_at = ? WHERE id = ?")
            .bind(sent_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Report definition '{}'", id)));
        }

        Ok(())
    }
}
