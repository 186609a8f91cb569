//! MySQL implementation of the OtpRepository trait.
//!
//! Records live in `otp_records`. While a record is unconsumed its
//! `active_slot` column holds `<purpose>:<email>`; the unique index on that
//! column turns issuance into one `INSERT ... ON DUPLICATE KEY UPDATE`, so two
//! unconsumed records for the same pair can never coexist. Consumption clears
//! the slot in the same conditional `UPDATE` that flips `consumed`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use om_core::domain::entities::{OtpRecord, Purpose};
use om_core::errors::DomainError;
use om_core::repositories::{OtpFilter, OtpRepository};
use om_shared::validation::mask_email;

const SELECT_COLUMNS: &str =
    "SELECT id, email, code, purpose, created_at, expires_at, consumed, consumed_at FROM otp_records";

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL passcode repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Value of `active_slot` for an unconsumed record
    pub fn active_slot(email: &str, purpose: Purpose) -> String {
        format!("{}:{}", purpose.as_str(), email)
    }

    /// Convert database row to OtpRecord entity
    fn row_to_record(row: &MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let purpose: String = row.try_get("purpose").map_err(column_error("purpose"))?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid OTP record UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(column_error("email"))?,
            code: row.try_get("code").map_err(column_error("code"))?,
            purpose: purpose.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid purpose stored for OTP record {}: {}", id, e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(column_error("expires_at"))?,
            consumed: row.try_get("consumed").map_err(column_error("consumed"))?,
            consumed_at: row
                .try_get::<Option<DateTime<Utc>>, _>("consumed_at")
                .map_err(column_error("consumed_at"))?,
        })
    }

    /// Append `WHERE` conditions for every set filter field
    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &OtpFilter) {
        builder.push(" WHERE 1 = 1");

        if let Some(email) = &filter.email {
            builder.push(" AND email = ").push_bind(email.clone());
        }
        if let Some(purpose) = filter.purpose {
            builder.push(" AND purpose = ").push_bind(purpose.as_str());
        }
        if let Some(code) = &filter.code {
            builder.push(" AND code = ").push_bind(code.clone());
        }
        if let Some(consumed) = filter.consumed {
            builder.push(" AND consumed = ").push_bind(consumed);
        }
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn store_error(action: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Failed to {}", action);
    DomainError::Store {
        message: format!("Failed to {}: {}", action, e),
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn upsert_active(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO otp_records (
                id, email, code, purpose, created_at, expires_at,
                consumed, consumed_at, active_slot
            ) VALUES (?, ?, ?, ?, ?, ?, FALSE, NULL, ?)
            ON DUPLICATE KEY UPDATE
                id = VALUES(id),
                code = VALUES(code),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at),
                consumed = FALSE,
                consumed_at = NULL
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.purpose.as_str())
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(Self::active_slot(&record.email, record.purpose))
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("store OTP record", e))?;

        tracing::debug!(
            email = %mask_email(&record.email),
            purpose = %record.purpose,
            otp_id = %record.id,
            "Stored OTP record"
        );

        Ok(record)
    }

    async fn find(
        &self,
        filter: &OtpFilter,
        limit: Option<u32>,
    ) -> Result<Vec<OtpRecord>, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        Self::push_filter(&mut builder, filter);
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("find OTP records", e))?;

        rows.iter().map(Self::row_to_record).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!("{} WHERE id = ?", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("find OTP record by id", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn mark_consumed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE otp_records
            SET consumed = TRUE, consumed_at = ?, active_slot = NULL
            WHERE id = ? AND consumed = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(at)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("consume OTP record", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, filter: &OtpFilter) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::<MySql>::new("DELETE FROM otp_records");
        Self::push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("delete OTP records", e))?;

        Ok(result.rows_affected())
    }
}
