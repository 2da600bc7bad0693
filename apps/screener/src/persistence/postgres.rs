use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::db::create_pool;
use crate::errors::AppError;
use crate::persistence::{PersistedRecord, RecordSink};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS screening_records (
        id                  UUID PRIMARY KEY,
        full_name           TEXT NOT NULL,
        email_digest        TEXT NOT NULL,
        email_salt          TEXT NOT NULL,
        phone_digest        TEXT NOT NULL,
        phone_salt          TEXT NOT NULL,
        years_experience    DOUBLE PRECISION NOT NULL,
        desired_position    TEXT NOT NULL,
        location            TEXT NOT NULL,
        tech_stack          TEXT[] NOT NULL,
        candidate_timestamp TIMESTAMPTZ NOT NULL,
        questions           JSONB NOT NULL,
        transcript          JSONB NOT NULL,
        persisted_at        TIMESTAMPTZ NOT NULL
    )
"#;

/// Stores records in Postgres.
/// CRITICAL: append-only. Rows are INSERTed once and never UPDATEd or DELETEd.
pub struct PgRecordSink {
    pool: PgPool,
}

impl PgRecordSink {
    /// Connects and makes sure the table exists.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = create_pool(database_url).await?;
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        info!("screening_records table ready");
        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordSink for PgRecordSink {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn append(&self, record: &PersistedRecord) -> Result<(), AppError> {
        let questions = serde_json::to_value(&record.questions)?;
        let transcript = serde_json::to_value(&record.transcript)?;

        sqlx::query(
            r#"
            INSERT INTO screening_records
                (id, full_name, email_digest, email_salt, phone_digest, phone_salt,
                 years_experience, desired_position, location, tech_stack,
                 candidate_timestamp, questions, transcript, persisted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(record.record_id)
        .bind(&record.full_name)
        .bind(&record.email.digest)
        .bind(&record.email.salt)
        .bind(&record.phone.digest)
        .bind(&record.phone.salt)
        .bind(record.years_experience)
        .bind(&record.desired_position)
        .bind(&record.location)
        .bind(&record.tech_stack)
        .bind(record.timestamp)
        .bind(&questions)
        .bind(&transcript)
        .bind(record.persisted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
