//! Privacy-preserving persistence: turns a finished session into one append-only record.
//!
//! The state machine only sees `SessionPersistence`. `PrivacyAdapter` is the standard
//! implementation: it replaces email and phone with salted digests and hands the result
//! to a `RecordSink` (JSONL file or Postgres).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::models::CandidateRecord;
use crate::interview::question_set::QuestionSet;
use crate::session::transcript::Transcript;

pub mod jsonl;
pub mod postgres;
pub mod privacy;

use privacy::{hash_sensitive, HashedField};

/// The stored shape of a completed session. Contact details exist only as digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub record_id: Uuid,
    pub full_name: String,
    pub email: HashedField,
    pub phone: HashedField,
    pub years_experience: f64,
    pub desired_position: String,
    pub location: String,
    pub tech_stack: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub questions: QuestionSet,
    pub transcript: Transcript,
    pub persisted_at: DateTime<Utc>,
}

impl PersistedRecord {
    /// Builds a record with fresh salts and a fresh id.
    pub fn scrub(
        candidate: &CandidateRecord,
        questions: &QuestionSet,
        transcript: &Transcript,
    ) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            full_name: candidate.full_name.clone(),
            email: hash_sensitive(&candidate.email),
            phone: hash_sensitive(&candidate.phone),
            years_experience: candidate.years_experience,
            desired_position: candidate.desired_position.clone(),
            location: candidate.location.clone(),
            tech_stack: candidate.tech_stack.clone(),
            timestamp: candidate.created_at,
            questions: questions.clone(),
            transcript: transcript.clone(),
            persisted_at: Utc::now(),
        }
    }
}

/// Append-only storage for persisted records. Must tolerate concurrent writers.
#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    async fn append(&self, record: &PersistedRecord) -> Result<(), AppError>;
}

/// What the state machine calls once, at the end of a session.
#[async_trait]
pub trait SessionPersistence: Send + Sync {
    /// Stores the session and returns the new record id.
    async fn persist(
        &self,
        candidate: &CandidateRecord,
        questions: &QuestionSet,
        transcript: &Transcript,
    ) -> Result<Uuid, AppError>;
}

/// Scrubs sensitive fields, then writes through the configured sink.
pub struct PrivacyAdapter {
    sink: Arc<dyn RecordSink>,
}

impl PrivacyAdapter {
    pub fn new(sink: Arc<dyn RecordSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl SessionPersistence for PrivacyAdapter {
    async fn persist(
        &self,
        candidate: &CandidateRecord,
        questions: &QuestionSet,
        transcript: &Transcript,
    ) -> Result<Uuid, AppError> {
        let record = PersistedRecord::scrub(candidate, questions, transcript);
        self.sink.append(&record).await?;
        info!(
            "Persisted screening record {} via {} sink",
            record.record_id,
            self.sink.name()
        );
        Ok(record.record_id)
    }
}
