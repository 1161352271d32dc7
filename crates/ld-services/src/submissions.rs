//! The submission pipeline: validate an inbound lead payload, persist it,
//! and list the newest records for the admin dashboard.
//!
//! Validation always runs to completion before any storage interaction, so a
//! payload with a bad field never touches the database.

use std::sync::Arc;

use chrono::Local;
use ld_core::validate::{self, ConsultationPayload, ContactPayload, ValidationFailure};
use ld_db::models::{ConsultationRequest, ContactMessage};
use ld_db::{queries, Database, DbError};
use thiserror::Error;
use tracing::info;

/// Fixed cap on admin listings; callers always see the newest records up to
/// this many. There is no pagination cursor.
pub const RECENT_LIMIT: i64 = 100;

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

pub struct SubmissionService {
    db: Arc<Database>,
}

impl SubmissionService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Validate and persist a consultation booking request.
    pub async fn submit_consultation(
        &self,
        payload: &ConsultationPayload,
    ) -> Result<i64, SubmissionError> {
        let today = Local::now().date_naive();
        let record = validate::validate_consultation(payload, today)?;

        let pool = self.db.pool().await?;
        let id = queries::insert_consultation(
            &pool,
            &record.name,
            &record.email,
            &record.phone,
            &record.practice_area,
            &record.preferred_date,
            &record.preferred_time,
            record.message.as_deref(),
        )
        .await?;

        info!("Consultation request stored (id: {id})");
        Ok(id)
    }

    /// Validate and persist a contact-form message.
    pub async fn submit_contact(&self, payload: &ContactPayload) -> Result<i64, SubmissionError> {
        let record = validate::validate_contact(payload)?;

        let pool = self.db.pool().await?;
        let id = queries::insert_contact(
            &pool,
            &record.name,
            &record.email,
            &record.phone,
            &record.service,
            &record.message,
        )
        .await?;

        info!("Contact message stored (id: {id})");
        Ok(id)
    }

    /// Newest consultation requests, capped at [`RECENT_LIMIT`].
    pub async fn list_consultations(&self) -> Result<Vec<ConsultationRequest>, SubmissionError> {
        let pool = self.db.pool().await?;
        Ok(queries::list_recent_consultations(&pool, RECENT_LIMIT).await?)
    }

    /// Newest contact messages, capped at [`RECENT_LIMIT`].
    pub async fn list_contacts(&self) -> Result<Vec<ContactMessage>, SubmissionError> {
        let pool = self.db.pool().await?;
        Ok(queries::list_recent_contacts(&pool, RECENT_LIMIT).await?)
    }
}
