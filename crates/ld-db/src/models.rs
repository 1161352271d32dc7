use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Admin account, provisioned once by the `create-admin` binary and never
/// updated by the pipeline. The password hash stays out of every response.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A consultation booking request. Immutable after creation; `status` starts
/// at "pending" and no endpoint in this pipeline transitions it.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub practice_area: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A contact-form message. `status` starts at "new".
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Initial status for a freshly stored consultation request.
pub const CONSULTATION_INITIAL_STATUS: &str = "pending";

/// Initial status for a freshly stored contact message.
pub const CONTACT_INITIAL_STATUS: &str = "new";
