use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::models::*;
use crate::pool::DbError;

// ============================================================
// Admin accounts
// ============================================================

pub async fn create_admin(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO admins (username, password_hash, created_at) VALUES (?, ?, ?)",
    )
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    debug!("Created admin account: {}", username);
    Ok(result.last_insert_rowid())
}

pub async fn get_admin_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<AdminAccount>, DbError> {
    let admin = sqlx::query_as::<_, AdminAccount>(
        "SELECT id, username, password_hash, created_at FROM admins WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

pub async fn get_admin_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<AdminAccount>, DbError> {
    let admin = sqlx::query_as::<_, AdminAccount>(
        "SELECT id, username, password_hash, created_at FROM admins WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(admin)
}

// ============================================================
// Consultation requests
// ============================================================

#[allow(clippy::too_many_arguments)]
pub async fn insert_consultation(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    practice_area: &str,
    preferred_date: &str,
    preferred_time: &str,
    message: Option<&str>,
) -> Result<i64, DbError> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO consultations \
         (name, email, phone, practice_area, preferred_date, preferred_time, message, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(practice_area)
    .bind(preferred_date)
    .bind(preferred_time)
    .bind(message)
    .bind(CONSULTATION_INITIAL_STATUS)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    debug!("Stored consultation request from: {}", email);
    Ok(result.last_insert_rowid())
}

pub async fn list_recent_consultations(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ConsultationRequest>, DbError> {
    let rows = sqlx::query_as::<_, ConsultationRequest>(
        "SELECT id, name, email, phone, practice_area, preferred_date, preferred_time, \
                message, status, created_at, updated_at \
         FROM consultations ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// ============================================================
// Contact messages
// ============================================================

pub async fn insert_contact(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    phone: &str,
    service: &str,
    message: &str,
) -> Result<i64, DbError> {
    let result = sqlx::query(
        "INSERT INTO contacts (name, email, phone, service, message, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(service)
    .bind(message)
    .bind(CONTACT_INITIAL_STATUS)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    debug!("Stored contact message from: {}", email);
    Ok(result.last_insert_rowid())
}

pub async fn list_recent_contacts(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ContactMessage>, DbError> {
    let rows = sqlx::query_as::<_, ContactMessage>(
        "SELECT id, name, email, phone, service, message, status, created_at \
         FROM contacts ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// ============================================================
// Tests
// ============================================================
