//! Out-of-band admin provisioning.
//!
//! Creates the initial admin account from `ADMIN_USERNAME` / `ADMIN_PASSWORD`
//! (username defaults to `admin`; the password is randomly generated and
//! printed when unset). Idempotent: exits cleanly if the account exists.

use anyhow::{Context, Result};
use ld_core::password;
use ld_db::{queries, Database};
use rand::Rng;

fn generate_password(length: usize) -> String {
    let charset: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;

    let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    let (plaintext, generated) = match std::env::var("ADMIN_PASSWORD") {
        Ok(p) if !p.is_empty() => (p, false),
        _ => (generate_password(24), true),
    };

    let db = Database::new(Some(url));
    let pool = db.pool().await.context("Failed to connect to database")?;

    if queries::get_admin_by_username(&pool, &username)
        .await?
        .is_some()
    {
        println!("Admin user already exists: {username}");
        return Ok(());
    }

    let hash = password::hash_password(&plaintext).context("Failed to hash password")?;
    queries::create_admin(&pool, &username, &hash).await?;

    println!("Admin user created successfully!");
    println!("Username: {username}");
    if generated {
        println!("Password: {plaintext}");
        println!("(randomly generated; store it somewhere safe)");
    }

    Ok(())
}
