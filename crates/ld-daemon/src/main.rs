use ld_daemon::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with environment filter.
    // Use RUST_LOG env var to control log levels, defaulting to info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Lead Desk daemon starting");

    let config = Config::from_env();
    if config.database_url.is_none() {
        // Not fatal: submissions answer with a configuration error until the
        // connection string is provided, matching the system this replaces.
        error!("DATABASE_URL is not set; storage-backed endpoints will fail");
    }

    if let Err(e) = server::run(config).await {
        error!("Daemon exited with error: {:#}", e);
        std::process::exit(1);
    }

    info!("Lead Desk daemon stopped");
}
