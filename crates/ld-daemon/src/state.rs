use std::sync::Arc;

use ld_db::Database;
use ld_services::auth::AuthService;
use ld_services::submissions::SubmissionService;

use crate::config::Config;

/// Shared state handed to every request handler. The [`Database`] inside the
/// services is the process-wide lazily-connected pool handle.
pub struct AppState {
    pub submissions: SubmissionService,
    pub auth: AuthService,
    /// Production mode: Secure cookies, no diagnostic detail in 500 bodies.
    pub production: bool,
}

impl AppState {
    pub fn from_config(config: &Config) -> Arc<Self> {
        let db = Arc::new(Database::new(config.database_url.clone()));
        Arc::new(Self {
            submissions: SubmissionService::new(db.clone()),
            auth: AuthService::new(db),
            production: config.production,
        })
    }
}
