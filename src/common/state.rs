use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared handler state. `db` is a connection pool; every statement borrows
/// a connection for its own duration.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
