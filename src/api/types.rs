//! Shared state for the HTTP layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::analysis::HealthAnalyzer;
use crate::db::{self, DatabaseError};

/// Shared context for all API routes and middleware.
///
/// Cheap to clone. Each request opens its own database connection, so
/// handlers never contend on a shared one.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: HealthAnalyzer,
    database_path: Arc<PathBuf>,
    gateway_configured: bool,
}

impl ApiContext {
    pub fn new(analyzer: HealthAnalyzer, database_path: PathBuf, gateway_configured: bool) -> Self {
        Self {
            analyzer,
            database_path: Arc::new(database_path),
            gateway_configured,
        }
    }

    /// Open a connection to the service database.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.database_path)
    }

    pub fn gateway_configured(&self) -> bool {
        self.gateway_configured
    }
}
