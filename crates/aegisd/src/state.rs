//! Shared application state for the server.

use std::sync::Arc;

use aegis_core::SubmissionStore;

use crate::config::Config;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<SubmissionStore>,
    /// Configuration
    pub config: Arc<Config>,
    /// Start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Open the store at the configured path.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = SubmissionStore::new(&config.database_path)?;
        Ok(Self::with_store(store, config))
    }

    /// State over an in-memory store, for tests and ephemeral runs.
    pub fn in_memory(config: Config) -> anyhow::Result<Self> {
        let store = SubmissionStore::in_memory()?;
        Ok(Self::with_store(store, config))
    }

    fn with_store(store: SubmissionStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
            started_at: chrono::Utc::now(),
        }
    }

    /// Server uptime in seconds.
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}
