use crate::config::Config;
use crate::db::sqlite::ConfigStorage;
use crate::error::ConfkeepError;
use tracing::{info, warn};

/// Start/close hooks for a process-lifetime service.
pub(crate) trait ServiceLifecycle {
    /// Name the service is published under in the router state.
    const NAME: &'static str;

    async fn start(&self) -> Result<(), ConfkeepError>;

    async fn close(&self);
}

impl ServiceLifecycle for ConfigStorage {
    const NAME: &'static str = "db";

    async fn start(&self) -> Result<(), ConfkeepError> {
        self.init_schema().await
    }

    async fn close(&self) {
        ConfigStorage::close(self).await;
    }
}

/// Every service the process owns. Built once at startup and closed once at
/// shutdown.
#[derive(Clone)]
pub struct Services {
    pub db: ConfigStorage,
}

impl Services {
    /// Construct each service and run its start hook.
    pub async fn start(cfg: &Config) -> Result<Self, ConfkeepError> {
        let db = ConfigStorage::connect(&cfg.database_url).await?;
        Self::start_with(db).await
    }

    /// Start around an already opened store.
    pub async fn start_with(db: ConfigStorage) -> Result<Self, ConfkeepError> {
        if let Err(e) = ServiceLifecycle::start(&db).await {
            warn!(service = ConfigStorage::NAME, error = %e, "service failed to start");
            ServiceLifecycle::close(&db).await;
            return Err(e);
        }
        info!(service = ConfigStorage::NAME, "service started");
        Ok(Self { db })
    }

    pub async fn close(&self) {
        ServiceLifecycle::close(&self.db).await;
        info!(service = ConfigStorage::NAME, "service closed");
    }
}
