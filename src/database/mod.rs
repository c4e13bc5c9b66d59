use async_trait::async_trait;
use tracing::info;

use crate::config::StoreConfig;
use crate::error::{OpsError, Result};

pub mod memory;
pub mod mongo;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use mongo::MongoUserStore;
pub use postgres::PgUserStore;

/// Result of a conditional update on the users store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Records whose username matched the filter
    pub matched: u64,
    /// Records actually changed by the write
    pub modified: u64,
}

/// Store holding user accounts, addressed by username
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Set both the email-verified and approved flags to true on the user
    /// whose username matches exactly. Nothing is written when no user matches.
    async fn mark_verified_and_approved(&self, username: &str) -> Result<UpdateOutcome>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;

    /// Release pooled connections
    async fn close(&self);
}

/// Backend kinds recognised from a connection URI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Postgres,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url.split("://").next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "mongodb" | "mongodb+srv" => Ok(StoreBackend::Mongo),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            _ => Err(OpsError::ConnectionFailed(format!(
                "unsupported database scheme in '{}'",
                crate::utils::redact_credentials(url)
            ))),
        }
    }
}

/// Open the store named by the connection URI in `config`
pub async fn connect_user_store(config: &StoreConfig) -> Result<Box<dyn UserStore>> {
    let backend = StoreBackend::from_url(&config.database_url)?;
    info!(target_db = %config.redacted_url(), ?backend, "Connecting to user store");

    let store: Box<dyn UserStore> = match backend {
        StoreBackend::Mongo => Box::new(
            MongoUserStore::connect(
                &config.database_url,
                &config.database_name,
                &config.users_collection,
            )
            .await?,
        ),
        StoreBackend::Postgres => Box::new(PgUserStore::connect(&config.database_url).await?),
    };

    Ok(store)
}
