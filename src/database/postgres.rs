use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{UpdateOutcome, UserStore};
use crate::error::Result;

/// Counts matching rows and flips the flags on rows that still need it, in one
/// statement. NULL flags count as not yet approved.
const APPROVE_USER_SQL: &str = r#"
WITH matched AS (
    SELECT username FROM users WHERE username = $1
),
modified AS (
    UPDATE users
    SET is_email_verified = TRUE, is_approved = TRUE
    WHERE username = $1
      AND NOT (COALESCE(is_email_verified, FALSE) AND COALESCE(is_approved, FALSE))
    RETURNING username
)
SELECT (SELECT COUNT(*) FROM matched) AS matched,
       (SELECT COUNT(*) FROM modified) AS modified
"#;

/// Relational users store on PostgreSQL (`users` table)
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        if !database_url.contains("sslmode=") {
            warn!("Database connection does not specify sslmode. Consider adding sslmode=require to connection string");
        }

        // One-shot tool: a single connection is all it ever uses
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;

        info!("PostgreSQL connection established");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn mark_verified_and_approved(&self, username: &str) -> Result<UpdateOutcome> {
        debug!(username = %username, "Updating users row");

        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(APPROVE_USER_SQL)
            .bind(username)
            .fetch_one(&self.pool)
            .await?;

        Ok(UpdateOutcome {
            matched: matched.max(0) as u64,
            modified: modified.max(0) as u64,
        })
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
