//! Database client - executes single statements
//!
//! The engine only ever needs "run this one statement and tell me whether it
//! worked", so that is the whole trait. The production implementation wraps
//! a sqlx MySQL pool; the connection is established at construction time and
//! a failure there is fatal, never deferred to `apply`.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::config::ConnectionConfig;
use crate::error::{InstallerError, InstallerResult};

/// Executes a single statement against the target database
#[async_trait]
pub trait DatabaseClient {
    async fn execute(&self, statement: &str) -> InstallerResult<()>;
}

/// Client backed by a sqlx MySQL connection pool
pub struct SqlxClient {
    pool: MySqlPool,
    debug: bool,
}

impl SqlxClient {
    /// Connect using the given settings. Fails fast if the database is
    /// unreachable.
    pub async fn connect(config: &ConnectionConfig) -> InstallerResult<Self> {
        let pool = MySqlPool::connect_with(config.connect_options())
            .await
            .map_err(|e| InstallerError::connection(format!("failed to connect: {}", e)))?;

        Ok(Self {
            pool,
            debug: config.debug,
        })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool, debug: false }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseClient for SqlxClient {
    async fn execute(&self, statement: &str) -> InstallerResult<()> {
        if self.debug {
            tracing::debug!(statement, "executing statement");
        }

        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .map_err(|e| InstallerError::statement(e.to_string()))?;

        Ok(())
    }
}
