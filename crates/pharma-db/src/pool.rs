//! # Order Store Connection
//!
//! Opens the SQLite order store, brings its schema up to date, and hands out
//! repositories.
//!
//! ```text
//! DbConfig::new("./pharma.db")   file store, WAL, pool of N connections
//! DbConfig::in_memory()          one pinned connection (tests, demos)
//!        │
//!        ▼
//! Database::new(config) ──► connect ──► migrate ──► Database
//!        │
//!        ├── orders()  → OrderRepository
//!        ├── health()  → StoreHealth { reachable, migrations }
//!        └── close()
//! ```
//!
//! An in-memory database lives exactly as long as its connection, so the
//! in-memory store keeps a single connection open for its whole lifetime.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::order::OrderRepository;

/// How long a request waits for a free connection before failing.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the order store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Order store settings.
///
/// ```rust
/// use pharma_db::DbConfig;
///
/// let config = DbConfig::new("./pharma.db").max_connections(8);
/// assert_eq!(config.max_connections, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: StoreLocation,

    /// Pool size for a file store. Default: 5
    pub max_connections: u32,
}

impl DbConfig {
    /// A file-backed store; the file is created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: StoreLocation::File(path.into()),
            max_connections: 5,
        }
    }

    /// A private in-memory store.
    pub fn in_memory() -> Self {
        DbConfig {
            location: StoreLocation::Memory,
            max_connections: 1,
        }
    }

    /// Sets the pool size (at least one connection).
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    /// The store's file, if it has one.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            StoreLocation::File(path) => Some(path),
            StoreLocation::Memory => None,
        }
    }
}

/// Result of [`Database::health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHealth {
    /// The store answered a trivial query.
    pub reachable: bool,
    /// Migration counts, when they could be read.
    pub migrations: Option<MigrationStatus>,
}

impl StoreHealth {
    /// Reachable and running the schema this build expects.
    pub fn is_healthy(&self) -> bool {
        self.reachable && self.migrations.is_some_and(|m| m.is_current())
    }
}

/// Handle to the order store.
///
/// Clones share one pool. order-api keeps one in `web::Data`.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the store and applies any pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        let pool = match &config.location {
            StoreLocation::File(path) => {
                info!(
                    path = %path.display(),
                    max_connections = config.max_connections,
                    "Opening order store"
                );
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);

                SqlitePoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_with(options)
                    .await
            }
            StoreLocation::Memory => {
                info!("Opening in-memory order store");
                let options = SqliteConnectOptions::new().in_memory(true);

                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| DbError::Unavailable(e.to_string()))?;

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// Order repository backed by this store.
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    /// Liveness and schema state, for `GET /health`.
    pub async fn health(&self) -> StoreHealth {
        let reachable = sqlx::query("SELECT 1").execute(&self.pool).await.is_ok();
        let migrations = if reachable {
            migrations::migration_status(&self.pool)
                .await
                .map_err(|e| warn!("Could not read migration status: {}", e))
                .ok()
        } else {
            None
        };

        StoreHealth {
            reachable,
            migrations,
        }
    }

    /// Closes every connection. Later operations fail with
    /// [`DbError::Unavailable`].
    pub async fn close(&self) {
        info!("Closing order store");
        self.pool.close().await;
    }
}
