//! # Database Migrations
//!
//! Embedded SQL migrations for the Pharma ERP.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_quotations.sql`)
//! 3. Write idempotent SQL (use `IF NOT EXISTS` where possible)
//! 4. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
///
/// ```text
/// migrations/sqlite/
/// └── 001_initial_schema.sql  # orders table
/// ```
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Embedded vs applied migration counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStatus {
    pub total: usize,
    pub applied: usize,
}

impl MigrationStatus {
    /// True when every embedded migration has been applied.
    pub fn is_current(&self) -> bool {
        self.applied >= self.total
    }
}

/// Runs all pending database migrations.
///
/// Idempotent, and each migration runs in its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Counts embedded and applied migrations.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<MigrationStatus> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok(MigrationStatus {
        total,
        applied: applied as usize,
    })
}
