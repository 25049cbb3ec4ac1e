//! Database migrations
//!
//! This module manages SQLite schema migrations for trellis.
//! Migrations are versioned and applied automatically on database connection.

use sqlx::SqlitePool;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// SQL for creating the migrations tracking table
const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        version INTEGER PRIMARY KEY NOT NULL,
        applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Migration 1: Initial schema
///
/// The UNIQUE constraint on `name` is the correctness guard against
/// duplicate-creation races; the service-level existence check is only a
/// friendlier first line.
const MIGRATION_V1: &str = r#"
    -- Projects table
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL,
        phase TEXT NOT NULL DEFAULT 'None',
        department TEXT NOT NULL DEFAULT 'None',
        budget REAL NOT NULL DEFAULT 0.0 CHECK (budget >= 0.0),
        actual_cost REAL NOT NULL DEFAULT 0.0 CHECK (actual_cost >= 0.0),
        roi REAL NOT NULL DEFAULT 0.0,
        execution_progress REAL NOT NULL DEFAULT 0.0 CHECK (execution_progress >= 0.0 AND execution_progress <= 100.0),
        risk_level TEXT NOT NULL DEFAULT 'Low' CHECK (risk_level IN ('Low', 'Medium', 'High')),
        goals TEXT NOT NULL DEFAULT '',
        stakeholders TEXT NOT NULL DEFAULT '',
        initial_risks TEXT NOT NULL DEFAULT '',
        resources TEXT NOT NULL DEFAULT '',
        milestones TEXT NOT NULL DEFAULT '',
        team_size INTEGER NOT NULL DEFAULT 1 CHECK (team_size >= 1),
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_projects_name ON projects(name);
    CREATE INDEX IF NOT EXISTS idx_projects_department ON projects(department);
    CREATE INDEX IF NOT EXISTS idx_projects_phase ON projects(phase);
    CREATE INDEX IF NOT EXISTS idx_projects_type ON projects(type);
"#;

/// Get the current schema version from the database
async fn get_current_version(pool: &SqlitePool) -> anyhow::Result<i32> {
    // Ensure migrations table exists
    sqlx::raw_sql(CREATE_MIGRATIONS_TABLE).execute(pool).await?;

    // Get the latest version
    let row: Option<(i32,)> = sqlx::query_as("SELECT MAX(version) FROM _migrations")
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Record that a migration has been applied
async fn record_migration(pool: &SqlitePool, version: i32) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let current_version = get_current_version(pool).await?;

    tracing::info!(
        current_version = current_version,
        target_version = CURRENT_VERSION,
        "Checking database migrations"
    );

    if current_version >= CURRENT_VERSION {
        tracing::debug!("Database is up to date");
        return Ok(());
    }

    // Apply migrations in order
    if current_version < 1 {
        tracing::info!("Applying migration v1: Initial schema");
        sqlx::raw_sql(MIGRATION_V1).execute(pool).await?;
        record_migration(pool, 1).await?;
    }

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Check if the database needs migrations
pub async fn needs_migration(pool: &SqlitePool) -> anyhow::Result<bool> {
    let current_version = get_current_version(pool).await?;
    Ok(current_version < CURRENT_VERSION)
}

/// Get migration status information
pub async fn migration_status(pool: &SqlitePool) -> anyhow::Result<MigrationStatus> {
    let current_version = get_current_version(pool).await?;
    Ok(MigrationStatus {
        current_version,
        target_version: CURRENT_VERSION,
        needs_migration: current_version < CURRENT_VERSION,
    })
}

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Current schema version in the database
    pub current_version: i32,
    /// Target schema version (latest)
    pub target_version: i32,
    /// Whether migrations need to be run
    pub needs_migration: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool")
    }

    #[tokio::test]
    async fn test_run_migrations() {
        let pool = create_test_pool().await;

        // Should start with no migrations
        let status = migration_status(&pool).await.unwrap();
        assert_eq!(status.current_version, 0);
        assert!(status.needs_migration);

        // Run migrations
        run_migrations(&pool).await.unwrap();

        // Should be at current version
        let status = migration_status(&pool).await.unwrap();
        assert_eq!(status.current_version, CURRENT_VERSION);
        assert!(!status.needs_migration);
    }

    #[tokio::test]
    async fn test_migrations_idempotent() {
        let pool = create_test_pool().await;

        // Run migrations twice
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        // Should still be at current version
        let status = migration_status(&pool).await.unwrap();
        assert_eq!(status.current_version, CURRENT_VERSION);
    }

    #[tokio::test]
    async fn test_projects_table_created() {
        let pool = create_test_pool().await;
        run_migrations(&pool).await.unwrap();

        let result: (i32,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(&pool)
            .await
            .expect("projects table should exist");
        assert_eq!(result.0, 0, "projects table should start empty");
    }

    #[tokio::test]
    async fn test_check_constraints() {
        let pool = create_test_pool().await;
        run_migrations(&pool).await.unwrap();

        // Negative budget must be rejected at the store level too
        let result = sqlx::query("INSERT INTO projects (id, name, type, budget) VALUES (?, ?, ?, ?)")
            .bind("p1")
            .bind("Bad Budget")
            .bind("Digitization")
            .bind(-10.0)
            .execute(&pool)
            .await;
        assert!(result.is_err(), "negative budget should violate CHECK");

        // Out-of-range progress must be rejected
        let result =
            sqlx::query("INSERT INTO projects (id, name, type, execution_progress) VALUES (?, ?, ?, ?)")
                .bind("p2")
                .bind("Bad Progress")
                .bind("Digitization")
                .bind(120.0)
                .execute(&pool)
                .await;
        assert!(result.is_err(), "progress > 100 should violate CHECK");
    }
}
