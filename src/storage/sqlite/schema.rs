use anyhow::Context;
use sqlx::{Executor, SqlitePool};

/// Newest schema version this build understands.
pub const REVIEW_SCHEMA_VERSION: i64 = 2;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

// Every statement is written to be re-runnable: two processes starting
// against the same fresh file may both apply the same step.
const MIGRATIONS: [Migration; 2] = [
    Migration {
        version: 1,
        name: "create reviews",
        sql: "CREATE TABLE IF NOT EXISTS reviews (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                content  TEXT    NOT NULL,
                rating   INTEGER CHECK (rating IS NULL OR rating BETWEEN 1 AND 5),
                user_id  INTEGER NOT NULL,
                beer_id  INTEGER NOT NULL
            );",
    },
    Migration {
        version: 2,
        name: "review lookup indexes",
        sql: "CREATE INDEX IF NOT EXISTS idx_reviews_beer_id ON reviews(beer_id);
              CREATE INDEX IF NOT EXISTS idx_reviews_user_id ON reviews(user_id);
              CREATE INDEX IF NOT EXISTS idx_reviews_unrated ON reviews(id)
                  WHERE rating IS NULL;",
    },
];

pub(super) async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    Executor::execute(
        pool,
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS review_schema_version (
            version    INTEGER PRIMARY KEY,
            name       TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );",
        ),
    )
    .await
    .context("create schema version table")?;

    let current = current_version(pool).await?;
    if current > REVIEW_SCHEMA_VERSION {
        anyhow::bail!(
            "sqlite schema version unsupported: review_schema_version={current}, \
             this build knows up to {REVIEW_SCHEMA_VERSION}"
        );
    }

    for migration in &MIGRATIONS {
        if migration.version <= current {
            continue;
        }
        apply(pool, migration)
            .await
            .with_context(|| format!("apply migration v{} ({})", migration.version, migration.name))?;
        tracing::info!(
            version = migration.version,
            name = migration.name,
            "applied review schema migration"
        );
    }

    Ok(())
}

pub(super) async fn current_version(pool: &SqlitePool) -> anyhow::Result<i64> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM review_schema_version")
        .fetch_one(pool)
        .await
        .context("read schema version")?;
    Ok(version.unwrap_or(0))
}

async fn apply(pool: &SqlitePool, migration: &Migration) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;
    Executor::execute(&mut *tx, sqlx::raw_sql(migration.sql)).await?;
    sqlx::query(
        "INSERT OR IGNORE INTO review_schema_version (version, name, applied_at)
         VALUES (?1, ?2, ?3)",
    )
    .bind(migration.version)
    .bind(migration.name)
    .bind(chrono::Utc::now().to_rfc3339())
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}
