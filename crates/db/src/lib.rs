//! SQLite connection pool factory and schema bootstrap for libris.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const MEMORY_URL: &str = "sqlite::memory:";

/// Schema bootstrap statement contributed by a module.
#[derive(Debug, Clone)]
pub struct Migration {
    pub id: &'static str,
    pub up: &'static str,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_url")]
    pub url: String,
    #[serde(default = "DatabaseSettings::default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "DatabaseSettings::default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
}

impl DatabaseSettings {
    fn default_url() -> String {
        "sqlite://libris.db".to_string()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_acquire_timeout_ms() -> u64 {
        5000
    }

    /// Whether the URL points at a private in-memory database.
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_ms: Self::default_acquire_timeout_ms(),
        }
    }
}

/// Handle to the relational store. Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open a pool for the configured URL, creating the database file if needed.
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&settings.url)
            .with_context(|| format!("invalid database url '{}'", settings.url))?
            .create_if_missing(true);

        // An in-memory database lives and dies with its connection, so the pool
        // keeps exactly one and never recycles it.
        let pool_options = if settings.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(settings.max_connections)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms))
            .connect_with(options)
            .await
            .with_context(|| format!("failed to connect to '{}'", settings.url))?;

        tracing::info!(
            target: "libris-db",
            url = %settings.url,
            max_connections = pool.options().get_max_connections(),
            "database pool ready"
        );

        Ok(Self { pool })
    }

    /// Open a fresh, isolated in-memory database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        Self::connect(&DatabaseSettings {
            url: MEMORY_URL.to_string(),
            ..DatabaseSettings::default()
        })
        .await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run every module's bootstrap statement in the given order.
    ///
    /// Statements must be idempotent (`CREATE TABLE IF NOT EXISTS ...`); nothing
    /// records which ones have already run.
    pub async fn apply_migrations(&self, migrations: &[(String, Migration)]) -> anyhow::Result<()> {
        for (module, migration) in migrations {
            tracing::info!(
                target: "libris-db",
                module = %module,
                migration = migration.id,
                "applying schema"
            );

            sqlx::raw_sql(migration.up)
                .execute(&self.pool)
                .await
                .with_context(|| {
                    format!("migration '{}' of module '{}' failed", migration.id, module)
                })?;
        }

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(target: "libris-db", "database pool closed");
    }
}
