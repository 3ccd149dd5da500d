//! Libris application library
//!
//! Wires the book catalogue module into the kernel registry and serves it over HTTP.

use anyhow::Context;
use libris_db::Database;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub mod modules;

/// Register every module against `db` and bootstrap their tables.
pub async fn bootstrap(db: &Database) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db);

    db.apply_migrations(&registry.collect_migrations())
        .await
        .context("failed to bootstrap database schema")?;

    Ok(registry)
}

/// Run the service until a shutdown signal arrives.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let db = Database::connect(&settings.database).await?;
    let registry = bootstrap(&db).await?;

    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = libris_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    db.close().await;

    served
}
