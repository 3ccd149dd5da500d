use async_trait::async_trait;
use axum::Router;
use libris_db::{Database, Migration};

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
    pub db: &'a Database,
}

/// Core module trait that all libris modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module, also its mount path
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup after the schema bootstrap
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Return schema bootstrap statements contributed by this module
    fn migrations(&self) -> Vec<Migration> {
        vec![]
    }

    /// Called once the HTTP surface is about to open
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
