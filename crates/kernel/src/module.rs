use async_trait::async_trait;
use axum::Router;

/// Context provided to modules during initialization
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// Idempotent DDL a module needs before it can serve requests
#[derive(Debug, Clone)]
pub struct Schema {
    pub id: &'static str,
    pub ddl: &'static str,
}

/// Core module trait that all Pantry modules must implement
#[async_trait]
pub trait Module: Sync + Send {
    /// Unique name for this module, also its mount path segment
    fn name(&self) -> &'static str;

    /// Initialize the module with the provided context
    /// Called during application startup after schema bootstrap
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Return the Axum router for this module's routes
    /// Routes will be mounted under `{api_prefix}/{module_name}`
    fn routes(&self) -> Router {
        Router::new()
    }

    /// Return OpenAPI specification fragment for this module as JSON
    /// Will be merged with other modules' specs
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    /// Return schema statements contributed by this module
    /// Statements are executed in the order returned and must be re-runnable
    fn schema(&self) -> Vec<Schema> {
        vec![]
    }

    /// Called after every module is initialized, before the server accepts traffic
    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Stop the module and clean up resources
    /// Called during application shutdown
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
