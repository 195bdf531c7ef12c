//! Application assembly: store selection, module registration, lifecycle.

use std::future::Future;
use std::sync::Arc;

use anyhow::{bail, Context};
use axum::Router;
use pantry_kernel::{
    settings::{DatabaseDriver, Settings},
    InitCtx, ModuleRegistry,
};
use sqlx::PgPool;

use crate::modules::{
    self,
    products::{InMemoryProductRepository, PgProductRepository, SharedRepository},
};

/// A fully wired application, ready to serve.
pub struct App {
    pub settings: Settings,
    pub registry: ModuleRegistry,
    pool: Option<PgPool>,
}

impl App {
    /// Select the store from settings, register modules, and bootstrap schema.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let (products, pool): (SharedRepository, Option<PgPool>) = match settings.database.driver {
            DatabaseDriver::Memory => {
                tracing::warn!("using in-memory product store; data is lost on restart");
                (Arc::new(InMemoryProductRepository::new()) as SharedRepository, None)
            }
            DatabaseDriver::Postgres => {
                let pool = pantry_db::connect(&settings.database).await?;
                (
                    Arc::new(PgProductRepository::new(pool.clone())) as SharedRepository,
                    Some(pool),
                )
            }
        };

        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, products);

        if let Some(pool) = &pool {
            pantry_db::bootstrap_schema(pool, &registry.collect_schema()).await?;
        }

        Ok(Self {
            settings,
            registry,
            pool,
        })
    }

    /// Build an application over an explicit repository, skipping store selection.
    pub fn with_repository(settings: Settings, products: SharedRepository) -> Self {
        let mut registry = ModuleRegistry::new();
        modules::register_all(&mut registry, products);
        Self {
            settings,
            registry,
            pool: None,
        }
    }

    /// The HTTP router with every module mounted.
    pub fn router(&self) -> Router {
        pantry_http::build_router(&self.registry, &self.settings)
    }

    /// Run module lifecycle around the HTTP server until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let ctx = InitCtx {
            settings: &self.settings,
        };

        self.registry.init_all(&ctx).await?;
        self.registry.start_all(&ctx).await?;

        let served = pantry_http::start_server(&self.registry, &self.settings, shutdown).await;

        self.registry.stop_all().await?;
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("database pool closed");
        }

        served
    }
}

/// Build the application and serve until SIGINT/SIGTERM.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let app = App::build(settings)
        .await
        .context("failed to assemble application")?;
    app.run(pantry_http::shutdown_signal()).await
}

/// Connect to Postgres, apply module schema, and exit.
pub async fn apply_schema(settings: &Settings) -> anyhow::Result<()> {
    if settings.database.driver != DatabaseDriver::Postgres {
        bail!("schema bootstrap requires database.driver = \"postgres\"");
    }

    let pool = pantry_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(
        &mut registry,
        Arc::new(PgProductRepository::new(pool.clone())),
    );

    let result = pantry_db::bootstrap_schema(&pool, &registry.collect_schema()).await;
    pool.close().await;
    result
}
