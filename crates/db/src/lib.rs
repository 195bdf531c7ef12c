//! PostgreSQL connection factory and schema bootstrap.

use std::time::Duration;

use anyhow::Context;
use pantry_kernel::{settings::DatabaseSettings, Schema};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Open a connection pool using the configured URL and limits.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    tracing::info!(
        target: "pantry-db",
        url = %settings.redacted_url(),
        max_connections = settings.max_connections,
        "connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(&settings.url)
        .await
        .with_context(|| format!("failed to connect to {}", settings.redacted_url()))?;

    Ok(pool)
}

/// Execute module schema statements in order.
///
/// Statements are expected to be idempotent (`CREATE ... IF NOT EXISTS`);
/// nothing records which ones already ran.
pub async fn bootstrap_schema(pool: &PgPool, statements: &[(String, Schema)]) -> anyhow::Result<()> {
    for (module, schema) in statements {
        tracing::info!(target: "pantry-db", module = %module, schema = schema.id, "applying schema");

        sqlx::raw_sql(schema.ddl)
            .execute(pool)
            .await
            .with_context(|| format!("failed to apply schema '{}' for module '{}'", schema.id, module))?;
    }

    tracing::info!(target: "pantry-db", count = statements.len(), "schema bootstrap complete");
    Ok(())
}
