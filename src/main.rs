use anyhow::Context;
use pantry_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Pantry settings")?;
    pantry_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        driver = ?settings.database.driver,
        "pantry-app bootstrap starting"
    );

    pantry_app::bootstrap::serve(settings).await
}
