use anyhow::Context;
use clap::{Parser, Subcommand};
use pantry_kernel::settings::Settings;

/// Pantry product catalog service
#[derive(Debug, Parser)]
#[command(name = "pantry", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Apply module schema to PostgreSQL and exit
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Pantry settings")?;
    pantry_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(env = ?settings.environment, "pantry serve");
            pantry_app::bootstrap::serve(settings).await
        }
        Command::Schema => {
            tracing::info!(env = ?settings.environment, "pantry schema");
            pantry_app::bootstrap::apply_schema(&settings).await
        }
    }
}
