use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

/// Book catalogue service
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Override `database.url`
        #[arg(long)]
        database_url: Option<String>,
    },
    /// Print the resolved settings as JSON
    Settings,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load libris settings")?;

    match cli.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
        database_url: None,
    }) {
        Command::Serve {
            host,
            port,
            database_url,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(url) = database_url {
                settings.database.url = url;
            }

            libris_telemetry::init(&settings.telemetry)?;
            tracing::info!(
                env = ?settings.environment,
                address = %settings.server.bind_address(),
                "libris serve"
            );

            libris_app::run(settings).await
        }
        Command::Settings => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
    }
}
