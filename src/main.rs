use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use mateai::{serve, shutdown_signal, telemetry, AppConfig, Commands, Container};

#[derive(Parser)]
#[command(name = "mateai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// YAML configuration file; defaults apply when it does not exist
    #[arg(short, long, global = true, env = "MATEAI_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    let _log_guard = telemetry::init(&config.logging, cli.verbose || config.app.debug)?;
    info!("{} v{}", config.app.name, config.app.version);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            let addr = format!("{}:{}", config.server.host, config.server.port);

            let container = Arc::new(Container::new(config)?);
            let listener = TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            serve(listener, container, shutdown_signal()).await?;
        }

        Commands::Ask { message } => {
            let container = Container::new(config)?;
            let reply = container.chat_use_case().execute(Some(&message)).await?;
            println!("{}", reply.response());
            info!("Tokens used: {}", reply.tokens_used());
        }
    }

    Ok(())
}
