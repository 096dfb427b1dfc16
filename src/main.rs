//! Learning Copilot server
//!
//! Loads configuration, sets up logging, builds the model gateway and the
//! content service once, then serves the HTTP API until Ctrl-C.

mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use copilot_api::{ApiConfig, ApiServer};
use copilot_core::{ContentService, LogFormat, ModelGateway, Settings};

/// Learning Copilot: structured study material from a generative model.
#[derive(Parser, Debug)]
#[command(name = "learning-copilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log output format: pretty or json
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<String>,

    /// Check the model credentials before serving
    #[arg(long)]
    check_credentials: bool,
}

impl Cli {
    /// Flags take precedence over every other configuration source
    fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(format) = &self.log_format {
            settings.logging.format = format.parse::<LogFormat>()?;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply(&mut settings)?;

    let _guard = logging::init(&settings.logging)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        model = %settings.provider.model,
        "Starting Learning Copilot"
    );

    let gateway = Arc::new(ModelGateway::new(&settings.provider)?);
    if cli.check_credentials {
        if gateway.validate_credentials().await {
            info!("Credential check passed");
        } else {
            warn!("Credential check failed; requests to the model may be rejected");
        }
    }

    let service = Arc::new(ContentService::new(gateway, settings.generation.clone()));
    let server = ApiServer::new(ApiConfig::from_settings(&settings.server), service);
    server.start().await
}
