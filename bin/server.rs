// Estate Catalog - Web Server
// Serves the listings / blog / contact REST API from an in-memory catalog

use anyhow::{Context, Result};
use clap::Parser;
use estate_catalog::{api, logging, seed, MemStorage, Settings, Storage};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "estate-server", version, about = "Real-estate catalog REST API")]
struct Cli {
    /// TOML settings file
    #[arg(short, long, env = "ESTATE_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Start with an empty catalog
    #[arg(long)]
    no_seed: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// CLI flags sit on top of file and environment settings
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if self.no_seed {
            settings.catalog.seed_sample_data = false;
        }
        if self.json_logs {
            settings.log.json = true;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    cli.apply(&mut settings);
    settings.validate().context("invalid settings")?;

    logging::init_logger(&settings.log);
    tracing::info!(version = estate_catalog::VERSION, "starting estate catalog");

    // The store lives for the whole process and is shared by handle
    let storage = Arc::new(MemStorage::new());
    if settings.catalog.seed_sample_data {
        seed::load_sample_data(storage.as_ref())?;
    } else {
        let counts = storage.counts()?;
        tracing::info!(?counts, "starting with empty catalog");
    }

    api::serve(&settings, storage).await
}
