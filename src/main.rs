//! Kasweb main entry point

use anyhow::Context;
use clap::Parser;
use kasweb_api::start_server;
use kasweb_client::BackendClient;
use kasweb_config::{Config, ConfigResult};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "kasweb")]
#[command(author = "Kasweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web dashboard for small-organization bookkeeping", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a commented default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// File (or defaults), then environment overrides, then validation
fn load_config(path: &Path) -> ConfigResult<Config> {
    let mut config = Config::load_or_default(path)?;
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            // Logger not set up yet
            eprintln!("[{}] {}", e.code(), e);
            for hint in e.suggestions() {
                eprintln!("  hint: {}", hint);
            }
            return Err(e).context("Failed to load configuration");
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: backend={}, records per page={}",
        config.backend.base_url,
        config.pagination.records_per_page
    );

    let client = BackendClient::with_timeout(
        config.backend.base_url.clone(),
        Duration::from_secs(config.backend.timeout_secs),
    )
    .context("Failed to build backend client")?;

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, client))
        .context("Server error")?;

    Ok(())
}
