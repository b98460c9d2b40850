mod analytics;
mod config;
mod db;
mod error;
mod export;
mod ledger;
mod models;
mod report;
mod run;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = config::Config::from_env()?;
    run::as_cli(&args, config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV).unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
