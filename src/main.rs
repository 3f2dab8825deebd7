mod alerts;
mod analytics;
mod args;
mod config;
mod db;
mod error;
mod export;
mod import;
mod insights;
mod models;
mod run;
mod tracker;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = args::Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let config = config::Config::load(args.data_dir.as_deref())?;
    let db = db::Database::open(&config.db_path()?)?;
    let mut tracker = tracker::Tracker::open(db);

    run::as_cli(args.command, &mut tracker, &config)
}
