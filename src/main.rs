//! # localnews
//!
//! A single-screen terminal news reader. It picks a country (from the caller's
//! IP unless one is given) and a category, fetches the matching feed from a
//! news API and prints it as a numbered list.
//!
//! ## Usage
//!
//! ```sh
//! localnews --api-base http://10.0.2.2:8000
//! localnews --country de --category science --once
//! ```
//!
//! ## Flow
//!
//! 1. **Mount**: resolve the country via IP geolocation, then fetch once
//! 2. **Loop**: read commands from stdin; changing the country or category,
//!    or typing `search`, fetches again
//! 3. **Handoff**: `open <n>` passes an article link to the system browser

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::io::BufReader;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod commands;
mod config;
mod error;
mod links;
mod models;
mod render;
mod screen;
mod session;
mod utils;

use api::NewsClient;
use cli::Cli;
use config::{AppConfig, FileConfig};
use links::SystemOpener;
use models::Query;
use render::render_screen;
use screen::NewsScreen;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr so they never interleave with the rendered list.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    tracing::debug!(?args, "Parsed CLI arguments");

    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let config = AppConfig::resolve(args, file_config)?;
    info!(
        news_api_base = %config.news_api_base,
        geolocation_url = %config.geolocation_url,
        timeout_secs = config.request_timeout.as_secs(),
        "localnews starting up"
    );

    let client = NewsClient::from_config(&config)?;
    let query = Query {
        country: config.country.clone(),
        category: config.category,
    };
    let mut screen = NewsScreen::new(client, query)
        .with_observer(|state| print!("{}", render_screen(state, Utc::now())));

    screen.mount().await;

    if config.once {
        if let Some(message) = screen.state().failure() {
            eprintln!("{}", message);
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let lines = session::spawn_line_reader(BufReader::new(std::io::stdin()));
    session::run(&mut screen, &SystemOpener, lines, interrupted()).await;
    info!("localnews shutting down");
    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
