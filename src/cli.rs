//! Command-line interface definitions for localnews.
//!
//! Every option can also come from an environment variable or from the YAML
//! config file passed with `--config`; see [`crate::config`] for precedence.

use crate::models::{Category, CountryCode};
use clap::Parser;

/// Command-line arguments for the localnews screen.
///
/// # Examples
///
/// ```sh
/// # Resolve the country from the caller's IP and show general news
/// localnews
///
/// # Pick everything explicitly and print once
/// localnews --country de --category science --once
///
/// # Point at another backend
/// localnews --api-base http://10.0.2.2:8000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Country code to start with; skips IP geolocation when given
    #[arg(long, env = "NEWS_COUNTRY")]
    pub country: Option<CountryCode>,

    /// News category to start with
    #[arg(long, env = "NEWS_CATEGORY")]
    pub category: Option<Category>,

    /// Base URL of the news API (the `/api/v1/news/` path is appended)
    #[arg(long, env = "NEWS_API_BASE")]
    pub api_base: Option<String>,

    /// IP geolocation endpoint
    #[arg(long, env = "GEOLOCATION_URL")]
    pub geo_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Fetch and print once, then exit instead of reading commands
    #[arg(long)]
    pub once: bool,
}
