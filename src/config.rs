//! Runtime configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (which already include their environment fallbacks).
//!
//! ```yaml
//! news_api_base: http://10.0.2.2:8000
//! geolocation_url: https://ipinfo.io/json
//! request_timeout_secs: 10
//! country: us
//! category: business
//! ```

use crate::cli::Cli;
use crate::error::{NewsError, Result};
use crate::models::{Category, CountryCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_NEWS_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_GEOLOCATION_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Shape of the optional config file. Every key may be omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub news_api_base: Option<String>,
    pub geolocation_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub country: Option<CountryCode>,
    pub category: Option<Category>,
}

impl FileConfig {
    /// Read and parse a YAML config file. Unknown keys are rejected.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let parsed: FileConfig = serde_yaml::from_str(&raw)
            .map_err(|e| NewsError::Config(format!("{}: {}", path, e)))?;
        info!(path, "Loaded config file");
        Ok(parsed)
    }
}

/// Fully resolved settings the binary runs with.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub news_api_base: Url,
    pub geolocation_url: Url,
    pub request_timeout: Duration,
    pub country: Option<CountryCode>,
    pub category: Category,
    pub once: bool,
}

impl AppConfig {
    /// Merge CLI arguments over the file config over defaults.
    ///
    /// # Arguments
    ///
    /// * `cli` - Parsed flags, env fallbacks already applied by clap
    /// * `file` - Contents of `--config`, or [`FileConfig::default`] without one
    ///
    /// # Errors
    ///
    /// [`NewsError::Config`] for a zero timeout or a URL that is not `http(s)`.
    pub fn resolve(cli: Cli, file: FileConfig) -> Result<Self> {
        let news_api_base = cli
            .api_base
            .or(file.news_api_base)
            .unwrap_or_else(|| DEFAULT_NEWS_API_BASE.to_string());
        let geolocation_url = cli
            .geo_url
            .or(file.geolocation_url)
            .unwrap_or_else(|| DEFAULT_GEOLOCATION_URL.to_string());
        let timeout_secs = cli
            .timeout_secs
            .or(file.request_timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        if timeout_secs == 0 {
            return Err(NewsError::Config("request timeout must be at least 1 second".into()));
        }

        Ok(AppConfig {
            news_api_base: parse_http_url("news_api_base", &news_api_base)?,
            geolocation_url: parse_http_url("geolocation_url", &geolocation_url)?,
            request_timeout: Duration::from_secs(timeout_secs),
            country: cli.country.or(file.country),
            category: cli.category.or(file.category).unwrap_or_default(),
            once: cli.once,
        })
    }
}

fn parse_http_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| NewsError::Config(format!("{} '{}': {}", key, raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NewsError::Config(format!(
            "{} '{}': unsupported scheme '{}'",
            key, raw, other
        ))),
    }
}
