//! Handing article links off to the system browser.

use crate::error::{NewsError, Result};
use tokio::process::Command;
use tracing::{info, instrument};
use url::Url;

/// Something that can open a URL outside this program.
pub trait LinkOpener {
    async fn open(&self, url: &Url) -> Result<()>;
}

/// Opens links with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &Url) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(url.as_str());
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url.as_str()]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url.as_str());
            cmd
        }
    }
}

impl LinkOpener for SystemOpener {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn open(&self, url: &Url) -> Result<()> {
        let status = Self::command(url).status().await?;
        if status.success() {
            info!("Opened link");
            Ok(())
        } else {
            Err(NewsError::Link(format!("browser handoff exited with {}", status)))
        }
    }
}

/// Accept only absolute `http`/`https` links.
///
/// # Errors
///
/// [`NewsError::Link`] for unparseable or relative URLs and for any other
/// scheme (`file:`, `javascript:`, `mailto:` ...).
pub fn validate_link(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| NewsError::Link(format!("'{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(NewsError::Link(format!("refusing '{}' link", other))),
    }
}

/// Validate `raw` and hand it to `opener`.
pub async fn open_link<O: LinkOpener>(opener: &O, raw: &str) -> Result<Url> {
    let url = validate_link(raw)?;
    opener.open(&url).await?;
    Ok(url)
}
