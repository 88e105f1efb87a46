//! Error type shared by the client, the screen and the config loader.
//!
//! Every failure the user can see collapses into one line of text through
//! [`NewsError::user_message`]. The variants exist for logging and tests; the
//! screen never branches on them.

use thiserror::Error;

/// Shown when a failure carries no usable text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Please select a country.")]
    CountryNotSelected,

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status code {0}")]
    Status(u16),

    #[error("Invalid response from server.")]
    InvalidResponse,

    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot open link: {0}")]
    Link(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl NewsError {
    /// The single line of text the screen displays for this failure.
    pub fn user_message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            text
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
