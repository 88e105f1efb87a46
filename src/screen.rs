//! The news screen: query state, fetch lifecycle and user actions.
//!
//! Lifecycle of every fetch:
//!
//! ```text
//! idle ──▶ loading ──▶ success
//!             │
//!             └──────▶ error
//! ```
//!
//! `loading` is re-entered on every manual search and whenever the country
//! or the category actually changes. Fetches are sequential; the newest
//! outcome replaces whatever was shown before.

use crate::api::NewsSource;
use crate::error::{NewsError, Result};
use crate::models::{Category, CountryCode, FetchResult, NewsItem, Query};
use tracing::{debug, info, instrument, warn};

/// Where the screen is in the fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the renderer needs to draw the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    pub query: Query,
    pub phase: Phase,
    pub items: Vec<NewsItem>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ScreenState {
    /// Item by 1-based position as shown in the list.
    pub fn item(&self, position: usize) -> Result<&NewsItem> {
        position
            .checked_sub(1)
            .and_then(|i| self.items.get(i))
            .ok_or_else(|| {
                NewsError::Link(format!(
                    "no article number {} (showing {})",
                    position,
                    self.items.len()
                ))
            })
    }

    /// Error text if the last fetch ended in the error phase.
    ///
    /// # Returns
    ///
    /// `None` while idle, loading or after a clean success.
    pub fn failure(&self) -> Option<&str> {
        match self.phase {
            Phase::Error => self.error.as_deref(),
            _ => None,
        }
    }

    fn apply(&mut self, outcome: Result<FetchResult>) {
        match outcome {
            Ok(result) => {
                self.items = result.items;
                self.message = result.message;
                self.phase = if result.error.is_some() {
                    Phase::Error
                } else {
                    Phase::Success
                };
                self.error = result.error;
            }
            Err(e) => {
                self.items.clear();
                self.message = None;
                self.error = Some(e.user_message());
                self.phase = Phase::Error;
            }
        }
    }
}

type Observer = Box<dyn FnMut(&ScreenState)>;

/// Controller tying a [`NewsSource`] to the displayed [`ScreenState`].
pub struct NewsScreen<S> {
    source: S,
    state: ScreenState,
    observer: Option<Observer>,
}

impl<S: NewsSource> NewsScreen<S> {
    pub fn new(source: S, query: Query) -> Self {
        Self {
            source,
            state: ScreenState {
                query,
                ..Default::default()
            },
            observer: None,
        }
    }

    /// Call `f` after every state transition (entering loading and settling).
    pub fn with_observer(mut self, f: impl FnMut(&ScreenState) + 'static) -> Self {
        self.observer = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    /// First display: resolve the country if none was given, then fetch once.
    #[instrument(level = "info", skip_all)]
    pub async fn mount(&mut self) {
        if self.state.query.country.is_none() {
            match self.source.resolve_country().await {
                Some(country) => self.state.query.country = Some(country),
                None => debug!("Starting without a country"),
            }
        }
        self.refresh().await;
    }

    /// Manual search with the current query.
    pub async fn search(&mut self) {
        self.refresh().await;
    }

    /// Select a country. Fetches only if the selection changed.
    pub async fn set_country(&mut self, country: CountryCode) -> bool {
        if self.state.query.country.as_ref() == Some(&country) {
            return false;
        }
        info!(%country, "Country changed");
        self.state.query.country = Some(country);
        self.refresh().await;
        true
    }

    /// Select a category. Fetches only if the selection changed.
    pub async fn set_category(&mut self, category: Category) -> bool {
        if self.state.query.category == category {
            return false;
        }
        info!(%category, "Category changed");
        self.state.query.category = category;
        self.refresh().await;
        true
    }

    async fn refresh(&mut self) {
        self.state.phase = Phase::Loading;
        self.state.error = None;
        self.notify();

        let outcome = self.source.fetch_news(&self.state.query).await;
        if let Err(e) = &outcome {
            warn!(error = %e, "News fetch failed");
        }
        self.state.apply(outcome);
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}
