//! Plain-text rendering of the news screen.
//!
//! Rendering is pure: it takes a [`ScreenState`] and a reference time and
//! returns the text to print, so the event loop owns all terminal I/O.
//!
//! ```text
//! News App
//! Country: United States (us) | Category: General
//!
//! Top headlines
//!
//!  1. Title
//!     Author
//!     Description
//!     2024-05-01T12:00:00Z (3 hours ago)
//!     Image: https://...
//!     Read more: https://...
//! ```

use crate::models::{COUNTRIES, Category, Query};
use crate::screen::{Phase, ScreenState};
use crate::utils::{relative_age, upcase};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use std::fmt::Write;

pub const SCREEN_TITLE: &str = "News App";

/// Render the full screen for `state` as of `now`.
///
/// # Arguments
///
/// * `state` - Current screen state
/// * `now` - Reference time for the relative age next to each timestamp
///
/// # Returns
///
/// The title, the query line, then one of: a loading line, an idle hint, or
/// the error text, server message and numbered item list. A payload error is
/// printed above the partial items rather than replacing them.
pub fn render_screen(state: &ScreenState, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    writeln!(out, "{}", SCREEN_TITLE).unwrap();
    writeln!(out, "{}", describe_query(&state.query)).unwrap();
    writeln!(out).unwrap();

    match state.phase {
        Phase::Idle => {
            writeln!(out, "Type 'search' to load news, or 'help' for commands.").unwrap();
            return out;
        }
        Phase::Loading => {
            writeln!(out, "Loading…").unwrap();
            return out;
        }
        Phase::Success | Phase::Error => {}
    }

    if let Some(error) = &state.error {
        writeln!(out, "Error: {}", error).unwrap();
        writeln!(out).unwrap();
    }
    if let Some(message) = &state.message {
        writeln!(out, "{}", message).unwrap();
        writeln!(out).unwrap();
    }

    if state.items.is_empty() {
        if state.error.is_none() {
            writeln!(out, "No news to show.").unwrap();
        }
        return out;
    }

    let width = state.items.len().to_string().len();
    let indent = " ".repeat(width + 3);
    for (i, item) in state.items.iter().enumerate() {
        writeln!(out, " {:>width$}. {}", i + 1, item.title, width = width).unwrap();
        writeln!(out, "{}{}", indent, item.display_author()).unwrap();
        if !item.description.is_empty() {
            writeln!(out, "{}{}", indent, item.description).unwrap();
        }
        if !item.published_at.is_empty() {
            match relative_age(&item.published_at, now) {
                Some(age) => writeln!(out, "{}{} ({})", indent, item.published_at, age).unwrap(),
                None => writeln!(out, "{}{}", indent, item.published_at).unwrap(),
            }
        }
        if let Some(image) = item.image.as_deref().filter(|i| !i.is_empty()) {
            writeln!(out, "{}Image: {}", indent, image).unwrap();
        }
        writeln!(out, "{}Read more: {}", indent, item.url).unwrap();
        writeln!(out).unwrap();
    }
    out
}

/// One-line summary of the current selection.
pub fn describe_query(query: &Query) -> String {
    let country = match &query.country {
        Some(cc) => match cc.name() {
            Some(name) => format!("{} ({})", name, cc),
            None => cc.to_string(),
        },
        None => "not selected".to_string(),
    };
    format!(
        "Country: {} | Category: {}",
        country,
        upcase(query.category.as_str())
    )
}

/// Listing for the `countries` command.
pub fn render_countries() -> String {
    COUNTRIES
        .iter()
        .map(|(code, name)| format!("  {}  {}", code, name))
        .join("\n")
}

/// Listing for the `categories` command.
pub fn render_categories() -> String {
    format!("  {}", Category::ALL.iter().join(", "))
}

/// Command reference printed by `help`.
pub fn render_help() -> String {
    [
        "Commands:",
        "  country <code>     select a country (e.g. 'country us')",
        "  category <name>    select a category (e.g. 'category sports')",
        "  search             fetch again with the current selection",
        "  open <n>           open article n in the browser",
        "  countries          list country codes",
        "  categories         list categories",
        "  help               show this help",
        "  quit               exit",
    ]
    .join("\n")
}
