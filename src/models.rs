//! Data models for the news query, the API payload and the displayed items.
//!
//! - [`Category`]: one of the seven fixed news topics
//! - [`CountryCode`]: validated, lowercased ISO-3166 alpha-2 code
//! - [`Query`]: what the next fetch asks for
//! - [`NewsItem`]: a single article as returned by the news API
//! - [`NewsResponse`]: the raw JSON envelope from the news API
//! - [`FetchResult`]: what a fetch hands back to the screen

use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Label used when an item has no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A news topic accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    #[default]
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// The wire value sent as the `category` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown category '{}' (expected one of: {})",
                    s.trim(),
                    Category::ALL.iter().join(", ")
                )
            })
    }
}

/// An ISO-3166 alpha-2 country code, always stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English display name from the picker table, if the code is listed there.
    pub fn name(&self) -> Option<&'static str> {
        COUNTRY_NAMES.get(self.0.as_str()).copied()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CountryCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CountryCode(code.to_ascii_lowercase()))
        } else {
            Err(format!("invalid country code '{}' (expected two letters, e.g. 'us')", code))
        }
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Countries offered for selection, in display order.
pub const COUNTRIES: [(&str, &str); 54] = [
    ("ae", "United Arab Emirates"),
    ("ar", "Argentina"),
    ("at", "Austria"),
    ("au", "Australia"),
    ("be", "Belgium"),
    ("bg", "Bulgaria"),
    ("br", "Brazil"),
    ("ca", "Canada"),
    ("ch", "Switzerland"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("cu", "Cuba"),
    ("cz", "Czech Republic"),
    ("de", "Germany"),
    ("eg", "Egypt"),
    ("fr", "France"),
    ("gb", "United Kingdom"),
    ("gr", "Greece"),
    ("hk", "Hong Kong"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("in", "India"),
    ("it", "Italy"),
    ("jp", "Japan"),
    ("kr", "South Korea"),
    ("lt", "Lithuania"),
    ("lv", "Latvia"),
    ("ma", "Morocco"),
    ("mx", "Mexico"),
    ("my", "Malaysia"),
    ("ng", "Nigeria"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("nz", "New Zealand"),
    ("ph", "Philippines"),
    ("pl", "Poland"),
    ("pt", "Portugal"),
    ("ro", "Romania"),
    ("rs", "Serbia"),
    ("ru", "Russia"),
    ("sa", "Saudi Arabia"),
    ("se", "Sweden"),
    ("sg", "Singapore"),
    ("si", "Slovenia"),
    ("sk", "Slovakia"),
    ("th", "Thailand"),
    ("tr", "Turkey"),
    ("tw", "Taiwan"),
    ("ua", "Ukraine"),
    ("us", "United States"),
    ("ve", "Venezuela"),
    ("za", "South Africa"),
];

static COUNTRY_NAMES: Lazy<BTreeMap<&'static str, &'static str>> =
    Lazy::new(|| COUNTRIES.iter().copied().collect());

/// Parameters of the next news fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Unset until geolocation resolves or the user picks one.
    pub country: Option<CountryCode>,
    pub category: Category,
}

/// A single article as the news API returns it.
///
/// Text fields read JSON `null` as an empty string, so one sparse article
/// never fails the whole feed. `title` and `url` must be present as keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsItem {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published_at: String,
}

/// Deserialize an optional string, mapping `null` to `""`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewsItem {
    /// Author for display, falling back to [`UNKNOWN_AUTHOR`].
    pub fn display_author(&self) -> &str {
        match self.author.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => UNKNOWN_AUTHOR,
        }
    }
}

/// Raw JSON envelope of `GET /api/v1/news/`.
#[derive(Debug, Default, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub news_data: Option<Vec<NewsItem>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of one successful round trip to the news API.
///
/// `error` is set when the payload itself reported a problem; `items` may
/// still hold partial data in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchResult {
    pub items: Vec<NewsItem>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl From<NewsResponse> for FetchResult {
    fn from(resp: NewsResponse) -> Self {
        FetchResult {
            items: resp.news_data.unwrap_or_default(),
            message: resp.message.filter(|m| !m.is_empty()),
            error: resp.error.filter(|e| !e.is_empty()),
        }
    }
}

/// Relevant subset of the IP-geolocation payload.
#[derive(Debug, Deserialize)]
pub struct GeoLocation {
    pub country: Option<String>,
}
