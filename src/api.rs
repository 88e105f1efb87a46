//! HTTP access to the news backend and the IP-geolocation service.
//!
//! # Architecture
//!
//! - [`NewsSource`]: the two operations the screen needs
//! - [`NewsClient`]: reqwest-backed implementation talking to the real services
//!
//! Nothing here retries. A failure is returned once and the screen turns it
//! into a single line of text.

use crate::config::AppConfig;
use crate::error::{NewsError, Result};
use crate::models::{Category, CountryCode, FetchResult, GeoLocation, NewsResponse, Query};
use crate::utils::truncate_for_log;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Path of the news endpoint below the configured base URL.
const NEWS_PATH: [&str; 4] = ["api", "v1", "news", ""];

/// Source of news and of the caller's country.
///
/// Implementors do the I/O; the screen only sequences calls and keeps state.
pub trait NewsSource {
    /// Look up the caller's country.
    ///
    /// Returns `None` on any failure. Failures are logged, never surfaced.
    async fn resolve_country(&self) -> Option<CountryCode>;

    /// Fetch the feed for `query`.
    ///
    /// # Errors
    ///
    /// - [`NewsError::CountryNotSelected`] when `query.country` is unset; no
    ///   request is made in that case
    /// - transport, status and decoding failures
    ///
    /// An `error` field inside an otherwise valid payload is not an `Err`; it
    /// is carried in [`FetchResult::error`] next to any partial items.
    async fn fetch_news(&self, query: &Query) -> Result<FetchResult>;
}

/// Client for the news API and the geolocation lookup.
#[derive(Debug, Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    news_endpoint: Url,
    geolocation_url: Url,
}

impl NewsClient {
    /// Build a client for `news_api_base` and `geolocation_url`.
    ///
    /// # Arguments
    ///
    /// * `news_api_base` - Backend root; `/api/v1/news/` is appended to its path
    /// * `geolocation_url` - Endpoint answering `{ "country": "US", ... }`
    /// * `timeout` - Applied to every request made by this client
    ///
    /// # Errors
    ///
    /// Fails if the base URL cannot carry a path or the HTTP client cannot be
    /// constructed.
    pub fn new(news_api_base: &Url, geolocation_url: Url, timeout: Duration) -> Result<Self> {
        let mut news_endpoint = news_api_base.clone();
        news_endpoint
            .path_segments_mut()
            .map_err(|_| NewsError::Config(format!("'{}' cannot be used as a base URL", news_api_base)))?
            .pop_if_empty()
            .extend(NEWS_PATH);
        news_endpoint.set_query(None);

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("localnews/", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(%news_endpoint, %geolocation_url, ?timeout, "Built news client");
        Ok(Self {
            http,
            news_endpoint,
            geolocation_url,
        })
    }

    /// Build a client from resolved settings. See [`NewsClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.news_api_base,
            config.geolocation_url.clone(),
            config.request_timeout,
        )
    }

    /// Full request URL for one country/category pair.
    ///
    /// # Returns
    ///
    /// `{news_api_base}/api/v1/news/?country={cc}&category={cat}`, with both
    /// values form-encoded.
    pub fn news_url(&self, country: &CountryCode, category: Category) -> Url {
        let mut url = self.news_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("country", country.as_str())
            .append_pair("category", category.as_str());
        url
    }

    async fn lookup_country(&self) -> Result<CountryCode> {
        let resp = self.http.get(self.geolocation_url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NewsError::Status(status.as_u16()));
        }
        let geo: GeoLocation = resp.json().await?;
        let raw = geo.country.ok_or(NewsError::InvalidResponse)?;
        raw.parse::<CountryCode>().map_err(|e| {
            debug!(%raw, error = %e, "Geolocation returned an unusable country");
            NewsError::InvalidResponse
        })
    }
}

impl NewsSource for NewsClient {
    #[instrument(level = "info", skip_all, fields(url = %self.geolocation_url))]
    async fn resolve_country(&self) -> Option<CountryCode> {
        let t0 = Instant::now();
        match self.lookup_country().await {
            Ok(country) => {
                info!(%country, elapsed_ms = t0.elapsed().as_millis(), "Resolved country from IP");
                Some(country)
            }
            Err(e) => {
                warn!(error = %e, elapsed_ms = t0.elapsed().as_millis(), "Failed to fetch location");
                None
            }
        }
    }

    #[instrument(level = "info", skip_all, fields(country = ?query.country, category = %query.category))]
    async fn fetch_news(&self, query: &Query) -> Result<FetchResult> {
        let country = query.country.as_ref().ok_or(NewsError::CountryNotSelected)?;
        let url = self.news_url(country, query.category);

        let t0 = Instant::now();
        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "News API returned an error status");
            return Err(NewsError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            warn!(%url, "News API returned an empty body");
            return Err(NewsError::InvalidResponse);
        }

        let payload: Option<NewsResponse> = serde_json::from_str(&body).map_err(|e| {
            warn!(
                %url,
                error = %e,
                response_preview = %truncate_for_log(&body, 300),
                "News API returned non-conforming JSON"
            );
            e
        })?;
        let result = FetchResult::from(payload.ok_or(NewsError::InvalidResponse)?);

        info!(
            count = result.items.len(),
            has_message = result.message.is_some(),
            has_error = result.error.is_some(),
            elapsed_ms = t0.elapsed().as_millis(),
            "Fetched news"
        );
        if let Some(err) = &result.error {
            warn!(error = %err, "News API reported an error in its payload");
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{any, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NewsClient {
        let base = Url::parse(&server.uri()).unwrap();
        let geo = base.join("/json").unwrap();
        NewsClient::new(&base, geo, Duration::from_secs(5)).unwrap()
    }

    fn query(country: &str, category: Category) -> Query {
        Query {
            country: Some(country.parse().unwrap()),
            category,
        }
    }

    #[test]
    fn test_news_url_format() {
        let base = Url::parse("http://10.0.2.2:8000").unwrap();
        let geo = Url::parse("https://ipinfo.io/json").unwrap();
        let client = NewsClient::new(&base, geo, Duration::from_secs(1)).unwrap();

        let url = client.news_url(&"us".parse().unwrap(), Category::Technology);
        assert_eq!(
            url.as_str(),
            "http://10.0.2.2:8000/api/v1/news/?country=us&category=technology"
        );
    }

    #[test]
    fn test_news_url_keeps_base_path_prefix() {
        let base = Url::parse("https://example.com/backend/").unwrap();
        let geo = Url::parse("https://ipinfo.io/json").unwrap();
        let client = NewsClient::new(&base, geo, Duration::from_secs(1)).unwrap();

        let url = client.news_url(&"de".parse().unwrap(), Category::General);
        assert_eq!(
            url.as_str(),
            "https://example.com/backend/api/v1/news/?country=de&category=general"
        );
    }

    #[tokio::test]
    async fn test_fetch_without_country_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.fetch_news(&Query::default()).await.unwrap_err();
        assert!(matches!(err, NewsError::CountryNotSelected));
        assert_eq!(err.user_message(), "Please select a country.");
    }

    #[tokio::test]
    async fn test_fetch_maps_items_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/news/"))
            .and(query_param("country", "us"))
            .and(query_param("category", "general"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news_data": [{
                    "title": "A",
                    "author": "Reporter",
                    "description": "Something happened",
                    "image": "https://img.example/a.png",
                    "url": "https://news.example/a",
                    "published_at": "2024-05-01T12:00:00Z"
                }],
                "message": "Top headlines"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_news(&query("us", Category::General))
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        let item = &result.items[0];
        assert_eq!(item.title, "A");
        assert_eq!(item.author.as_deref(), Some("Reporter"));
        assert_eq!(item.description, "Something happened");
        assert_eq!(item.image.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(item.url, "https://news.example/a");
        assert_eq!(item.published_at, "2024-05-01T12:00:00Z");
        assert_eq!(result.message.as_deref(), Some("Top headlines"));
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_fetch_absent_news_data_is_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "No news" })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_news(&query("fr", Category::Health))
            .await
            .unwrap();

        assert!(result.items.is_empty());
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn test_fetch_payload_error_keeps_partial_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news_data": [{ "title": "Partial", "url": "https://news.example/p" }],
                "error": "Upstream rate limit"
            })))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_news(&query("gb", Category::Sports))
            .await
            .unwrap();

        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].title, "Partial");
        assert_eq!(result.error.as_deref(), Some("Upstream rate limit"));
    }

    #[tokio::test]
    async fn test_fetch_tolerates_null_fields_in_one_item() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/news/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "news_data": [
                    {
                        "title": "A",
                        "author": "Reporter",
                        "description": "Full story",
                        "image": "https://img.example/a.png",
                        "url": "https://news.example/a",
                        "published_at": "2024-05-01T12:00:00Z"
                    },
                    {
                        "title": "B",
                        "author": null,
                        "description": null,
                        "image": null,
                        "url": "https://news.example/b",
                        "published_at": null
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server)
            .fetch_news(&query("us", Category::General))
            .await
            .unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].description, "Full story");
        let sparse = &result.items[1];
        assert_eq!(sparse.title, "B");
        assert_eq!(sparse.description, "");
        assert_eq!(sparse.published_at, "");
        assert_eq!(sparse.image, None);
        assert_eq!(sparse.display_author(), "Unknown Author");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_news(&query("us", Category::General))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Request failed with status code 500");
    }

    #[tokio::test]
    async fn test_fetch_null_body_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_news(&query("us", Category::General))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid response from server.");
    }

    #[tokio::test]
    async fn test_fetch_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_news(&query("us", Category::General))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Decode(_)));
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_country_lowercases() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ip": "203.0.113.9",
                "country": "NZ",
                "city": "Wellington"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let country = client_for(&server).resolve_country().await;
        assert_eq!(country.unwrap().as_str(), "nz");
    }

    #[tokio::test]
    async fn test_resolve_country_failure_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).resolve_country().await, None);
    }

    #[tokio::test]
    async fn test_resolve_country_missing_field_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ip": "203.0.113.9" })))
            .mount(&server)
            .await;

        assert_eq!(client_for(&server).resolve_country().await, None);
    }
}
