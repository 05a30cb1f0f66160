use async_trait::async_trait;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware, state::InMemoryState,
    state::NotKeyed,
};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::time::sleep;

use super::config::InsiderConfig;
use super::error::{InsiderError, Result};
use super::fetch::Fetch;

/// Body marker the SEC serves when a client exceeds the fair access request rate.
pub(crate) const RATE_LIMIT_MARKER: &str = "Request Rate Threshold Exceeded";

/// Body marker of an S3-style access denied error page.
pub(crate) const ACCESS_DENIED_MARKER: &str = "AccessDenied";

type Governor = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// What a response body says about the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyStatus {
    /// Regular content.
    Content,
    /// The SEC throttled us; the same URL should be retried after a pause.
    RateLimited,
    /// Permanent failure for this URL.
    AccessDenied,
}

impl BodyStatus {
    /// Rate limiting is checked first: a throttle page is always retried, even if it
    /// happens to mention access being denied.
    pub(crate) fn classify(body: &str) -> Self {
        if body.contains(RATE_LIMIT_MARKER) {
            BodyStatus::RateLimited
        } else if body.contains(ACCESS_DENIED_MARKER) {
            BodyStatus::AccessDenied
        } else {
            BodyStatus::Content
        }
    }
}

/// HTTP client for downloading EDGAR daily indices and Form 4 filings.
///
/// `Insider` is the main entry point of the crate. It owns a `reqwest` client with the
/// user agent the SEC requires, a token bucket rate limiter, and the [`InsiderConfig`]
/// that drives the download pipeline (worker count, rate-limit pause, base URLs).
///
/// # Rate Limiting
///
/// SEC.gov allows automated clients at most 10 requests per second. Two mechanisms keep
/// the client under that limit:
///
/// - bulk fetches never have more than `concurrency` (default 9) requests in flight;
/// - every request waits for a token from a `governor` bucket refilled at `rate_limit`
///   tokens per second.
///
/// When the SEC still answers with its "Request Rate Threshold Exceeded" page, the client
/// sleeps for `rate_limit_pause` (630 seconds by default) and retries the same URL. By
/// default there is no cap on these retries; use
/// [`InsiderConfig::with_max_rate_limit_retries`] to bound them.
///
/// # Examples
///
/// ```rust
/// # use insiderkit::Insider;
/// let insider = Insider::new("my_app/1.0 (my@email.com)")?;
/// # Ok::<(), insiderkit::InsiderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Insider {
    /// HTTP client for making requests
    pub(crate) client: reqwest::Client,

    /// Token bucket rate limiter for SEC compliance
    pub(crate) rate_limiter: Arc<Governor>,

    /// Pipeline and retry settings
    pub(crate) config: InsiderConfig,
}

impl Insider {
    /// Creates a new client with default settings and the given user agent.
    ///
    /// The SEC asks automated clients to identify themselves with a contact address,
    /// e.g. `"AppName/Version (contact@email.com)"`.
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_config(InsiderConfig::new(user_agent))
    }

    /// Creates a client from a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `InsiderError::ConfigError` if the user agent is malformed, the rate limit
    /// or concurrency is zero, or the HTTP client cannot be built.
    pub fn with_config(config: InsiderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| InsiderError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        config.check_concurrency()?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| InsiderError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(config.rate_limit).ok_or_else(|| {
                InsiderError::ConfigError("Rate limit must be greater than zero".to_string())
            })?,
        )));

        Ok(Insider {
            client,
            rate_limiter,
            config,
        })
    }

    /// Fetches a URL as text, honoring the SEC's rate-limit page.
    ///
    /// # Retry Behavior
    ///
    /// - **Rate-limit page**: sleeps `rate_limit_pause` and retries the same URL, forever
    ///   unless `max_rate_limit_retries` is set
    /// - **Access denied page**: returns `AccessDenied` without retrying
    /// - **Network errors**: returned immediately, no retry
    /// - **Other non-success statuses**: `NotFound` for 404, `InvalidResponse` otherwise
    pub async fn get(&self, url: &str) -> Result<String> {
        let mut retries = 0;

        loop {
            self.rate_limiter.until_ready().await;

            let response = self.client.get(url).send().await?;
            let status = response.status();
            let body = response.text().await?;

            match BodyStatus::classify(&body) {
                BodyStatus::RateLimited => {
                    if let Some(max) = self.config.max_rate_limit_retries {
                        if retries >= max {
                            return Err(InsiderError::RateLimitExceeded);
                        }
                    }
                    tracing::warn!(
                        "Request rate threshold exceeded for {}. Sleeping {:?} before retry {}.",
                        url,
                        self.config.rate_limit_pause,
                        retries + 1
                    );
                    sleep(self.config.rate_limit_pause).await;
                    retries += 1;
                    continue;
                }
                BodyStatus::AccessDenied => {
                    return Err(InsiderError::AccessDenied(url.to_string()));
                }
                BodyStatus::Content => {}
            }

            return match status {
                s if s.is_success() => Ok(body),
                reqwest::StatusCode::NOT_FOUND => Err(InsiderError::NotFound),
                other => Err(InsiderError::InvalidResponse(format!(
                    "Unexpected status code: {} for URL: {}. Response preview: {}",
                    other,
                    url,
                    body.chars().take(200).collect::<String>()
                ))),
            };
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &InsiderConfig {
        &self.config
    }

    /// Returns the base URL for EDGAR archives.
    pub fn archives_url(&self) -> &str {
        &self.config.base_urls.archives
    }
}

#[async_trait]
impl Fetch for Insider {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.get(url).await
    }
}
