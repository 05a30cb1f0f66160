use super::error::{InsiderError, Result};
use std::time::Duration;

/// Configuration for the Insider client
#[derive(Debug, Clone)]
pub struct InsiderConfig {
    /// User agent string for HTTP requests
    pub user_agent: String,
    /// Rate limit in requests per second
    pub rate_limit: u32,
    /// Maximum number of requests in flight during a bulk fetch
    pub concurrency: usize,
    /// HTTP request timeout
    pub timeout: Duration,
    /// How long to sleep after the SEC reports that the request rate threshold was exceeded
    pub rate_limit_pause: Duration,
    /// Upper bound on rate-limit retries for a single URL. `None` retries forever.
    pub max_rate_limit_retries: Option<u32>,
    /// Draw a progress bar while bulk fetching
    pub show_progress: bool,
    /// Base URLs for EDGAR services
    pub base_urls: InsiderUrls,
}

/// Base URLs for the EDGAR archives
#[derive(Debug, Clone)]
pub struct InsiderUrls {
    /// Base URL for EDGAR archives. Daily indices and filing documents both live below it.
    pub archives: String,
}

impl Default for InsiderConfig {
    fn default() -> Self {
        Self {
            user_agent: "insiderkit/0.1.0".to_string(),
            rate_limit: 10,
            // One under the SEC's 10 requests/second fair access limit.
            concurrency: 9,
            timeout: Duration::from_secs(30),
            rate_limit_pause: Duration::from_secs(630),
            max_rate_limit_retries: None,
            show_progress: false,
            base_urls: InsiderUrls::default(),
        }
    }
}

impl InsiderConfig {
    /// Creates a new InsiderConfig with the given user agent and default settings
    ///
    /// # Basic usage
    ///
    /// ```rust
    /// use insiderkit::{Insider, InsiderConfig};
    ///
    /// let config = InsiderConfig::new("YourAppName contact@example.com")
    ///     .with_show_progress(true);
    /// let insider = Insider::with_config(config)?;
    /// # Ok::<(), insiderkit::InsiderError>(())
    /// ```
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_rate_limit_pause(mut self, pause: Duration) -> Self {
        self.rate_limit_pause = pause;
        self
    }

    /// Caps how many times a rate-limited URL is retried before it is given up on.
    pub fn with_max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    pub fn with_show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn with_base_urls(mut self, base_urls: InsiderUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Bulk fetches need at least one request in flight.
    pub fn check_concurrency(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(InsiderError::ConfigError(
                "Concurrency must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InsiderUrls {
    fn default() -> Self {
        Self {
            archives: "https://www.sec.gov/Archives".to_string(),
        }
    }
}
