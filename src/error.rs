use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsiderError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Access denied for URL: {0}")]
    AccessDenied(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, InsiderError>;
