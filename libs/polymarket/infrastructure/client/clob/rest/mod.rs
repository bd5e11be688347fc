//! REST API client for Polymarket CLOB
//!
//! Only the public, unauthenticated read endpoints are used:
//! - `queries`: order book and last trade price

mod queries;

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Fixed per-request timeout for CLOB calls
pub const CLOB_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The CLOB has no book for this token: the market closed or rolled over
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),
}

impl RestError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, RestError>;

/// REST API client for Polymarket CLOB
pub struct RestClient {
    pub(crate) base_url: String,
    pub(crate) client: Client,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, CLOB_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
