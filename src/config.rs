//! Target site configuration.
//!
//! All requests of one scrape are confined to [`SiteConfig::allowed_domain`],
//! which is derived from the base URL's host.

use std::time::Duration;

use url::Url;

use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://www.quepensaschacabuco.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Where and how to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Scheme and host of the site, without a trailing slash.
    pub base_url: String,
    /// Host every fetched URL must belong to.
    pub allowed_domain: String,
    /// Overall per-request timeout of the HTTP client.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            allowed_domain: "www.quepensaschacabuco.com".to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl SiteConfig {
    /// Configuration for another base URL; the allowed domain becomes its host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `base_url` does not parse or has
    /// no host.
    pub fn from_base_url(base_url: &str) -> Result<Self, FetchError> {
        let parsed = Url::parse(base_url).map_err(|source| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        let host = parsed.host_str().ok_or_else(|| FetchError::InvalidUrl {
            url: base_url.to_string(),
            source: url::ParseError::EmptyHost,
        })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            allowed_domain: host.to_string(),
            ..Self::default()
        })
    }

    /// Replace the per-request timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout` - Upper bound for one request, body read included
    ///
    /// # Returns
    ///
    /// The updated configuration, for chaining after [`SiteConfig::from_base_url`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Listing URL for `page`: `{base}/entradas/{page}/`, page used verbatim.
    pub fn listing_url(&self, page: u32) -> String {
        format!("{}/entradas/{}/", self.base_url, page)
    }
}
