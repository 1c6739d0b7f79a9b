//! Page fetching.
//!
//! The scrape pipeline only ever needs "give me the HTML at this URL", so the
//! HTTP layer sits behind the narrow [`PageFetcher`] trait:
//!
//! - [`PageFetcher`]: fetch one URL and return its body
//! - [`HttpFetcher`]: the `reqwest` implementation, confined to one domain
//!
//! There is no retry: a failed request is reported once and the caller
//! decides what it means.

use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::SiteConfig;
use crate::error::FetchError;

/// Timeout of the pre-flight [`check_server`] request.
const CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirect hops followed before a request fails.
const MAX_REDIRECTS: usize = 10;

/// Fetch a single page.
///
/// Implementations must be shareable across tasks; the coordinator calls
/// `fetch` from one spawned task per detail link.
pub trait PageFetcher: Send + Sync {
    /// Return the body of `url`.
    ///
    /// # Errors
    ///
    /// Any network failure, non-success status or policy rejection.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// `reqwest`-backed [`PageFetcher`] restricted to one host.
///
/// The restriction covers redirects too: a `Location` pointing at another
/// host fails the request instead of being followed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    allowed_domain: String,
}

impl HttpFetcher {
    /// Build a client from the site configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be set up.
    pub fn new(config: &SiteConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(same_host_redirects(config.allowed_domain.clone()))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            allowed_domain: config.allowed_domain.clone(),
        })
    }

    fn check_domain(&self, url: &str) -> Result<(), FetchError> {
        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        if parsed.host_str() == Some(self.allowed_domain.as_str()) {
            Ok(())
        } else {
            Err(FetchError::ForbiddenDomain {
                url: url.to_string(),
                allowed: self.allowed_domain.clone(),
            })
        }
    }
}

/// Follow redirects only while they stay on `allowed_domain`.
fn same_host_redirects(allowed_domain: String) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.url().host_str() != Some(allowed_domain.as_str()) {
            let message = format!(
                "redirect to {} leaves the allowed domain {allowed_domain}",
                attempt.url()
            );
            attempt.error(message)
        } else if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.check_domain(url)?;

        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, elapsed_ms = t0.elapsed().as_millis() as u64, "Non-success response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}

/// Probe the site's front page and report its status code.
///
/// Any status is returned as-is; only transport failures are errors.
#[instrument(level = "info", skip_all, fields(base_url = %config.base_url))]
pub async fn check_server(config: &SiteConfig) -> Result<StatusCode, FetchError> {
    let client = Client::builder()
        .timeout(CHECK_TIMEOUT)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(FetchError::Client)?;
    let response = client
        .get(&config.base_url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: config.base_url.clone(),
            source,
        })?;
    let status = response.status();
    debug!(%status, "Server check finished");
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetcher_for(server: &MockServer) -> (SiteConfig, HttpFetcher) {
        let config = SiteConfig::from_base_url(&server.uri()).unwrap();
        let fetcher = HttpFetcher::new(&config).unwrap();
        (config, fetcher)
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/entradas/1/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let (config, fetcher) = fetcher_for(&server).await;
        let body = fetcher.fetch(&config.listing_url(1)).await.unwrap();
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (config, fetcher) = fetcher_for(&server).await;
        let err = fetcher.fetch(&config.listing_url(9)).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_fetch_outside_domain_is_rejected() {
        let config = SiteConfig::default();
        let fetcher = HttpFetcher::new(&config).unwrap();
        let err = fetcher
            .fetch("https://example.org/nota/1/")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::ForbiddenDomain { .. }));
    }

    #[tokio::test]
    async fn test_redirect_off_domain_is_refused() {
        let home = MockServer::start().await;
        let foreign = MockServer::start().await;
        // `localhost` is another host than the home server's `127.0.0.1`
        let foreign_url = format!("http://localhost:{}/x/", foreign.address().port());
        Mock::given(method("GET"))
            .and(path("/nota/1/"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", foreign_url.as_str()))
            .mount(&home)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("FOREIGN BODY"))
            .expect(0)
            .mount(&foreign)
            .await;

        let (config, fetcher) = fetcher_for(&home).await;
        let err = fetcher
            .fetch(&format!("{}/nota/1/", config.base_url))
            .await
            .unwrap_err();
        assert!(
            matches!(err, FetchError::Request { ref source, .. } if source.is_redirect()),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn test_redirect_on_domain_is_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/viejo/"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/nota/2/", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nota/2/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>movida</html>"))
            .mount(&server)
            .await;

        let (config, fetcher) = fetcher_for(&server).await;
        let body = fetcher
            .fetch(&format!("{}/viejo/", config.base_url))
            .await
            .unwrap();
        assert_eq!(body, "<html>movida</html>");
    }

    #[tokio::test]
    async fn test_fetch_invalid_url() {
        let fetcher = HttpFetcher::new(&SiteConfig::default()).unwrap();
        let err = fetcher.fetch("/relative/only").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_check_server_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (config, _) = fetcher_for(&server).await;
        let status = check_server(&config).await.unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
