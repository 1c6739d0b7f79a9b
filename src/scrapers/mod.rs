//! Scraping pipeline for the Que Pensás Chacabuco news site.
//!
//! Scraping a page follows a two-phase pattern:
//!
//! 1. **Indexing**: fetch the listing page and collect teaser links and
//!    pagination flags ([`listing`])
//! 2. **Fetching**: fetch every linked detail page concurrently and turn each
//!    into an [`Article`](crate::models::Article) ([`coordinator`], [`article`])
//!
//! Publish dates are printed in Spanish and are normalized by [`dates`].
//!
//! # Failure policy
//!
//! | Failure | Effect |
//! |---------|--------|
//! | listing fetch | whole call fails with [`FetchError`] |
//! | detail fetch | logged, article missing from the result |
//! | detail parse | logged, article missing from the result |

pub mod article;
pub mod coordinator;
pub mod dates;
pub mod listing;

use tracing::instrument;

use crate::config::SiteConfig;
use crate::error::FetchError;
use crate::fetch::HttpFetcher;
use crate::models::ScrapeResult;
use coordinator::Coordinator;

/// Scrape listing page `page` of the default site.
///
/// # Errors
///
/// Returns [`FetchError`] when the listing page itself cannot be fetched.
pub async fn scrape_page(page: u32) -> Result<ScrapeResult, FetchError> {
    scrape_page_with(&SiteConfig::default(), page).await
}

/// Scrape listing page `page` of the site described by `config`.
///
/// Every request is confined to `config.allowed_domain`; detail links
/// pointing elsewhere are dropped like any other failed detail fetch.
///
/// # Arguments
///
/// * `config` - Site address, allowed domain, timeout and user agent
/// * `page` - Listing page number, used verbatim in `/entradas/<page>/`
///
/// # Returns
///
/// The articles that could be extracted plus the listing's pagination flags.
///
/// # Errors
///
/// Returns [`FetchError`] when the HTTP client cannot be built or the
/// listing page itself cannot be fetched.
#[instrument(level = "info", skip(config), fields(base_url = %config.base_url))]
pub async fn scrape_page_with(config: &SiteConfig, page: u32) -> Result<ScrapeResult, FetchError> {
    let fetcher = HttpFetcher::new(config)?;
    Coordinator::new(fetcher).run(&config.listing_url(page)).await
}
