//! Two-phase fetch of a listing page and its articles.
//!
//! Phase one fetches the listing and collects its links and pagination flags.
//! Phase two spawns one task per link; each task fetches and parses its detail
//! page on its own and only takes the shared lock to push the finished
//! [`Article`]. The coordinator then waits for every task before returning.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::models::{Article, ScrapeResult};
use crate::scrapers::article::extract_article;
use crate::scrapers::listing::{Listing, extract_listing};
use crate::utils::truncate_for_log;

/// Drives one listing page through a [`PageFetcher`].
#[derive(Debug)]
pub struct Coordinator<F> {
    fetcher: Arc<F>,
}

impl<F> Clone for Coordinator<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

impl<F> Coordinator<F>
where
    F: PageFetcher + 'static,
{
    /// Wrap a fetcher for sharing across the per-article tasks.
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of listing and detail pages
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }

    /// Scrape the listing at `listing_url` and every article it links to.
    ///
    /// # Errors
    ///
    /// Only a failure to fetch the listing itself is returned. Detail pages
    /// that fail to fetch or parse are logged and left out of the result.
    #[instrument(level = "info", skip(self))]
    pub async fn run(&self, listing_url: &str) -> Result<ScrapeResult, FetchError> {
        let t0 = Instant::now();
        let base = Url::parse(listing_url).map_err(|source| FetchError::InvalidUrl {
            url: listing_url.to_string(),
            source,
        })?;

        let html = self.fetcher.fetch(listing_url).await?;
        let Listing {
            links,
            can_continue,
            can_go_back,
        } = extract_listing(&html, &base);
        info!(count = links.len(), can_continue, can_go_back, "Indexed listing page");

        let articles = Arc::new(Mutex::new(Vec::with_capacity(links.len())));
        let handles = links.into_iter().map(|link| {
            let fetcher = Arc::clone(&self.fetcher);
            let articles = Arc::clone(&articles);
            tokio::spawn(async move {
                if let Some(article) = fetch_article(fetcher.as_ref(), &link).await {
                    articles.lock().await.push(article);
                }
            })
        });

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                error!(error = %e, "Article task panicked");
            }
        }

        let articles = std::mem::take(&mut *articles.lock().await);
        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched article contents"
        );

        Ok(ScrapeResult {
            articles,
            can_continue,
            can_go_back,
        })
    }
}

/// Fetch and parse one detail page. Failures are logged, never returned.
async fn fetch_article<F: PageFetcher>(fetcher: &F, url: &str) -> Option<Article> {
    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            error!(%url, error = %e, "Article fetch failed");
            return None;
        }
    };
    match extract_article(&html, url) {
        Ok(article) => Some(article),
        Err(e) => {
            warn!(%url, error = %e, "Skipping article");
            debug!(%url, preview = %truncate_for_log(&html, 300), "Skipped page content");
            None
        }
    }
}
