//! # Chacabuco News
//!
//! Scrapes the paginated listing of a Spanish-language local news site,
//! follows every teaser to its detail page concurrently, and returns the
//! articles normalized to Markdown together with the listing's pagination
//! flags.
//!
//! ## Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), chacabuco_news::FetchError> {
//! let mut page = chacabuco_news::scrape_page(1).await?;
//! page.sort_newest_first();
//! for article in &page.articles {
//!     println!("{} ({})", article.title, article.date);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Indexing**: fetch `/entradas/<n>/` and collect teaser links
//! 2. **Fetching**: one task per link fetches and parses its article
//! 3. **Aggregation**: finished articles are pushed into a shared collection
//!
//! Only a failure to fetch the listing page is reported as an error; broken
//! detail pages are logged and simply missing from the result.

pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;

pub use config::SiteConfig;
pub use error::{DateError, ExtractError, FetchError};
pub use fetch::{HttpFetcher, PageFetcher, check_server};
pub use models::{Article, Category, CategoryFilter, ScrapeResult};
pub use scrapers::{scrape_page, scrape_page_with};
