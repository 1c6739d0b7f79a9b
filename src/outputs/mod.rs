//! Output generation for scraped pages.
//!
//! # Submodules
//!
//! - [`json`]: writes a [`ScrapeResult`](crate::models::ScrapeResult) to `page_<n>.json`
//! - [`markdown`]: renders a page as a numbered list or a full Markdown digest

pub mod json;
pub mod markdown;
