//! JSON output of a scraped page.
//!
//! Files land in the output directory as `page_<n>.json`, one per scraped
//! listing page; a later scrape of the same page overwrites the file.

use std::error::Error;
use std::path::PathBuf;

use tokio::fs;
use tracing::{info, instrument};

use crate::models::ScrapeResult;
use crate::utils::ensure_writable_dir;

/// Write `result` to `{json_output_dir}/page_{page}.json`.
///
/// # Arguments
///
/// * `result` - The scraped page to serialize
/// * `json_output_dir` - Directory to write into; created if missing
/// * `page` - Listing page number, used in the file name
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Fails if the directory is not writable or the write itself fails.
#[instrument(level = "info", skip(result), fields(articles = result.articles.len()))]
pub async fn write_page(
    result: &ScrapeResult,
    json_output_dir: &str,
    page: u32,
) -> Result<PathBuf, Box<dyn Error>> {
    ensure_writable_dir(json_output_dir).await?;

    let json = serde_json::to_string_pretty(result)?;
    let path = PathBuf::from(json_output_dir).join(format!("page_{page}.json"));

    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON page file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::article;

    #[tokio::test]
    async fn test_write_page_round_trips() {
        let dir = std::env::temp_dir().join(format!("chacabuco_news_json_{}", std::process::id()));
        let dir_str = dir.to_str().unwrap();
        let result = ScrapeResult {
            articles: vec![article("uno", "2024-03-03 14:30:00", 8)],
            can_continue: true,
            can_go_back: false,
        };

        let path = write_page(&result, dir_str, 3).await.unwrap();
        assert!(path.ends_with("page_3.json"));

        let written: ScrapeResult =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, result);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
