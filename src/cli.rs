//! Command-line interface definitions.
//!
//! All site options can also be provided through environment variables.

use std::time::Duration;

use chacabuco_news::{CategoryFilter, FetchError, SiteConfig};
use clap::{Parser, ValueEnum};

/// How the scraped page is printed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Numbered list of titles, categories and dates
    #[default]
    List,
    /// The page as pretty-printed JSON
    Json,
    /// Every article body as a Markdown digest
    Markdown,
}

/// Scrape one listing page and print its articles, newest first.
///
/// # Examples
///
/// ```sh
/// # First page, titles only
/// chacabuco_news
///
/// # Third page, police news only, as Markdown
/// chacabuco_news --page 3 --category policiales --format markdown
///
/// # Also keep a JSON copy on disk
/// chacabuco_news -p 2 -o ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page number
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Section to show: all, policiales, sociedad, automotores or a numeric id (0 = all)
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::List)]
    pub format: Format,

    /// Directory to also write page_<n>.json into
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Base URL of the news site
    #[arg(long, env = "CHACABUCO_BASE_URL", default_value = chacabuco_news::config::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CHACABUCO_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Check that the site answers before scraping
    #[arg(long)]
    pub check_server: bool,
}

impl Cli {
    /// Site configuration described by the flags.
    pub fn site_config(&self) -> Result<SiteConfig, FetchError> {
        SiteConfig::from_base_url(&self.base_url)
            .map(|config| config.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["chacabuco_news"]);
        assert_eq!(cli.page, 1);
        assert_eq!(cli.category, CategoryFilter::All);
        assert_eq!(cli.format, Format::List);
        assert!(cli.output_dir.is_none());
        assert!(!cli.check_server);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "chacabuco_news",
            "-p",
            "4",
            "-c",
            "sociedad",
            "-f",
            "json",
            "-o",
            "/tmp/json",
        ]);
        assert_eq!(cli.page, 4);
        assert_eq!(cli.category, CategoryFilter::Id(48));
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/json"));
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["chacabuco_news", "--category", "deportes"]).is_err());
    }

    #[test]
    fn test_site_config_from_flags() {
        let cli = Cli::parse_from([
            "chacabuco_news",
            "--base-url",
            "http://localhost:9000",
            "--timeout-secs",
            "5",
        ]);
        let config = cli.site_config().unwrap();
        assert_eq!(config.allowed_domain, "localhost");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.listing_url(1), "http://localhost:9000/entradas/1/");
    }
}
