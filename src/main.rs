//! # Chacabuco News CLI
//!
//! Scrapes one listing page of the news site and prints its articles,
//! newest first.
//!
//! ## Usage
//!
//! ```sh
//! chacabuco_news --page 2 --category policiales --format markdown
//! ```
//!
//! ## Pipeline
//!
//! 1. **Check** (optional): probe the site's front page
//! 2. **Scrape**: listing page, then every linked article concurrently
//! 3. **Present**: sort by date, filter by section, print
//! 4. **Output** (optional): write the page as JSON

use std::error::Error;

use chacabuco_news::outputs::{json, markdown};
use chacabuco_news::{check_server, scrape_page_with};
use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::{Cli, Format};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("chacabuco_news starting up");

    let args = Cli::parse();
    debug!(page = args.page, category = %args.category, format = ?args.format, "Parsed CLI arguments");

    let config = args.site_config()?;

    if args.check_server {
        let status = check_server(&config).await?;
        if !status.is_success() {
            error!(%status, base_url = %config.base_url, "Site is not answering normally");
            return Err(format!("{} answered {status}", config.base_url).into());
        }
        info!(%status, "Site is up");
    }

    let mut page = match scrape_page_with(&config, args.page).await {
        Ok(page) => page,
        Err(e) => {
            error!(page = args.page, error = %e, "Failed to scrape listing page");
            return Err(e.into());
        }
    };
    if page.articles.is_empty() {
        warn!(page = args.page, "Listing page produced no articles");
    }

    page.sort_newest_first();
    page.retain_category(args.category);
    info!(
        count = page.articles.len(),
        category = %args.category,
        can_continue = page.can_continue,
        can_go_back = page.can_go_back,
        "Page ready"
    );

    if let Some(dir) = &args.output_dir {
        if let Err(e) = json::write_page(&page, dir, args.page).await {
            error!(error = %e, "Failed to write JSON page");
        }
    }

    let rendered = match args.format {
        Format::List => markdown::page_to_list(args.page, &page),
        Format::Json => serde_json::to_string_pretty(&page)?,
        Format::Markdown => markdown::page_to_markdown(args.page, &page),
    };
    println!("{rendered}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
