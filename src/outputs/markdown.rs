//! Markdown rendering of a scraped page.

use std::fmt::Write;

use crate::models::{Article, ScrapeResult};

/// One line per article: `N. Title — Category | date`.
///
/// # Arguments
///
/// * `page` - Listing page number, shown in the header line
/// * `result` - The scraped page, in the order it should be listed
///
/// # Returns
///
/// The list followed by a pagination hint line.
pub fn page_to_list(page: u32, result: &ScrapeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Página {page} ({} artículos)", result.articles.len());
    for (index, article) in result.articles.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} — {} | {}",
            index + 1,
            article.title,
            article.category,
            article.date
        );
    }
    let _ = writeln!(out, "{}", pagination_line(result));
    out
}

/// Full digest: every article body followed by its source link.
pub fn page_to_markdown(page: u32, result: &ScrapeResult) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "<!-- página {page} -->\n");
    for article in &result.articles {
        article_to_markdown(&mut md, article);
    }
    let _ = writeln!(md, "_{}_", pagination_line(result));
    md
}

fn article_to_markdown(md: &mut String, article: &Article) {
    let _ = writeln!(md, "{}\n", article.body.trim_end());
    let _ = writeln!(
        md,
        "*{} · {}* — [fuente]({})\n",
        article.category, article.date, article.link
    );
    md.push_str("---\n\n");
}

fn pagination_line(result: &ScrapeResult) -> String {
    match (result.can_go_back, result.can_continue) {
        (true, true) => "← anterior | siguiente →".to_string(),
        (true, false) => "← anterior".to_string(),
        (false, true) => "siguiente →".to_string(),
        (false, false) => "sin más páginas".to_string(),
    }
}
