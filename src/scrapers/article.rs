//! Detail page extraction.
//!
//! A detail page wraps the article in a `.noticia-detalle` container whose
//! class list also carries a `categoria_<id>` marker. Inside it:
//!
//! | Selector | Field |
//! |----------|-------|
//! | `.titulo2` | title |
//! | `.titulo` | category label |
//! | `.noticia-detalle-info` | publish date (Spanish free text) |
//! | `.resumen` | body HTML |
//!
//! The body is cleaned of ad slots and widgets, prefixed with the title as an
//! `<h1>`, and converted to Markdown.
//!
//! A page yields at most one article. Should the site ever print several
//! `.noticia-detalle` containers, only the first is read.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::ExtractError;
use crate::models::Article;
use crate::scrapers::dates::normalize_spanish_date;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static CONTAINER: Lazy<Selector> = Lazy::new(|| selector(".noticia-detalle"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector(".titulo2"));
static CATEGORY: Lazy<Selector> = Lazy::new(|| selector(".titulo"));
static INFO: Lazy<Selector> = Lazy::new(|| selector(".noticia-detalle-info"));
static BODY: Lazy<Selector> = Lazy::new(|| selector(".resumen"));

static CATEGORY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"categoria_(\d+)").expect("static regex"));

/// Sub-elements dropped from the body: in-text ad slot, share buttons, image
/// carousels, dead `javascript:void(0)` links and the site's decorative
/// sub-headings.
static NOISE: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "#publi-entre-parrafos",
        ".share-block",
        ".owl-carousel",
        "[href*='javascript:void(0)']",
        ".qpch2",
    ]
    .into_iter()
    .map(selector)
    .collect()
});

/// Extract an [`Article`] from a fetched detail page.
///
/// `url` is the address the page was fetched from and becomes the article's
/// link.
///
/// # Errors
///
/// Any [`ExtractError`] means the page yields no article; it never affects
/// other pages.
#[instrument(level = "debug", skip(html), fields(bytes = html.len()))]
pub fn extract_article(html: &str, url: &str) -> Result<Article, ExtractError> {
    let mut document = Html::parse_document(html);
    let container = document
        .select(&CONTAINER)
        .next()
        .ok_or(ExtractError::MissingContainer)?;

    let classes = container.value().attr("class").unwrap_or_default();
    let category_id = CATEGORY_MARKER
        .captures(classes)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ExtractError::MissingCategoryMarker {
            classes: classes.to_string(),
        })?
        .as_str()
        .parse::<u32>()?;

    let title = child_text(container, &TITLE);
    let category = child_text(container, &CATEGORY);
    let info = child_text(container, &INFO);
    if title.is_empty() {
        return Err(ExtractError::MissingField("title"));
    }
    if category.is_empty() {
        return Err(ExtractError::MissingField("category"));
    }

    let heading = container
        .select(&TITLE)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default();
    let body = container
        .select(&BODY)
        .next()
        .ok_or(ExtractError::MissingBody)?;
    let body_id = body.id();
    let noise: Vec<_> = body
        .descendants()
        .filter(|node| {
            node.value().is_comment() || ElementRef::wrap(*node).is_some_and(|el| is_noise(&el))
        })
        .map(|node| node.id())
        .collect();

    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    let body_html = document
        .tree
        .get(body_id)
        .and_then(ElementRef::wrap)
        .map(|el| el.inner_html())
        .ok_or(ExtractError::MissingBody)?;
    let fragment = format!("<h1>{}</h1>{body_html}", heading.trim());

    let markdown = htmd::convert(&fragment).map_err(ExtractError::Markdown)?;
    let date = normalize_spanish_date(&info)?;

    debug!(%title, %date, category_id, "Extracted article");
    Ok(Article {
        title,
        date,
        category,
        category_id,
        body: markdown,
        link: url.to_string(),
    })
}

/// Concatenated, trimmed text of every descendant matching `selector`.
fn child_text(scope: ElementRef<'_>, selector: &Selector) -> String {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_noise(element: &ElementRef<'_>) -> bool {
    NOISE.iter().any(|s| s.matches(element))
}
