//! Listing page extraction.
//!
//! A listing page (`/entradas/<n>/`) holds one teaser per article. The
//! teaser's `.noticia1` block sits inside an element carrying the detail URL
//! in `data-link`. Pagination is a `.pagination` bar whose anchors read
//! `Siguiente` (next) and `Anterior` (previous).

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

static TEASER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[data-link] .noticia1").expect("static selector"));
static PAGINATION_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".pagination a").expect("static selector"));

const NEXT_LABEL: &str = "Siguiente";
const PREVIOUS_LABEL: &str = "Anterior";

/// Links and pagination flags discovered on one listing page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Absolute detail-page URLs, in document order.
    pub links: Vec<String>,
    /// A "next page" anchor was present.
    pub can_continue: bool,
    /// A "previous page" anchor was present.
    pub can_go_back: bool,
}

/// Scan a listing document for teaser links and pagination anchors.
///
/// Relative `data-link` values are resolved against `base`. A link that
/// appears twice on the page is kept once, since the site repeats featured
/// teasers and one run must not return the same article twice. Finding no
/// teasers at all is logged but is not an error.
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `base` - The listing page URL, used to resolve relative links
///
/// # Returns
///
/// The detail links in document order plus the pagination flags.
pub fn extract_listing(html: &str, base: &Url) -> Listing {
    let document = Html::parse_document(html);
    let mut listing = Listing::default();

    listing.links = document
        .select(&TEASER)
        .filter_map(|teaser| teaser.parent().and_then(ElementRef::wrap))
        .filter_map(|parent| parent.value().attr("data-link"))
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .filter_map(|link| match base.join(link) {
            Ok(resolved) => Some(resolved.to_string()),
            Err(e) => {
                warn!(link, error = %e, "Unresolvable teaser link");
                None
            }
        })
        .unique()
        .collect();

    for anchor in document.select(&PAGINATION_ANCHOR) {
        let label = anchor.text().collect::<String>();
        match label.trim() {
            NEXT_LABEL => listing.can_continue = true,
            PREVIOUS_LABEL => listing.can_go_back = true,
            _ => {}
        }
    }

    if listing.links.is_empty() {
        warn!(%base, "No teasers found on listing page; selector may be stale");
    }
    debug!(
        count = listing.links.len(),
        can_continue = listing.can_continue,
        can_go_back = listing.can_go_back,
        "Extracted listing"
    );

    listing
}
