//! Data models for scraped articles and listing pages.
//!
//! - [`Article`]: one normalized detail page
//! - [`ScrapeResult`]: the articles of one listing page plus its pagination flags
//! - [`Category`] / [`CategoryFilter`]: the site sections and how callers select them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A normalized news article.
///
/// Every field is populated; pages that cannot fill all of them are dropped
/// during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Article {
    /// Plain-text headline.
    pub title: String,
    /// Publish time as `YYYY-MM-DD HH:MM:SS`.
    pub date: String,
    /// Section label as printed on the page.
    pub category: String,
    /// Numeric section id from the page's `categoria_<id>` marker.
    pub category_id: u32,
    /// Markdown body, starting with the title as a heading.
    pub body: String,
    /// Absolute URL the article was fetched from.
    pub link: String,
}

/// Articles scraped from one listing page.
///
/// `articles` is in fetch-completion order; use
/// [`ScrapeResult::sort_newest_first`] for a stable presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrapeResult {
    pub articles: Vec<Article>,
    /// The listing page links to a next page.
    pub can_continue: bool,
    /// The listing page links to a previous page.
    pub can_go_back: bool,
}

impl ScrapeResult {
    /// Order articles by publish date, newest first. Ties keep their order.
    pub fn sort_newest_first(&mut self) {
        self.articles.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Articles belonging to `filter`, in current order.
    pub fn in_category(&self, filter: CategoryFilter) -> impl Iterator<Item = &Article> {
        self.articles.iter().filter(move |a| filter.matches(a))
    }

    /// Keep only the articles belonging to `filter`.
    pub fn retain_category(&mut self, filter: CategoryFilter) {
        self.articles.retain(|a| filter.matches(a));
    }
}

/// Site sections with a dedicated tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Policiales,
    Sociedad,
    Automotores,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Policiales, Category::Sociedad, Category::Automotores];

    /// The id carried in the page's `categoria_<id>` marker.
    pub fn id(self) -> u32 {
        match self {
            Category::Policiales => 8,
            Category::Sociedad => 48,
            Category::Automotores => 75,
        }
    }

    /// The section name as printed in the page's `.titulo` element.
    pub fn label(self) -> &'static str {
        match self {
            Category::Policiales => "Policiales",
            Category::Sociedad => "Sociedad",
            Category::Automotores => "Automotores",
        }
    }

    /// Look up a known section by its marker id.
    ///
    /// # Returns
    ///
    /// `None` for ids without a dedicated tab.
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Which articles a caller wants to see.
///
/// Id `0` is never printed by the site and is reserved for "all sections".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Id(u32),
}

impl CategoryFilter {
    /// Filter for a marker id; `0` selects every section.
    pub fn from_id(id: u32) -> Self {
        if id == 0 { Self::All } else { Self::Id(id) }
    }

    /// Whether `article` belongs to the selected section.
    pub fn matches(self, article: &Article) -> bool {
        match self {
            Self::All => true,
            Self::Id(id) => article.category_id == id,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Id(category.id())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    /// Accepts `all`, a section name (any case) or a numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Some(category) = Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
        {
            return Ok(category.into());
        }
        s.parse::<u32>()
            .map(Self::from_id)
            .map_err(|_| format!("unknown category {s:?}; expected all, policiales, sociedad, automotores or a numeric id"))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Id(id) => match Category::from_id(*id) {
                Some(category) => f.write_str(category.label()),
                None => write!(f, "{id}"),
            },
        }
    }
}
