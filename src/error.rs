//! Error types for the scrape pipeline.
//!
//! Only [`FetchError`] on the listing page ever reaches the caller of
//! [`crate::scrape_page`]. Detail-page fetch failures reuse the same type but
//! are logged and dropped by the coordinator, and [`ExtractError`] /
//! [`DateError`] describe why a single document produced no article.

use reqwest::StatusCode;

/// Failure to retrieve a page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL points outside the configured domain.
    #[error("{url} is outside the allowed domain {allowed}")]
    ForbiddenDomain { url: String, allowed: String },

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network failure, refused redirect or body read failure.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status { url: String, status: StatusCode },
}

/// Why a detail page was skipped.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no .noticia-detalle container")]
    MissingContainer,

    #[error("no categoria_<id> marker in container classes {classes:?}")]
    MissingCategoryMarker { classes: String },

    #[error("invalid category id: {0}")]
    InvalidCategoryId(#[from] std::num::ParseIntError),

    #[error("empty {0}")]
    MissingField(&'static str),

    #[error("no .resumen body")]
    MissingBody,

    #[error("markdown conversion failed: {0}")]
    Markdown(#[source] std::io::Error),

    #[error(transparent)]
    Date(#[from] DateError),
}

/// A publish-date string that does not match the site's layout.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("no weekday prefix in {0:?}")]
    MissingWeekday(String),

    #[error("unknown weekday {0:?}")]
    UnknownWeekday(String),

    /// The day of month is not written with exactly two digits.
    #[error("day {0:?} is not a two-digit day of month")]
    Day(String),

    #[error("{cleaned:?} does not match `Weekday, DD Month YYYY HH:MM Hs`: {source}")]
    Layout {
        cleaned: String,
        #[source]
        source: chrono::ParseError,
    },
}
