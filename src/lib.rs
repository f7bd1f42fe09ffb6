//! book-scraper - polite paginated scraper for the books.toscrape.com catalog
//!
//! Walks the listing pages, extracts one record per catalog entry and
//! exports the collection as CSV and JSON.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod format;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::models::{Availability, Book};
pub use catalog::paginator::{ScrapeRun, StopReason};
pub use config::Config;
pub use error::{ExportError, ExtractionError, FetchError, TransportError};
