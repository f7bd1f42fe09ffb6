//! Catalog scraping: transport, retrying fetcher, record extraction, pagination.

pub mod client;
pub mod fetcher;
pub mod models;
pub mod paginator;
pub mod parser;
pub mod selectors;
pub mod throttle;

pub use client::{CatalogClient, CatalogTransport};
pub use fetcher::{CatalogPage, PageFetcher};
pub use models::{Availability, Book};
pub use paginator::{CrawlCursor, Paginator, ScrapeRun, StopReason};
pub use parser::{Extraction, Parser};
pub use throttle::{DelayPolicy, Sleeper, TokioSleeper};
