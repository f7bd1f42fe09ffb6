//! Scrape command: one full crawl followed by both exports.

use crate::catalog::{
    CatalogClient, CatalogTransport, DelayPolicy, PageFetcher, Paginator, Parser, ScrapeRun,
    Sleeper, TokioSleeper,
};
use crate::config::Config;
use crate::error::ExportError;
use crate::export::{export_all, CsvExporter, ExportOutcome, Exporter, JsonExporter};
use crate::format;
use anyhow::{Context, Result};
use std::io::{self, Write};
use tracing::info;
use url::Url;

/// Everything one run produced.
#[derive(Debug)]
pub struct ScrapeReport {
    pub run: ScrapeRun,
    /// One entry per exporter, CSV first
    pub exports: Vec<Result<ExportOutcome, ExportError>>,
    /// Sample and output files, printed after the exports
    pub summary: String,
}

/// Executes a scrape run.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Catalog root the crawl starts from.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.config.base_url)
            .with_context(|| format!("Invalid base URL: {}", self.config.base_url))
    }

    /// Scrapes the live catalog, exports the results and prints progress to stdout.
    pub async fn execute(&self) -> Result<ScrapeReport> {
        let client = CatalogClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with(client, TokioSleeper, &mut io::stdout()).await
    }

    /// Executes with a provided transport, delay implementation and console (for testing).
    ///
    /// The record total is written before the exports run; the summary after.
    pub async fn execute_with<T, S, W>(
        &self,
        transport: T,
        sleeper: S,
        console: &mut W,
    ) -> Result<ScrapeReport>
    where
        T: CatalogTransport,
        S: Sleeper,
        W: Write,
    {
        let base_url = self.base_url()?;

        let fetcher =
            PageFetcher::with_sleeper(transport, sleeper, DelayPolicy::from_config(&self.config));
        let paginator = Paginator::new(fetcher, Parser::new(base_url.clone()))
            .reuse_listing_for_next_page(self.config.reuse_listing_for_next_page);

        let run = paginator.run(&base_url, self.config.target_records).await;
        info!(
            "Run finished after {} pages: {} ({} books)",
            run.pages_visited,
            run.stop_reason,
            run.books.len()
        );

        writeln!(console, "{}", format::scraped_count(run.books.len()))?;

        // Partial results are exported too
        let csv = CsvExporter::new(&self.config.csv_path);
        let json = JsonExporter::new(&self.config.json_path);
        let exporters: [&dyn Exporter; 2] = [&csv, &json];
        let exports = export_all(&exporters, &run.books);

        let summary = format::run_summary(&run.books, &[csv.path(), json.path()]);
        writeln!(console, "{}\n", summary)?;

        Ok(ScrapeReport { run, exports, summary })
    }
}
