//! book-scraper - polite paginated scraper for the books.toscrape.com catalog.

use anyhow::Result;
use book_scraper::commands::ScrapeCommand;
use book_scraper::config::Config;
use book_scraper::format;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "book-scraper",
    version,
    about = "Scrape the books.toscrape.com catalog to CSV and JSON",
    long_about = "Follows the catalog's pagination until at least the target number of books \
                  is collected, with retries and polite delays, then writes books_data.csv \
                  and books_data.json."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Handled failures never change the exit status
    if let Err(e) = run(cli).await {
        error!("Scraping failed: {:#}", e);
        println!("\nError: {:#}", e);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?.with_env();

    let cmd = ScrapeCommand::new(config);
    let base_url = cmd.base_url()?;

    println!("{}\n", format::banner(base_url.host_str().unwrap_or(base_url.as_str())));

    cmd.execute().await?;

    Ok(())
}
