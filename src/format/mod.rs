//! Human-readable console output for a scrape run.

use crate::catalog::Book;
use std::path::Path;

const RULE_WIDTH: usize = 60;
const SAMPLE_SIZE: usize = 3;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Banner printed before the run starts.
pub fn banner(host: &str) -> String {
    let mut lines = Vec::new();

    lines.push(rule('='));
    lines.push(format!("Book Scraper - {}", host));
    lines.push(rule('='));
    lines.push(String::new());
    lines.push("Note: This website allows scraping (check robots.txt)".to_string());
    lines.push("Implementing responsible scraping with delays...".to_string());

    lines.join("\n")
}

/// Record total, printed as soon as the crawl ends.
pub fn scraped_count(count: usize) -> String {
    [String::new(), rule('='), format!("Successfully scraped {} books!", count), rule('=')]
        .join("\n")
}

/// A sample of the first records and the output files, printed after export.
pub fn run_summary(books: &[Book], files: &[&Path]) -> String {
    let mut lines = Vec::new();

    if !books.is_empty() {
        lines.push(String::new());
        lines.push(format!("Sample of scraped data (first {} books):", SAMPLE_SIZE));
        lines.push(rule('-'));

        for (i, book) in books.iter().take(SAMPLE_SIZE).enumerate() {
            lines.push(String::new());
            lines.push(format_book(i + 1, book));
        }
    }

    lines.push(String::new());
    lines.push(rule('='));
    lines.push("Data exported to:".to_string());
    for file in files {
        lines.push(format!("  - {}", file.display()));
    }
    lines.push(rule('='));

    lines.join("\n")
}

fn format_book(index: usize, book: &Book) -> String {
    [
        format!("Book {}:", index),
        format!("  Title: {}", book.title),
        format!("  Price: {}", book.price),
        format!("  Rating: {} stars", book.rating),
        format!("  Availability: {}", book.availability),
        format!("  URL: {}", book.product_url),
    ]
    .join("\n")
}
