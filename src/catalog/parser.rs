//! Record extraction from catalog listing pages.

use crate::catalog::models::{decode_rating, Availability, Book, NOT_AVAILABLE};
use crate::catalog::selectors::{entry, listing};
use crate::error::ExtractionError;
use scraper::{ElementRef, Html};
use tracing::{debug, error, trace};
use url::Url;

/// Result of extracting one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Records in document order; entries that failed extraction are absent
    pub books: Vec<Book>,
    /// Listing entries present in the document, including failed ones
    pub entries_found: usize,
}

/// Parser for catalog listing markup.
pub struct Parser {
    site_base: Url,
}

impl Parser {
    /// Creates a parser; image URLs resolve against `site_base`.
    pub fn new(site_base: Url) -> Self {
        Self { site_base }
    }

    /// Extracts every listing entry of `document`, in document order.
    ///
    /// An entry that cannot be extracted is logged and skipped. `entries_found`
    /// still counts it, and the paginator's empty-page check relies on that count.
    pub fn extract_records(&self, document: &Html, page_url: &Url) -> Extraction {
        let mut books = Vec::new();
        let mut entries_found = 0;

        for element in document.select(&listing::ENTRY) {
            entries_found += 1;
            match self.extract_one(element, page_url) {
                Ok(book) => {
                    trace!("Extracted book: {}", book.title);
                    books.push(book);
                }
                Err(e) => {
                    error!("Error extracting book data: {}", e);
                }
            }
        }

        debug!("Extracted {} of {} entries from {}", books.len(), entries_found, page_url);

        Extraction { books, entries_found }
    }

    /// Extracts one listing entry.
    ///
    /// Only a missing title link or an unresolvable URL fails the entry; every
    /// other missing element degrades to its sentinel.
    pub fn extract_one(&self, element: ElementRef, page_url: &Url) -> Result<Book, ExtractionError> {
        let title_link =
            element.select(&entry::TITLE_LINK).next().ok_or(ExtractionError::MissingTitleLink)?;

        let title = title_link.value().attr(entry::TITLE_ATTR).unwrap_or(NOT_AVAILABLE).to_string();

        let href = title_link.value().attr(entry::HREF_ATTR).unwrap_or("");
        let product_url = resolve(page_url, href)?;

        let price = element
            .select(&entry::PRICE)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let rating = self.extract_rating(element).to_string();

        let stock_text = element
            .select(&entry::AVAILABILITY)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());
        let availability = Availability::from_stock_text(stock_text.as_deref()).to_string();

        let image_url = match element.select(&entry::IMAGE).next() {
            Some(img) => resolve(&self.site_base, img.value().attr(entry::SRC_ATTR).unwrap_or(""))?,
            None => NOT_AVAILABLE.to_string(),
        };

        Ok(Book { title, product_url, price, rating, availability, image_url })
    }

    /// Finds the "next" pagination link and resolves it against `current`.
    ///
    /// Returns `None` when the control or its anchor is missing. An anchor
    /// without an href resolves to `current` itself.
    pub fn next_page_url(
        &self,
        document: &Html,
        current: &Url,
    ) -> Result<Option<Url>, ExtractionError> {
        let Some(control) = document.select(&listing::NEXT_PAGE).next() else {
            return Ok(None);
        };
        let Some(anchor) = control.select(&listing::NEXT_LINK).next() else {
            return Ok(None);
        };
        let href = anchor.value().attr(entry::HREF_ATTR).unwrap_or("");

        current
            .join(href)
            .map(Some)
            .map_err(|source| ExtractionError::InvalidUrl { href: href.to_string(), source })
    }

    fn extract_rating(&self, element: ElementRef) -> &'static str {
        match element.select(&entry::RATING).next() {
            Some(marker) => {
                let classes: Vec<&str> = marker.value().classes().collect();
                decode_rating(classes.iter().copied())
            }
            None => NOT_AVAILABLE,
        }
    }
}

fn resolve(base: &Url, href: &str) -> Result<String, ExtractionError> {
    base.join(href)
        .map(String::from)
        .map_err(|source| ExtractionError::InvalidUrl { href: href.to_string(), source })
}
