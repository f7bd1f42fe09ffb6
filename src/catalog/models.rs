//! Data models for catalog records.

use serde::{Deserialize, Serialize};

/// Placeholder for any field the listing entry does not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// One catalog entry as extracted from a listing page.
///
/// Every field is always populated; missing markup degrades to a sentinel.
/// Field order is the order of the JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Full title from the title link, or "N/A"
    pub title: String,
    /// Absolute detail page URL
    pub product_url: String,
    /// Display price, kept verbatim (e.g. "£51.77"), or "N/A"
    pub price: String,
    /// "1" to "5", or "N/A"
    pub rating: String,
    /// "In stock", "Out of stock" or "Unknown"
    pub availability: String,
    /// Absolute cover image URL, or "N/A"
    pub image_url: String,
}

/// Star rating words used as class tokens, in lookup order.
pub const RATING_WORDS: [(&str, &str); 5] =
    [("One", "1"), ("Two", "2"), ("Three", "3"), ("Four", "4"), ("Five", "5")];

/// Decodes a star rating from the class tokens of the rating marker.
///
/// The first recognized word wins; no recognized word yields "N/A".
pub fn decode_rating<'a>(classes: impl IntoIterator<Item = &'a str> + Clone) -> &'static str {
    RATING_WORDS
        .iter()
        .find(|(word, _)| classes.clone().into_iter().any(|class| class == *word))
        .map(|(_, digit)| *digit)
        .unwrap_or(NOT_AVAILABLE)
}

/// Stock state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    OutOfStock,
    /// The stock block is missing entirely
    Unknown,
}

impl Availability {
    /// Classifies the text of the stock block, if there is one.
    pub fn from_stock_text(text: Option<&str>) -> Self {
        match text {
            Some(text) if text.to_lowercase().contains("in stock") => Availability::InStock,
            Some(_) => Availability::OutOfStock,
            None => Availability::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::InStock => "In stock",
            Availability::OutOfStock => "Out of stock",
            Availability::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rating_table() {
        assert_eq!(decode_rating(["star-rating", "One"]), "1");
        assert_eq!(decode_rating(["star-rating", "Two"]), "2");
        assert_eq!(decode_rating(["star-rating", "Three"]), "3");
        assert_eq!(decode_rating(["star-rating", "Four"]), "4");
        assert_eq!(decode_rating(["star-rating", "Five"]), "5");
    }

    #[test]
    fn test_decode_rating_unrecognized() {
        assert_eq!(decode_rating(["star-rating"]), "N/A");
        assert_eq!(decode_rating(["star-rating", "three"]), "N/A");
        assert_eq!(decode_rating(std::iter::empty::<&str>()), "N/A");
    }

    #[test]
    fn test_availability_from_text() {
        assert_eq!(Availability::from_stock_text(Some("\n    In stock\n")), Availability::InStock);
        assert_eq!(
            Availability::from_stock_text(Some("In stock (22 available)")),
            Availability::InStock
        );
        assert_eq!(Availability::from_stock_text(Some("Sold out")), Availability::OutOfStock);
        assert_eq!(Availability::from_stock_text(None), Availability::Unknown);
    }

    #[test]
    fn test_availability_display() {
        assert_eq!(Availability::InStock.to_string(), "In stock");
        assert_eq!(Availability::OutOfStock.to_string(), "Out of stock");
        assert_eq!(Availability::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_book_json_field_order() {
        let book = Book {
            title: "T".to_string(),
            product_url: "u".to_string(),
            price: "p".to_string(),
            rating: "3".to_string(),
            availability: "In stock".to_string(),
            image_url: "i".to_string(),
        };
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","product_url":"u","price":"p","rating":"3","availability":"In stock","image_url":"i"}"#
        );
    }
}
