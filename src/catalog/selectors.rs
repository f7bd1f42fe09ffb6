//! CSS selectors for the catalog listing markup.
//!
//! The listing layout is fixed; every structural marker the scraper relies on
//! lives here.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for one listing page.
pub mod listing {
    use super::*;

    /// One catalog entry ("product pod").
    pub static ENTRY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("article.product_pod").unwrap());

    /// "Next" pagination control.
    pub static NEXT_PAGE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.next").unwrap());

    /// Anchor inside the "next" control.
    pub static NEXT_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
}

/// Selectors scoped to a single entry.
pub mod entry {
    use super::*;

    /// Title link; carries the full title and the detail page href.
    pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 a").unwrap());

    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("p.price_color").unwrap());

    /// Star rating; the digit is encoded as a second class token.
    pub static RATING: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("p.star-rating").unwrap());

    pub static AVAILABILITY: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("p.instock.availability").unwrap());

    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

    pub static TITLE_ATTR: &str = "title";
    pub static HREF_ATTR: &str = "href";
    pub static SRC_ATTR: &str = "src";
}
