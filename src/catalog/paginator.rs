//! Pagination controller: walks listing pages until a stopping condition.

use crate::catalog::client::CatalogTransport;
use crate::catalog::fetcher::{CatalogPage, PageFetcher};
use crate::catalog::models::Book;
use crate::catalog::parser::Parser;
use crate::catalog::throttle::{Sleeper, TokioSleeper};
use anyhow::Result;
use tracing::{debug, error, info, warn};
use url::Url;

/// Why a run ended. Every variant keeps the records collected so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Collected at least the requested number of records
    TargetReached,
    /// A listing page had no entries (end of catalog)
    EmptyPage,
    /// The last page has no "next" link
    NoNextPage,
    /// Fetching or parsing the next-page link failed
    NextPageLookupFailed,
    /// A listing page could not be fetched even after retries
    FetchFailed,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StopReason::TargetReached => "target reached",
            StopReason::EmptyPage => "empty page",
            StopReason::NoNextPage => "no next page",
            StopReason::NextPageLookupFailed => "next page lookup failed",
            StopReason::FetchFailed => "fetch failed",
        };
        f.write_str(s)
    }
}

/// Outcome of one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeRun {
    /// Records in crawl order: page by page, document order within a page
    pub books: Vec<Book>,
    pub pages_visited: usize,
    pub stop_reason: StopReason,
}

/// Page about to be fetched and the running record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlCursor {
    pub url: Url,
    pub collected: usize,
}

impl CrawlCursor {
    pub fn new(url: Url) -> Self {
        Self { url, collected: 0 }
    }
}

/// States of the pagination loop.
enum CrawlState {
    Idle,
    FetchingPage,
    ExtractingRecords(CatalogPage),
    /// Carries the listing when it is reused for the next-page lookup
    LocatingNextPage(Option<CatalogPage>),
    Advancing(Url),
    Stopped(StopReason),
}

/// Drives fetcher and parser across listing pages.
pub struct Paginator<T, S = TokioSleeper> {
    fetcher: PageFetcher<T, S>,
    parser: Parser,
    reuse_listing: bool,
}

impl<T: CatalogTransport, S: Sleeper> Paginator<T, S> {
    pub fn new(fetcher: PageFetcher<T, S>, parser: Parser) -> Self {
        Self { fetcher, parser, reuse_listing: false }
    }

    /// Look up the next-page link in the listing already fetched instead of
    /// fetching the current page a second time.
    pub fn reuse_listing_for_next_page(mut self, reuse: bool) -> Self {
        self.reuse_listing = reuse;
        self
    }

    /// Scrapes from `start` until at least `target` records are collected or
    /// the catalog runs out. Never fails; see [`ScrapeRun::stop_reason`].
    pub async fn run(&self, start: &Url, target: usize) -> ScrapeRun {
        info!("Starting scrape - Target: {} books", target);

        let mut books: Vec<Book> = Vec::new();
        let mut cursor = CrawlCursor::new(start.clone());
        let mut pages_visited = 0;
        let mut state = CrawlState::Idle;

        let stop_reason = loop {
            state = match state {
                CrawlState::Idle => begin_page(&cursor, target, &mut pages_visited),

                CrawlState::Advancing(next) => {
                    debug!("Advancing to {}", next);
                    cursor.url = next;
                    begin_page(&cursor, target, &mut pages_visited)
                }

                CrawlState::FetchingPage => match self.fetcher.fetch(&cursor.url).await {
                    Ok(page) => CrawlState::ExtractingRecords(page),
                    Err(e) => {
                        error!("Error scraping page {}: {}", cursor.url, e);
                        CrawlState::Stopped(StopReason::FetchFailed)
                    }
                },

                CrawlState::ExtractingRecords(page) => {
                    let extraction = self.parser.extract_records(&page.document, &page.url);
                    info!("Scraped {} books from page", extraction.entries_found);

                    books.extend(extraction.books);
                    cursor.collected = books.len();

                    // Decided on entries found, not records kept
                    if extraction.entries_found == 0 {
                        warn!("No books found on page, stopping");
                        CrawlState::Stopped(StopReason::EmptyPage)
                    } else if cursor.collected >= target {
                        info!("Target reached! Scraped {} books", cursor.collected);
                        CrawlState::Stopped(StopReason::TargetReached)
                    } else {
                        CrawlState::LocatingNextPage(self.reuse_listing.then_some(page))
                    }
                }

                CrawlState::LocatingNextPage(listing) => {
                    match self.locate_next_page(&cursor.url, listing).await {
                        Ok(Some(next)) => CrawlState::Advancing(next),
                        Ok(None) => {
                            info!("No more pages to scrape");
                            CrawlState::Stopped(StopReason::NoNextPage)
                        }
                        Err(e) => {
                            error!("Error finding next page: {:#}", e);
                            CrawlState::Stopped(StopReason::NextPageLookupFailed)
                        }
                    }
                }

                CrawlState::Stopped(reason) => break reason,
            };
        };

        info!("Scraping complete! Total books: {} ({})", books.len(), stop_reason);

        ScrapeRun { books, pages_visited, stop_reason }
    }

    async fn locate_next_page(
        &self,
        current: &Url,
        listing: Option<CatalogPage>,
    ) -> Result<Option<Url>> {
        let page = match listing {
            Some(page) => page,
            None => self.fetcher.fetch(current).await?,
        };

        Ok(self.parser.next_page_url(&page.document, current)?)
    }
}

fn begin_page(cursor: &CrawlCursor, target: usize, pages_visited: &mut usize) -> CrawlState {
    if cursor.collected >= target {
        return CrawlState::Stopped(StopReason::TargetReached);
    }

    *pages_visited += 1;
    info!("Scraping page {} - Total books: {}", pages_visited, cursor.collected);
    CrawlState::FetchingPage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fetcher::testing::{MockTransport, RecordingSleeper};
    use crate::catalog::throttle::DelayPolicy;
    use crate::testing::capture_logs;

    const ROOT: &str = "https://books.toscrape.com/";
    const PAGE_2: &str = "https://books.toscrape.com/catalogue/page-2.html";
    const PAGE_3: &str = "https://books.toscrape.com/catalogue/page-3.html";

    fn listing_page(prefix: &str, entries: usize, next: Option<&str>) -> String {
        let mut html = String::from(r#"<html><body><ol class="row">"#);
        for i in 1..=entries {
            html.push_str(&format!(
                r#"<li><article class="product_pod">
                    <div class="image_container"><img src="media/{prefix}{i}.jpg"></div>
                    <p class="star-rating Four"></p>
                    <h3><a href="{prefix}-{i}/index.html" title="{prefix} {i}">{prefix}</a></h3>
                    <p class="price_color">£{i}.00</p>
                    <p class="instock availability">In stock</p>
                </article></li>"#
            ));
        }
        html.push_str("</ol>");
        if let Some(href) = next {
            html.push_str(&format!(
                r#"<ul class="pager"><li class="next"><a href="{href}">next</a></li></ul>"#
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn three_page_catalog() -> MockTransport {
        MockTransport::new(vec![
            (ROOT, listing_page("a", 20, Some("catalogue/page-2.html"))),
            (PAGE_2, listing_page("b", 20, Some("page-3.html"))),
            (PAGE_3, listing_page("c", 0, None)),
        ])
    }

    fn paginator(transport: MockTransport) -> Paginator<MockTransport, RecordingSleeper> {
        let fetcher =
            PageFetcher::with_sleeper(transport, RecordingSleeper::default(), DelayPolicy::immediate(3));
        Paginator::new(fetcher, Parser::new(Url::parse(ROOT).unwrap()))
    }

    fn root() -> Url {
        Url::parse(ROOT).unwrap()
    }

    #[tokio::test]
    async fn test_stops_when_target_reached() {
        let transport = three_page_catalog();
        let run = paginator(transport.clone()).run(&root(), 30).await;

        assert_eq!(run.books.len(), 40);
        assert_eq!(run.pages_visited, 2);
        assert_eq!(run.stop_reason, StopReason::TargetReached);
        // Page 1 twice (listing + next-page lookup), page 2 once, page 3 never
        assert_eq!(transport.requested(), vec![ROOT, ROOT, PAGE_2]);
    }

    #[tokio::test]
    async fn test_empty_page_stops_with_warning() {
        let (logs, _guard) = capture_logs();
        let transport = MockTransport::new(vec![
            (ROOT, listing_page("a", 20, Some("catalogue/page-2.html"))),
            (PAGE_2, listing_page("b", 0, Some("page-3.html"))),
        ]);

        let run = paginator(transport).run(&root(), 500).await;

        assert_eq!(run.books.len(), 20);
        assert_eq!(run.stop_reason, StopReason::EmptyPage);

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("No books found on page, stopping"));
        assert!(!output.contains("ERROR"));
    }

    #[tokio::test]
    async fn test_stops_without_next_link() {
        let transport = MockTransport::new(vec![
            (ROOT, listing_page("a", 20, Some("catalogue/page-2.html"))),
            (PAGE_2, listing_page("b", 5, None)),
        ]);

        let run = paginator(transport).run(&root(), 500).await;

        assert_eq!(run.books.len(), 25);
        assert_eq!(run.pages_visited, 2);
        assert_eq!(run.stop_reason, StopReason::NoNextPage);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_partial_results() {
        let (logs, _guard) = capture_logs();
        // Page 2 is never served: every attempt is a 404
        let transport =
            MockTransport::new(vec![(ROOT, listing_page("a", 20, Some("catalogue/page-2.html")))]);

        let run = paginator(transport.clone()).run(&root(), 500).await;

        assert_eq!(run.books.len(), 20);
        assert_eq!(run.stop_reason, StopReason::FetchFailed);
        // Root twice, then page 2 with one attempt plus three retries
        assert_eq!(transport.call_count(), 6);

        let output = logs.contents();
        assert!(output.contains("ERROR"));
        assert!(output.contains("Error scraping page https://books.toscrape.com/catalogue/page-2.html"));
    }

    #[tokio::test]
    async fn test_next_anchor_without_href_refetches_current_page() {
        let root_page = listing_page("a", 20, None).replace(
            "</body>",
            r#"<ul class="pager"><li class="next"><a>next</a></li></ul></body>"#,
        );
        let transport = MockTransport::new(vec![(ROOT, root_page)]);

        let run = paginator(transport.clone()).run(&root(), 30).await;

        // The empty href resolves to the same page, which is scraped again
        assert_eq!(run.books.len(), 40);
        assert_eq!(run.pages_visited, 2);
        assert_eq!(run.stop_reason, StopReason::TargetReached);
        assert_eq!(transport.requested(), vec![ROOT, ROOT, ROOT]);
    }

    #[tokio::test]
    async fn test_next_page_lookup_failure_stops() {
        let transport = MockTransport::new(vec![(
            ROOT,
            listing_page("a", 20, Some("catalogue/page-2.html")),
        )])
        .failing_from(1);

        let run = paginator(transport).run(&root(), 500).await;

        assert_eq!(run.books.len(), 20);
        assert_eq!(run.stop_reason, StopReason::NextPageLookupFailed);
    }

    #[tokio::test]
    async fn test_reuse_listing_skips_second_fetch() {
        let transport = three_page_catalog();
        let run = paginator(transport.clone()).reuse_listing_for_next_page(true).run(&root(), 30).await;

        assert_eq!(run.books.len(), 40);
        assert_eq!(transport.requested(), vec![ROOT, PAGE_2]);
    }

    #[tokio::test]
    async fn test_failed_entries_still_count_as_found() {
        let broken = r#"<html><body>
            <article class="product_pod"><p class="price_color">£1</p></article>
            <article class="product_pod"><p class="price_color">£2</p></article>
            <ul class="pager"><li class="next"><a href="catalogue/page-2.html">next</a></li></ul>
        </body></html>"#;
        let transport = MockTransport::new(vec![
            (ROOT, broken.to_string()),
            (PAGE_2, listing_page("b", 2, None)),
        ]);

        let run = paginator(transport).run(&root(), 500).await;

        // Page 1 yields no records but is not treated as the end of the catalog
        assert_eq!(run.books.len(), 2);
        assert_eq!(run.pages_visited, 2);
        assert_eq!(run.stop_reason, StopReason::NoNextPage);
    }

    #[tokio::test]
    async fn test_zero_target_fetches_nothing() {
        let transport = three_page_catalog();
        let run = paginator(transport.clone()).run(&root(), 0).await;

        assert!(run.books.is_empty());
        assert_eq!(run.pages_visited, 0);
        assert_eq!(run.stop_reason, StopReason::TargetReached);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_records_in_crawl_order() {
        let transport = MockTransport::new(vec![
            (ROOT, listing_page("a", 2, Some("catalogue/page-2.html"))),
            (PAGE_2, listing_page("b", 2, None)),
        ]);

        let run = paginator(transport).run(&root(), 500).await;
        let titles: Vec<&str> = run.books.iter().map(|b| b.title.as_str()).collect();

        assert_eq!(titles, vec!["a 1", "a 2", "b 1", "b 2"]);
        assert_eq!(
            run.books[2].product_url,
            "https://books.toscrape.com/catalogue/b-1/index.html"
        );
        assert_eq!(run.books[2].image_url, "https://books.toscrape.com/media/b1.jpg");
    }

    #[test]
    fn test_stop_reason_display() {
        assert_eq!(StopReason::TargetReached.to_string(), "target reached");
        assert_eq!(StopReason::FetchFailed.to_string(), "fetch failed");
    }
}
