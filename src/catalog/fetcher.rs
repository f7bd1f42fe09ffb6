//! Retrying page fetcher with exponential backoff and a politeness pause.

use crate::catalog::client::CatalogTransport;
use crate::catalog::throttle::{DelayPolicy, Sleeper, TokioSleeper};
use crate::error::FetchError;
use scraper::Html;
use tracing::{error, info, warn};
use url::Url;

/// A fetched and parsed listing page.
pub struct CatalogPage {
    pub url: Url,
    pub document: Html,
}

/// Wraps a transport with bounded retry and rate limiting.
pub struct PageFetcher<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    policy: DelayPolicy,
}

impl<T: CatalogTransport> PageFetcher<T> {
    /// Creates a fetcher that sleeps on the tokio timer.
    pub fn new(transport: T, policy: DelayPolicy) -> Self {
        Self::with_sleeper(transport, TokioSleeper, policy)
    }
}

impl<T: CatalogTransport, S: Sleeper> PageFetcher<T, S> {
    /// Creates a fetcher with a custom delay implementation (for testing).
    pub fn with_sleeper(transport: T, sleeper: S, policy: DelayPolicy) -> Self {
        Self { transport, sleeper, policy }
    }

    /// Fetches and parses `url`.
    ///
    /// Transport failures are retried up to `max_retries` times, waiting
    /// `backoff(n)` before retry `n`. A successful fetch is parsed and then
    /// followed by one politeness pause.
    pub async fn fetch(&self, url: &Url) -> Result<CatalogPage, FetchError> {
        let mut attempt = 0;

        let body = loop {
            info!("Fetching: {}", url);

            match self.transport.get(url).await {
                Ok(body) => break body,
                Err(e) if attempt < self.policy.max_retries => {
                    warn!(
                        "Request failed, retrying... ({}/{}): {}",
                        attempt + 1,
                        self.policy.max_retries,
                        e
                    );
                    self.sleeper.sleep(self.policy.backoff(attempt)).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(
                        "Failed to fetch {} after {} retries: {}",
                        url, self.policy.max_retries, e
                    );
                    return Err(FetchError::Exhausted {
                        url: url.to_string(),
                        retries: self.policy.max_retries,
                        source: e,
                    });
                }
            }
        };

        let document = Html::parse_document(&body);

        self.sleeper.sleep(self.policy.politeness()).await;

        Ok(CatalogPage { url: url.clone(), document })
    }
}
