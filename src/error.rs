//! Error kinds, ordered from the narrowest scope (one entry) to the widest (one run).

use thiserror::Error;

/// A single failed request. Always worth retrying.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout, or TLS failure before a response arrived.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// The server answered with a non-2xx status.
    #[error("request to {url} failed with status: {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Terminal failure of the retrying page fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {url} after {retries} retries")]
    Exhausted {
        url: String,
        retries: u32,
        #[source]
        source: TransportError,
    },
}

/// Failure to turn one listing entry into a record. Never escapes the page.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("listing entry has no title link")]
    MissingTitleLink,

    #[error("cannot resolve '{href}': {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failure of one exporter. Never blocks the other exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error writing {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
