//! File exporters for the collected records (CSV rows, pretty JSON document).

use crate::catalog::Book;
use crate::error::ExportError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// What an exporter did with the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to export; no file was touched
    Skipped,
}

/// Serializes the full record collection to one output file.
pub trait Exporter {
    /// Short label for logs ("CSV", "JSON").
    fn name(&self) -> &'static str;

    fn path(&self) -> &Path;

    /// Writes `books` in order, replacing any existing file.
    fn export(&self, books: &[Book]) -> Result<ExportOutcome, ExportError>;
}

/// Row-oriented export with a fixed column order and a header row.
pub struct CsvExporter {
    path: PathBuf,
}

/// Column order of the CSV export.
pub const CSV_COLUMNS: [&str; 6] =
    ["title", "price", "rating", "availability", "product_url", "image_url"];

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    price: &'a str,
    rating: &'a str,
    availability: &'a str,
    product_url: &'a str,
    image_url: &'a str,
}

impl<'a> From<&'a Book> for CsvRow<'a> {
    fn from(book: &'a Book) -> Self {
        Self {
            title: &book.title,
            price: &book.price,
            rating: &book.rating,
            availability: &book.availability,
            product_url: &book.product_url,
            image_url: &book.image_url,
        }
    }
}

impl CsvExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn csv_error(&self, source: csv::Error) -> ExportError {
        ExportError::Csv { path: self.path.display().to_string(), source }
    }
}

impl Exporter for CsvExporter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, books: &[Book]) -> Result<ExportOutcome, ExportError> {
        if books.is_empty() {
            return Ok(ExportOutcome::Skipped);
        }

        let mut wtr = csv::Writer::from_path(&self.path).map_err(|e| self.csv_error(e))?;
        for book in books {
            wtr.serialize(CsvRow::from(book)).map_err(|e| self.csv_error(e))?;
        }
        wtr.flush()
            .map_err(|source| ExportError::Io { path: self.path.display().to_string(), source })?;

        Ok(ExportOutcome::Written { path: self.path.clone(), rows: books.len() })
    }
}

/// Document-oriented export: one JSON array, two-space indent, UTF-8 kept verbatim.
pub struct JsonExporter {
    path: PathBuf,
}

impl JsonExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> ExportError {
        ExportError::Io { path: self.path.display().to_string(), source }
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn export(&self, books: &[Book]) -> Result<ExportOutcome, ExportError> {
        if books.is_empty() {
            return Ok(ExportOutcome::Skipped);
        }

        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, books).map_err(|source| ExportError::Json {
            path: self.path.display().to_string(),
            source,
        })?;
        writer.flush().map_err(|e| self.io_error(e))?;

        Ok(ExportOutcome::Written { path: self.path.clone(), rows: books.len() })
    }
}

/// Runs every exporter in turn; a failure is logged and does not stop the rest.
pub fn export_all(
    exporters: &[&dyn Exporter],
    books: &[Book],
) -> Vec<Result<ExportOutcome, ExportError>> {
    exporters
        .iter()
        .map(|exporter| {
            let result = exporter.export(books);
            match &result {
                Ok(ExportOutcome::Written { path, rows }) => {
                    info!("Data exported to {} ({} rows)", path.display(), rows)
                }
                Ok(ExportOutcome::Skipped) => {
                    warn!("No data to export to {}", exporter.path().display())
                }
                Err(e) => error!("Error exporting to {}: {}", exporter.name(), e),
            }
            result
        })
        .collect()
}
