//! Error types for sitemap generation.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for loading, rendering and writing sitemaps.
/// Per-record problems are not errors: see `data_model_sitemap::SkipReason`.
#[derive(Debug, Error)]
pub enum Error {
    /// Maximum URLs per file was zero or negative
    #[error("Invalid maximum URLs per file: {0} (must be a positive integer)")]
    InvalidMaxUrls(i64),

    /// The workbook could not be opened or read
    #[error("Cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook has no worksheets at all
    #[error("Workbook contains no worksheets")]
    NoWorksheets,

    /// A required column is missing from the header row
    #[error("Worksheet is missing the required '{0}' column")]
    MissingColumn(&'static str),

    /// XML serialization failed
    #[error("Sitemap XML rendering failed: {0}")]
    Render(String),

    /// gzip compression or decompression failed
    #[error("Compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Writing an output file failed
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the manifest workbook failed
    #[error("Failed to write manifest: {0}")]
    Manifest(#[from] rust_xlsxwriter::XlsxError),
}

/// Type alias for Result with the crate's Error
pub type Result<T> = std::result::Result<T, Error>;
