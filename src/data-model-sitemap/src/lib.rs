pub mod models;

pub use models::{CellValue, OutputFile, Record, SitemapDocument, SkipReason, SkippedRecord, UrlEntry};
