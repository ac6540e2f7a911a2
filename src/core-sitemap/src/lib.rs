//! # xl2sitemap core
//!
//! Turns spreadsheet rows of URLs into sitemaps.org XML files, each paired with a gzip copy.
//!
//! Records are optionally grouped by a classifier column, every group is split into chunks of at
//! most `max_urls_per_file` records, each chunk is rendered into one sitemap document, and each
//! document is written as `<name>.xml` plus `<name>.xml.gz`.
//!
//! ```no_run
//! use std::path::Path;
//! use core_sitemap::{SitemapConfig, generate, load_records};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SitemapConfig::builder()
//!         .priority(true)
//!         .classifier(true)
//!         .max_urls_per_file(10_000)
//!         .build()?;
//!
//!     let sheet = load_records(Path::new("urls.xlsx"), None)?;
//!     for file in generate(sheet.records, &config, Path::new("."))? {
//!         println!("{} / {}", file.file_name, file.gzip_file_name);
//!     }
//!     Ok(())
//! }
//! ```

#[macro_use]
mod functional;

pub mod batch;
pub mod common;
pub mod config;
pub mod emit;
mod errors;
pub mod manifest;
pub mod pipeline;
pub mod render;
pub mod rows;
pub mod slug;

pub use batch::{GroupKey, RecordGroup, batch, group_by_classifier, partition};
pub use common::compression::{compress, decompress};
pub use common::logging::{DEFAULT_LOG_SETTINGS, VERBOSE_LOG_SETTINGS, default_log_settings, setup_logging};
pub use common::max_urls::{MaxUrlsEnvError, default_max_urls};
pub use config::{DEFAULT_MAX_URLS_PER_FILE, FeatureFlags, MaxUrls, SitemapConfig, SitemapConfigBuilder};
pub use emit::{Emitter, base_name};
pub use errors::{Error, Result};
pub use manifest::{MANIFEST_FILE_NAME, write_manifest};
pub use pipeline::{Generator, generate, record_progress_bar};
pub use render::{SITEMAP_NAMESPACE, render, render_entry, to_xml};
pub use rows::{Columns, LoadedSheet, load_records};
pub use slug::{sanitize, unique_slugs};
