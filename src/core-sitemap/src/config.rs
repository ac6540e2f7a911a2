//! Configuration for a sitemap generation run.

use crate::errors::{Error, Result};

/// Default maximum number of URLs written to a single sitemap file.
pub const DEFAULT_MAX_URLS_PER_FILE: usize = 35_000;

fn is_positive(n: &usize) -> bool {
    *n > 0
}

fn invalid_max_urls(n: &usize) -> Error {
    Error::InvalidMaxUrls(*n as i64)
}

newtype_valid!(MaxUrls, usize, is_positive, Error, invalid_max_urls);

impl MaxUrls {
    /// Validates a signed value, as typed by a user. Zero and negatives are configuration errors.
    pub fn from_signed(n: i64) -> Result<Self> {
        match usize::try_from(n) {
            Ok(n) => MaxUrls::new(n),
            Err(_) => Err(Error::InvalidMaxUrls(n)),
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for MaxUrls {
    fn default() -> Self {
        MaxUrls(DEFAULT_MAX_URLS_PER_FILE)
    }
}

impl std::str::FromStr for MaxUrls {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("'{s}' is not an integer: {e}"))?;
        MaxUrls::from_signed(n).map_err(|e| e.to_string())
    }
}

/// Which optional sitemap features are enabled. Applies uniformly to every output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Emit `<priority>` from the `priority` column
    pub include_priority: bool,
    /// Emit `<changefreq>` from the `changefreq` column
    pub include_change_frequency: bool,
    /// Emit `<lastmod>` from the `lastmod` column
    pub include_last_modified: bool,
    /// Split output files by the `classifier` column
    pub group_by_classifier: bool,
}

/// Immutable configuration threaded through the whole pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SitemapConfig {
    pub flags: FeatureFlags,
    pub max_urls_per_file: MaxUrls,
}

impl SitemapConfig {
    /// Creates a new builder for SitemapConfig.
    pub fn builder() -> SitemapConfigBuilder {
        SitemapConfigBuilder::default()
    }
}

/// Builder for SitemapConfig.
#[derive(Debug, Clone, Default)]
pub struct SitemapConfigBuilder {
    flags: FeatureFlags,
    max_urls_per_file: Option<i64>,
}

impl SitemapConfigBuilder {
    pub fn priority(mut self, enabled: bool) -> Self {
        self.flags.include_priority = enabled;
        self
    }

    pub fn change_frequency(mut self, enabled: bool) -> Self {
        self.flags.include_change_frequency = enabled;
        self
    }

    pub fn last_modified(mut self, enabled: bool) -> Self {
        self.flags.include_last_modified = enabled;
        self
    }

    pub fn classifier(mut self, enabled: bool) -> Self {
        self.flags.group_by_classifier = enabled;
        self
    }

    /// Sets the maximum URLs per file. Validated in `build`.
    pub fn max_urls_per_file(mut self, max_urls: i64) -> Self {
        self.max_urls_per_file = Some(max_urls);
        self
    }

    /// Builds the SitemapConfig, rejecting a non-positive maximum URL count.
    pub fn build(self) -> Result<SitemapConfig> {
        let max_urls_per_file = match self.max_urls_per_file {
            Some(n) => MaxUrls::from_signed(n)?,
            None => MaxUrls::default(),
        };
        Ok(SitemapConfig {
            flags: self.flags,
            max_urls_per_file,
        })
    }
}
