//! Orchestration: group, batch, render and emit a whole record set.

use std::path::Path;

use data_model_sitemap::{OutputFile, Record};
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{GroupKey, batch, partition};
use crate::config::SitemapConfig;
use crate::emit::{Emitter, base_name};
use crate::errors::Result;
use crate::render::render;
use crate::slug::unique_slugs;

/// Runs the sitemap pipeline for one configuration and one output directory.
pub struct Generator<'a> {
    config: &'a SitemapConfig,
    emitter: Emitter,
    progress: ProgressBar,
}

impl<'a> Generator<'a> {
    /// A generator that reports nothing.
    pub fn new(config: &'a SitemapConfig, out_dir: &Path) -> Self {
        Self {
            config,
            emitter: Emitter::new(out_dir),
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports progress, one tick per record, on the supplied bar.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Writes every sitemap file pair for the records, returning them in emission order.
    ///
    /// An I/O failure stops the run; pairs already written stay on disk.
    pub fn generate(&self, records: Vec<Record>) -> Result<Vec<OutputFile>> {
        self.progress.set_length(records.len() as u64);

        let groups = partition(records, &self.config.flags);
        let labels: Vec<&str> = groups.iter().filter_map(|g| g.key.label()).collect();
        let mut slugs = unique_slugs(&labels).into_iter();

        let mut files = Vec::new();
        for group in groups {
            let slug = match group.key {
                GroupKey::All => None,
                GroupKey::Classifier(_) | GroupKey::Unclassified => slugs.next(),
            };
            let classifier = group.key.classifier().map(str::to_string);
            self.progress.set_message(group.key.label().unwrap_or_default().to_string());

            let chunks = batch(group.records, self.config.max_urls_per_file);
            tracing::debug!("Group {:?}: {} chunk(s)", group.key, chunks.len());

            for (i, chunk) in chunks.iter().enumerate() {
                let document = render(chunk, &self.config.flags);
                if document.is_empty() {
                    tracing::warn!("Chunk {} of group {:?} has no renderable URLs", i + 1, group.key);
                }

                let name = base_name(slug.as_deref(), i + 1);
                let file = self.emitter.emit(&document, &name, classifier.as_deref())?;
                tracing::info!(
                    "Wrote {} + {} ({} URLs, {} skipped)",
                    file.file_name,
                    file.gzip_file_name,
                    file.url_count,
                    document.skipped.len()
                );
                files.push(file);
                self.progress.inc(chunk.len() as u64);
            }
        }

        self.progress.finish_and_clear();
        Ok(files)
    }
}

/// Writes every sitemap file pair for the records into `out_dir`, without progress reporting.
pub fn generate(records: Vec<Record>, config: &SitemapConfig, out_dir: &Path) -> Result<Vec<OutputFile>> {
    Generator::new(config, out_dir).generate(records)
}

/// A progress bar on stderr, styled for record counts.
pub fn record_progress_bar() -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} records {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    ProgressBar::new(0).with_style(style)
}
