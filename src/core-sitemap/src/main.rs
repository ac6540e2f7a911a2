use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use core_sitemap::{
    FeatureFlags, Generator, MANIFEST_FILE_NAME, MaxUrls, SitemapConfig, default_max_urls, load_records,
    record_progress_bar, setup_logging, write_manifest,
};

#[derive(Parser)]
#[command(name = "xl2sitemap")]
#[command(about = "Generate sitemap files (plain + gzip) from a spreadsheet of URLs", long_about = None)]
struct Cli {
    /// The spreadsheet (.xlsx, .xlsm, .xls, .ods) to convert. Needs at least a `url` column.
    #[arg(value_parser = validate_input_file)]
    file: PathBuf,

    /// Emit <changefreq> from the `changefreq` (or `frequency`) column.
    #[arg(short = 'f', long)]
    changefreq: bool,

    /// Emit <priority> from the `priority` column.
    #[arg(short, long)]
    priority: bool,

    /// Emit <lastmod> from the `lastmod` (or `lastmodified`) column.
    #[arg(short, long)]
    lastmod: bool,

    /// Maximum number of URLs per sitemap file [default: $XL2SITEMAP_MAX_URLS or 35000]
    #[arg(short, long, value_parser = validate_max_urls, allow_hyphen_values = true)]
    maxurls: Option<MaxUrls>,

    /// Split sitemaps by the values of the `classifier` column.
    #[arg(short, long)]
    classifier: bool,

    /// Directory the sitemaps and manifest are written to.
    #[arg(short, long, value_parser = validate_output_dir, default_value = ".")]
    output_dir: PathBuf,

    /// Read this worksheet instead of the first one.
    #[arg(short, long)]
    sheet: Option<String>,

    /// Don't write the List-of-sitemaps-generated.xlsx manifest.
    #[arg(long)]
    no_manifest: bool,

    /// Log at debug level (ignored when RUST_LOG is set).
    #[arg(short, long)]
    verbose: bool,
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    let metadata = std::fs::metadata(&path).map_err(|e| format!("Cannot read input file metadata: {}", e))?;

    if metadata.len() == 0 {
        return Err(format!("Input file is empty: {}", path.display()));
    }

    Ok(path)
}

fn validate_output_dir(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Output directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Output path is not a directory: {}", path.display()));
    }

    Ok(path)
}

fn validate_max_urls(s: &str) -> Result<MaxUrls, String> {
    s.parse::<MaxUrls>()
}

impl Cli {
    fn config(&self) -> anyhow::Result<SitemapConfig> {
        let max_urls_per_file = match self.maxurls {
            Some(max_urls) => max_urls,
            None => default_max_urls()?,
        };
        Ok(SitemapConfig {
            flags: FeatureFlags {
                include_priority: self.priority,
                include_change_frequency: self.changefreq,
                include_last_modified: self.lastmod,
                group_by_classifier: self.classifier,
            },
            max_urls_per_file,
        })
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config()?;
    tracing::debug!("Configuration: {:?}", config);

    let sheet = load_records(&cli.file, cli.sheet.as_deref())
        .with_context(|| format!("Cannot load {}", cli.file.display()))?;
    sheet.columns.warn_missing(&config.flags);

    let files = Generator::new(&config, &cli.output_dir)
        .with_progress(record_progress_bar())
        .generate(sheet.records)
        .context("Sitemap generation failed")?;

    for file in &files {
        println!("{}\t{}\t{} URLs", file.file_name, file.gzip_file_name, file.url_count);
    }

    if !cli.no_manifest {
        let manifest = cli.output_dir.join(MANIFEST_FILE_NAME);
        write_manifest(&files, &manifest).with_context(|| format!("Cannot write {}", manifest.display()))?;
    }

    println!(
        "Generated {} sitemap(s) in {}",
        files.len(),
        display_dir(&cli.output_dir)
    );
    Ok(())
}

fn display_dir(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

fn main() -> ExitCode {
    // Load environment variables from a .env file, if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
