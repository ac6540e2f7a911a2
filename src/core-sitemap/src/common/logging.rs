use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_LOG_SETTINGS: &str = "xl2sitemap=info,core_sitemap=info";
pub const VERBOSE_LOG_SETTINGS: &str = "xl2sitemap=debug,core_sitemap=debug";

/// The filter used when RUST_LOG is not set.
pub fn default_log_settings(verbose: bool) -> &'static str {
    if verbose { VERBOSE_LOG_SETTINGS } else { DEFAULT_LOG_SETTINGS }
}

/// Sets the logging (tracing) level using RUST_LOG, falling back to the info or debug defaults.
/// Logs go to stderr; stdout only carries the list of generated files.
pub fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_settings(verbose).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose),
        )
        .init()
}
