pub mod compression;
pub mod logging;
pub mod max_urls;
