use std::env::VarError;
use std::num::ParseIntError;

use crate::config::MaxUrls;

/// Environment variable supplying the default maximum URLs per file.
pub const MAX_URLS_ENV_VAR: &str = "XL2SITEMAP_MAX_URLS";

/// The maximum URLs per file to use when none was given on the command line.
/// Missing env var means the built-in default; a malformed one is an error.
pub fn default_max_urls() -> Result<MaxUrls, MaxUrlsEnvError> {
    match max_urls_from_env() {
        Ok(v) => Ok(v),
        Err(MaxUrlsEnvError::MissingEnvVar(_)) => Ok(MaxUrls::default()),
        Err(e) => Err(e),
    }
}

/// Retrieves the value of the environment variable as a validated maximum URL count.
pub fn max_urls_from_env() -> Result<MaxUrls, MaxUrlsEnvError> {
    let raw = std::env::var(MAX_URLS_ENV_VAR)?;
    parse_max_urls(&raw)
}

fn parse_max_urls(raw: &str) -> Result<MaxUrls, MaxUrlsEnvError> {
    let n = raw.trim().parse::<i64>()?;
    MaxUrls::from_signed(n).map_err(|_| MaxUrlsEnvError::NonPositive(n))
}

#[derive(Debug)]
pub enum MaxUrlsEnvError {
    ParseIntError(ParseIntError),
    NonPositive(i64),
    MissingEnvVar(VarError),
}

impl std::error::Error for MaxUrlsEnvError {}

impl From<ParseIntError> for MaxUrlsEnvError {
    fn from(error: ParseIntError) -> Self {
        Self::ParseIntError(error)
    }
}

impl From<VarError> for MaxUrlsEnvError {
    fn from(error: VarError) -> Self {
        Self::MissingEnvVar(error)
    }
}

impl std::fmt::Display for MaxUrlsEnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::ParseIntError(e) => write!(f, "Failed to parse {} as an integer: {}", MAX_URLS_ENV_VAR, e),
            Self::NonPositive(n) => write!(f, "{} must be a positive number, got {}", MAX_URLS_ENV_VAR, n),
            Self::MissingEnvVar(e) => write!(f, "Environment variable {} is missing: {}", MAX_URLS_ENV_VAR, e),
        }
    }
}
