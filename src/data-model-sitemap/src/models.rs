use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Date-only layouts accepted for text cells in the `lastmod` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Date + time layouts accepted for text cells in the `lastmod` column.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A single, non-empty spreadsheet cell.
/// Empty cells are never represented as a `CellValue`: they're `None` on the owning `Record`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// The cell's string form, as it's written into a sitemap.
    /// Whole floats keep one decimal place (`1.0`), dates use `YYYY-MM-DD HH:MM:SS`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 => format!("{f:.1}"),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    /// Interprets the cell as a calendar date.
    /// Date cells always succeed. Text succeeds for ISO-style dates, date-times and RFC 3339 timestamps.
    /// Numbers and booleans are never dates.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(text) => parse_date(text.trim()),
            CellValue::Int(_) | CellValue::Float(_) | CellValue::Bool(_) => None,
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(text).ok().map(|dt| dt.date_naive()))
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::DateTime(value.and_time(NaiveTime::MIN))
    }
}

/// One data row of the input spreadsheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// 1-based row number in the source sheet (the header is row 1).
    pub row: usize,
    pub url: Option<CellValue>,
    pub priority: Option<CellValue>,
    pub change_frequency: Option<CellValue>,
    pub last_modified: Option<CellValue>,
    /// Raw classifier value. Grouping uses it verbatim; only file names use the sanitized form.
    pub classifier: Option<String>,
}

impl Record {
    pub fn new(row: usize, url: impl Into<CellValue>) -> Self {
        Self {
            row,
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_priority(mut self, priority: impl Into<CellValue>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_change_frequency(mut self, change_frequency: impl Into<CellValue>) -> Self {
        self.change_frequency = Some(change_frequency.into());
        self
    }

    pub fn with_last_modified(mut self, last_modified: impl Into<CellValue>) -> Self {
        self.last_modified = Some(last_modified.into());
        self
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }
}

/// Why a record was left out of its sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("record has no URL")]
    MissingUrl,

    /// A column enabled by a feature flag has no value for this record.
    #[error("record has no value in the '{0}' column")]
    MissingField(&'static str),

    #[error("cannot read '{0}' as a date")]
    UnparsableDate(String),
}

/// A record that was dropped while rendering, with the row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub row: usize,
    pub reason: SkipReason,
}

/// A single `<url>` element of a sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl UrlEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// The rendered contents of one sitemap file, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SitemapDocument {
    pub entries: Vec<UrlEntry>,
    pub skipped: Vec<SkippedRecord>,
}

impl SitemapDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Describes one emitted sitemap: the plain XML file and its gzip sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub gzip_file_name: String,
    pub classifier_label: Option<String>,
    pub url_count: usize,
}
