//! Loading spreadsheet rows into records.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use data_model_sitemap::{CellValue, Record};

use crate::config::FeatureFlags;
use crate::errors::{Error, Result};

/// Header names recognized for each column, compared case-insensitively after trimming.
const URL_HEADERS: &[&str] = &["url"];
const PRIORITY_HEADERS: &[&str] = &["priority"];
const CHANGEFREQ_HEADERS: &[&str] = &["changefreq", "frequency", "change_frequency"];
const LASTMOD_HEADERS: &[&str] = &["lastmod", "lastmodified", "last_modified"];
const CLASSIFIER_HEADERS: &[&str] = &["classifier"];

/// Positions of the recognized columns within the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub url: usize,
    pub priority: Option<usize>,
    pub change_frequency: Option<usize>,
    pub last_modified: Option<usize>,
    pub classifier: Option<usize>,
}

impl Columns {
    /// Locates the recognized columns in a header row. Only `url` is required.
    pub fn from_header(header: &[Data]) -> Result<Self> {
        let names: Vec<Option<String>> = header
            .iter()
            .map(|cell| cell_to_value(cell).map(|v| v.to_text().trim().to_lowercase()))
            .collect();
        let find = |aliases: &[&str]| {
            names
                .iter()
                .position(|name| name.as_deref().is_some_and(|name| aliases.contains(&name)))
        };

        Ok(Columns {
            url: find(URL_HEADERS).ok_or(Error::MissingColumn("url"))?,
            priority: find(PRIORITY_HEADERS),
            change_frequency: find(CHANGEFREQ_HEADERS),
            last_modified: find(LASTMOD_HEADERS),
            classifier: find(CLASSIFIER_HEADERS),
        })
    }

    /// Logs a warning for every enabled feature whose column isn't in the sheet.
    pub fn warn_missing(&self, flags: &FeatureFlags) {
        let checks = [
            (flags.include_priority, self.priority, "priority"),
            (flags.include_change_frequency, self.change_frequency, "changefreq"),
            (flags.include_last_modified, self.last_modified, "lastmod"),
            (flags.group_by_classifier, self.classifier, "classifier"),
        ];
        for (enabled, column, name) in checks {
            if enabled && column.is_none() {
                tracing::warn!("The '{}' option is enabled but the sheet has no '{}' column", name, name);
            }
        }
    }
}

/// Rows of one worksheet, converted to records.
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    pub columns: Columns,
    pub records: Vec<Record>,
}

/// Converts a calamine cell into a `CellValue`. Empty, whitespace-only and error cells are `None`.
pub fn cell_to_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Int(i) => Some(CellValue::Int(*i)),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::Bool(b) => Some(CellValue::Bool(*b)),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => Some(CellValue::DateTime(dt)),
            None => cell.as_string().map(CellValue::Text),
        },
        Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

/// Builds records from a header row followed by data rows.
/// Record row numbers are 1-based sheet rows, so the first data row is row 2.
pub fn records_from_rows<'a, I>(mut rows: I) -> Result<LoadedSheet>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows.next().ok_or(Error::MissingColumn("url"))?;
    let columns = Columns::from_header(header)?;

    let cell = |row: &[Data], column: Option<usize>| column.and_then(|c| row.get(c)).and_then(cell_to_value);

    let records = rows
        .enumerate()
        .map(|(i, row)| Record {
            row: i + 2,
            url: cell(row, Some(columns.url)),
            priority: cell(row, columns.priority),
            change_frequency: cell(row, columns.change_frequency),
            last_modified: cell(row, columns.last_modified),
            classifier: cell(row, columns.classifier).map(|v| v.to_text()),
        })
        .filter(|record| !is_blank(record))
        .collect();

    Ok(LoadedSheet { columns, records })
}

/// A row with no values in any recognized column.
fn is_blank(record: &Record) -> bool {
    record.url.is_none()
        && record.priority.is_none()
        && record.change_frequency.is_none()
        && record.last_modified.is_none()
        && record.classifier.is_none()
}

/// Loads a worksheet from an `.xlsx`, `.xlsm`, `.xls` or `.ods` workbook.
/// Uses the first worksheet unless `sheet` names one.
pub fn load_records(path: &Path, sheet: Option<&str>) -> Result<LoadedSheet> {
    let mut workbook = open_workbook_auto(path)?;

    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook.worksheet_range_at(0).ok_or(Error::NoWorksheets)??,
    };

    let loaded = records_from_rows(range.rows())?;
    tracing::info!(
        "Loaded {} records from {} ({} rows)",
        loaded.records.len(),
        path.display(),
        range.height()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_columns_from_header() {
        let header = vec![
            text("Classifier"),
            text(" URL "),
            Data::Empty,
            text("lastmodified"),
            text("frequency"),
            text("priority"),
        ];
        let columns = Columns::from_header(&header).unwrap();
        assert_eq!(
            columns,
            Columns {
                url: 1,
                priority: Some(5),
                change_frequency: Some(4),
                last_modified: Some(3),
                classifier: Some(0),
            }
        );
    }

    #[test]
    fn test_columns_missing_url() {
        let header = vec![text("link"), text("priority")];
        assert!(matches!(Columns::from_header(&header), Err(Error::MissingColumn("url"))));
    }

    #[test]
    fn test_cell_to_value() {
        assert_eq!(cell_to_value(&Data::Empty), None);
        assert_eq!(cell_to_value(&text("   ")), None);
        assert_eq!(cell_to_value(&text("daily")), Some(CellValue::from("daily")));
        assert_eq!(cell_to_value(&Data::Int(3)), Some(CellValue::Int(3)));
        assert_eq!(cell_to_value(&Data::Float(0.5)), Some(CellValue::Float(0.5)));
        assert_eq!(cell_to_value(&Data::Bool(true)), Some(CellValue::Bool(true)));
    }

    #[test]
    fn test_records_from_rows() {
        let rows = vec![
            vec![text("url"), text("priority"), text("changefreq"), text("lastmod"), text("classifier")],
            vec![text("https://a"), Data::Float(0.8), text("daily"), text("2024-01-02"), text("NYC")],
            vec![Data::Empty, Data::Empty, Data::Empty, Data::Empty, Data::Empty],
            vec![Data::Empty, Data::Float(0.3), Data::Empty, Data::Empty, text("LA")],
            vec![text("https://b")],
        ];

        let loaded = records_from_rows(rows.iter().map(Vec::as_slice)).unwrap();

        assert_eq!(loaded.records.len(), 3);

        let first = &loaded.records[0];
        assert_eq!(first.row, 2);
        assert_eq!(first.url, Some(CellValue::from("https://a")));
        assert_eq!(first.priority, Some(CellValue::Float(0.8)));
        assert_eq!(first.change_frequency, Some(CellValue::from("daily")));
        assert_eq!(first.last_modified, Some(CellValue::from("2024-01-02")));
        assert_eq!(first.classifier.as_deref(), Some("NYC"));

        // Missing URL is kept: the renderer decides to skip it.
        let second = &loaded.records[1];
        assert_eq!(second.row, 4);
        assert_eq!(second.url, None);

        // Short rows simply have no values in the trailing columns.
        let third = &loaded.records[2];
        assert_eq!(third.row, 5);
        assert_eq!(third.url, Some(CellValue::from("https://b")));
        assert_eq!(third.classifier, None);
    }

    #[test]
    fn test_records_from_rows_empty_sheet() {
        let rows: Vec<Vec<Data>> = Vec::new();
        assert!(matches!(
            records_from_rows(rows.iter().map(Vec::as_slice)),
            Err(Error::MissingColumn("url"))
        ));
    }

    #[test]
    fn test_numeric_classifier_is_text() {
        let rows = vec![vec![text("url"), text("classifier")], vec![text("https://a"), Data::Int(10001)]];
        let loaded = records_from_rows(rows.iter().map(Vec::as_slice)).unwrap();
        assert_eq!(loaded.records[0].classifier.as_deref(), Some("10001"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_records(Path::new("/definitely/not/here.xlsx"), None);
        assert!(matches!(result, Err(Error::Workbook(_))));
    }
}
