//! The spreadsheet listing every generated sitemap.

use std::path::Path;

use data_model_sitemap::OutputFile;
use rust_xlsxwriter::{Format, Workbook};

use crate::errors::Result;

/// Default file name of the manifest workbook.
pub const MANIFEST_FILE_NAME: &str = "List-of-sitemaps-generated.xlsx";

const HEADERS: [&str; 4] = ["file_name", "gzip_file_name", "classifier", "url_count"];

/// Writes one row per output file, in emission order, below a bold header row.
pub fn write_manifest(files: &[OutputFile], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1")?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, file) in files.iter().enumerate() {
        let row = i as u32 + 1;
        worksheet.write_string(row, 0, &file.file_name)?;
        worksheet.write_string(row, 1, &file.gzip_file_name)?;
        if let Some(label) = &file.classifier_label {
            worksheet.write_string(row, 2, label)?;
        }
        worksheet.write_number(row, 3, file.url_count as f64)?;
    }

    workbook.save(path)?;
    tracing::info!("Wrote manifest of {} sitemaps to {}", files.len(), path.display());
    Ok(())
}
