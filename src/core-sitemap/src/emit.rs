//! Writing sitemap documents to disk as plain and gzip-compressed XML.

use std::fs;
use std::path::{Path, PathBuf};

use data_model_sitemap::{OutputFile, SitemapDocument};

use crate::common::compression::compress;
use crate::errors::{Error, Result};
use crate::render::to_xml;

/// File name stem for a chunk: `sitemap-<slug>-<n>` for classifier groups, `sitemap-<n>` otherwise.
/// `file_number` is the 1-based position of the chunk within its group.
pub fn base_name(slug: Option<&str>, file_number: usize) -> String {
    match slug {
        Some(slug) => format!("sitemap-{slug}-{file_number}"),
        None => format!("sitemap-{file_number}"),
    }
}

/// Writes sitemap file pairs into one output directory.
#[derive(Debug, Clone)]
pub struct Emitter {
    out_dir: PathBuf,
}

impl Emitter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self { out_dir: out_dir.into() }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Writes `<base_name>.xml` and `<base_name>.xml.gz`.
    ///
    /// The XML is serialized and compressed in memory, and both files come from that one buffer.
    /// Each file is first written under a hidden staging name in the output directory. The gzip
    /// copy is renamed into place before the plain file, so a plain sitemap never exists on disk
    /// without its compressed copy. If staging fails, the staged files are removed and any pair
    /// from an earlier run is left alone. If a rename fails, both final paths are removed too.
    pub fn emit(
        &self,
        document: &SitemapDocument,
        base_name: &str,
        classifier_label: Option<&str>,
    ) -> Result<OutputFile> {
        let xml = to_xml(document)?;
        let gzip = compress(&xml)?;

        let file_name = format!("{base_name}.xml");
        let gzip_file_name = format!("{file_name}.gz");
        let xml_path = self.out_dir.join(&file_name);
        let gzip_path = self.out_dir.join(&gzip_file_name);
        let staged_xml = self.out_dir.join(staging_name(&file_name));
        let staged_gzip = self.out_dir.join(staging_name(&gzip_file_name));

        let staged = write_file(&staged_xml, &xml).and_then(|()| write_file(&staged_gzip, &gzip));
        if let Err(error) = staged {
            remove_quietly(&staged_xml);
            remove_quietly(&staged_gzip);
            return Err(error);
        }

        let placed = rename_file(&staged_gzip, &gzip_path).and_then(|()| rename_file(&staged_xml, &xml_path));
        if let Err(error) = placed {
            for path in [&staged_xml, &staged_gzip, &xml_path, &gzip_path] {
                remove_quietly(path);
            }
            return Err(error);
        }

        tracing::debug!(
            "Wrote {} ({} bytes) and {} ({} bytes)",
            file_name,
            xml.len(),
            gzip_file_name,
            gzip.len()
        );

        Ok(OutputFile {
            file_name,
            gzip_file_name,
            classifier_label: classifier_label.map(str::to_string),
            url_count: document.len(),
        })
    }
}

/// Creates or truncates `path` and writes all of `bytes` to it.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Moves a staged file over its final name, replacing any file already there.
fn rename_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| Error::Write {
        path: to.to_path_buf(),
        source,
    })
}

fn staging_name(file_name: &str) -> String {
    format!(".{file_name}.partial")
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::error!("Failed to clean up {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::compression::decompress;
    use data_model_sitemap::UrlEntry;

    fn document(locs: &[&str]) -> SitemapDocument {
        SitemapDocument {
            entries: locs.iter().map(|loc| UrlEntry::new(*loc)).collect(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(None, 1), "sitemap-1");
        assert_eq!(base_name(Some("nyc"), 3), "sitemap-nyc-3");
    }

    #[test]
    fn test_emit_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        let output = emitter
            .emit(&document(&["https://example.com/a"]), "sitemap-nyc-1", Some("NYC"))
            .unwrap();

        assert_eq!(
            output,
            OutputFile {
                file_name: "sitemap-nyc-1.xml".into(),
                gzip_file_name: "sitemap-nyc-1.xml.gz".into(),
                classifier_label: Some("NYC".into()),
                url_count: 1,
            }
        );

        let plain = fs::read(dir.path().join(&output.file_name)).unwrap();
        let gzip = fs::read(dir.path().join(&output.gzip_file_name)).unwrap();
        assert_eq!(decompress(&gzip).unwrap(), plain);
        assert!(String::from_utf8(plain).unwrap().contains("<loc>https://example.com/a</loc>"));
    }

    #[test]
    fn test_emit_truncates_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        let long: Vec<String> = (0..50).map(|i| format!("https://example.com/{i}")).collect();
        let long: Vec<&str> = long.iter().map(String::as_str).collect();

        emitter.emit(&document(&long), "sitemap-1", None).unwrap();
        let output = emitter.emit(&document(&["https://example.com/"]), "sitemap-1", None).unwrap();

        let plain = fs::read_to_string(dir.path().join(&output.file_name)).unwrap();
        assert_eq!(plain.matches("<url>").count(), 1);
        let gzip = fs::read(dir.path().join(&output.gzip_file_name)).unwrap();
        assert_eq!(decompress(&gzip).unwrap(), plain.into_bytes());
    }

    fn dir_listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_emit_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        emitter.emit(&document(&["https://example.com/"]), "sitemap-1", None).unwrap();

        assert_eq!(dir_listing(dir.path()), vec!["sitemap-1.xml", "sitemap-1.xml.gz"]);
    }

    #[test]
    fn test_emit_gzip_failure_leaves_no_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory squatting on the gzip file name makes the gzip rename fail.
        fs::create_dir(dir.path().join("sitemap-1.xml.gz")).unwrap();
        let emitter = Emitter::new(dir.path());

        let result = emitter.emit(&document(&["https://example.com/"]), "sitemap-1", None);

        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(!dir.path().join("sitemap-1.xml").exists());
        assert_eq!(dir_listing(dir.path()), vec!["sitemap-1.xml.gz"]);
    }

    #[test]
    fn test_emit_plain_failure_removes_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        emitter.emit(&document(&["https://example.com/old"]), "sitemap-1", None).unwrap();

        // The plain file of the previous run is replaced by a directory, so the plain rename fails
        // after the new gzip copy is already in place.
        fs::remove_file(dir.path().join("sitemap-1.xml")).unwrap();
        fs::create_dir(dir.path().join("sitemap-1.xml")).unwrap();
        let long: Vec<String> = (0..2000).map(|i| format!("https://example.com/{i}")).collect();
        let long: Vec<&str> = long.iter().map(String::as_str).collect();

        let result = emitter.emit(&document(&long), "sitemap-1", None);

        assert!(matches!(result, Err(Error::Write { .. })));
        assert!(!dir.path().join("sitemap-1.xml.gz").exists());
        assert!(dir.path().join("sitemap-1.xml").is_dir());
        assert_eq!(dir_listing(dir.path()), vec!["sitemap-1.xml"]);
    }

    #[test]
    fn test_emit_plain_write_failure_keeps_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        emitter.emit(&document(&["https://example.com/old"]), "sitemap-1", None).unwrap();
        let old_plain = fs::read(dir.path().join("sitemap-1.xml")).unwrap();

        // A directory on the staging name makes writing the new plain file fail.
        fs::create_dir(dir.path().join(".sitemap-1.xml.partial")).unwrap();
        let result = emitter.emit(&document(&["https://example.com/new"]), "sitemap-1", None);

        assert!(matches!(result, Err(Error::Write { .. })));
        assert_eq!(fs::read(dir.path().join("sitemap-1.xml")).unwrap(), old_plain);
        let gzip = fs::read(dir.path().join("sitemap-1.xml.gz")).unwrap();
        assert_eq!(decompress(&gzip).unwrap(), old_plain);
        assert!(!dir.path().join(".sitemap-1.xml.gz.partial").exists());
    }

    #[test]
    fn test_emit_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path().join("does-not-exist"));

        let result = emitter.emit(&document(&["https://example.com/"]), "sitemap-1", None);
        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
