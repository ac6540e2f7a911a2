//! Rendering records into sitemap documents and sitemap documents into XML.

use data_model_sitemap::{Record, SitemapDocument, SkipReason, SkippedRecord, UrlEntry};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::config::FeatureFlags;
use crate::errors::{Error, Result};

/// Namespace every `<urlset>` root declares.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Builds the `<url>` entry for one record, or the reason it has to be skipped.
///
/// Every enabled feature flag makes its column mandatory: a record with an enabled but
/// empty column is skipped rather than emitted with a partial entry.
pub fn render_entry(record: &Record, flags: &FeatureFlags) -> std::result::Result<UrlEntry, SkipReason> {
    let loc = record.url.as_ref().ok_or(SkipReason::MissingUrl)?.to_text();
    let mut entry = UrlEntry::new(loc);

    if flags.include_last_modified {
        let value = record
            .last_modified
            .as_ref()
            .ok_or(SkipReason::MissingField("lastmod"))?;
        let date = value
            .as_date()
            .ok_or_else(|| SkipReason::UnparsableDate(value.to_text()))?;
        entry.lastmod = Some(date);
    }

    if flags.include_priority {
        let value = record.priority.as_ref().ok_or(SkipReason::MissingField("priority"))?;
        entry.priority = Some(value.to_text());
    }

    if flags.include_change_frequency {
        let value = record
            .change_frequency
            .as_ref()
            .ok_or(SkipReason::MissingField("changefreq"))?;
        entry.changefreq = Some(value.to_text());
    }

    Ok(entry)
}

/// Renders a chunk of records, in order, into a sitemap document.
/// Records that can't be rendered are logged and listed in `SitemapDocument::skipped`.
pub fn render(chunk: &[Record], flags: &FeatureFlags) -> SitemapDocument {
    let mut document = SitemapDocument {
        entries: Vec::with_capacity(chunk.len()),
        skipped: Vec::new(),
    };

    for record in chunk {
        match render_entry(record, flags) {
            Ok(entry) => document.entries.push(entry),
            Err(reason) => {
                tracing::warn!("[SKIP] Row {}: {}", record.row, reason);
                document.skipped.push(SkippedRecord {
                    row: record.row,
                    reason,
                });
            }
        }
    }

    document
}

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

fn write_text_element<W: std::io::Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer.write_event(Event::End(BytesEnd::new(name))).map_err(xml_error)?;
    Ok(())
}

/// Serializes a document as indented UTF-8 sitemap XML, including the XML declaration.
///
/// Children of `<url>` follow the protocol's order: `loc`, `lastmod`, `changefreq`, `priority`.
pub fn to_xml(document: &SitemapDocument) -> Result<Vec<u8>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NAMESPACE)]),
        ))
        .map_err(xml_error)?;

    for entry in &document.entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_error)?;
        write_text_element(&mut writer, "loc", &entry.loc)?;
        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", &lastmod.format("%Y-%m-%d").to_string())?;
        }
        if let Some(changefreq) = &entry.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq)?;
        }
        if let Some(priority) = &entry.priority {
            write_text_element(&mut writer, "priority", priority)?;
        }
        writer.write_event(Event::End(BytesEnd::new("url"))).map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_error)?;

    let mut xml = writer.into_inner();
    xml.push(b'\n');
    Ok(xml)
}
