use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::{Error, Result};

/// Gzips a whole sitemap document in memory.
///
/// The result is a single gzip member, which is what crawlers expect from a `.xml.gz` sitemap.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(input.len() / 4), Compression::default());
    encoder.write_all(input).map_err(Error::Compression)?;
    encoder.finish().map_err(Error::Compression)
}

/// Inverse of [`compress`]. Mostly useful for checking what was written.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    GzDecoder::new(compressed)
        .read_to_end(&mut decompressed)
        .map_err(Error::Compression)?;
    Ok(decompressed)
}
