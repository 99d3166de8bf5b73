//! Gzip-compressed run logs
//!
//! Decompression is done in memory with `zune-inflate`. The whole member is
//! inflated at once and its CRC checked before the text is handed on.

use super::{decode_text, RunLogFormat};
use crate::types::{ReportError, Result};
use std::fs;
use std::path::Path;
use zune_inflate::DeflateDecoder;

/// Gzip run log
pub struct GzipLog;

impl RunLogFormat for GzipLog {
    fn read(path: &Path) -> Result<String> {
        let compressed = fs::read(path)?;
        let data = inflate(path, &compressed)?;
        log::debug!(
            "Inflated {:?}: {} -> {} bytes",
            path,
            compressed.len(),
            data.len()
        );
        Ok(decode_text(path, data))
    }
}

/// Inflate a gzip member
pub fn inflate(path: &Path, compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(compressed);
    decoder
        .decode_gzip()
        .map_err(|e| ReportError::DecompressError {
            path: path.to_path_buf(),
            reason: format!("{:?}", e),
        })
}
