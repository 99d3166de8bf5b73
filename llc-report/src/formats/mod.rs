//! Run log readers (gzip, plain text)
//!
//! Every simulated run leaves one log in the runs directory. The simulator
//! normally gzips them; anything without a `.gz` extension is read as-is.

use crate::types::Result;
use std::path::Path;

pub mod gzip;
pub mod plain;

pub use gzip::GzipLog;
pub use plain::PlainLog;

/// Common trait for all run log formats
///
/// A reader loads the whole log into memory; trailers are addressed from the
/// end of the file so there is nothing to gain from streaming.
pub trait RunLogFormat {
    /// Read a run log and return its decoded text
    fn read(path: &Path) -> Result<String>;
}

/// Read a run log, choosing the format from the file extension
pub fn read_run_log(path: &Path) -> Result<String> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some("gz") => GzipLog::read(path),
        _ => {
            log::debug!("No gzip extension on {:?}, reading as plain text", path);
            PlainLog::read(path)
        }
    }
}

/// Decode log bytes as UTF-8, falling back to a lossy conversion
pub(crate) fn decode_text(path: &Path, bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Run log {:?} is not valid UTF-8, decoding lossily", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}
