//! Uncompressed run logs

use super::{decode_text, RunLogFormat};
use crate::types::Result;
use std::fs;
use std::path::Path;

/// Plain-text run log
pub struct PlainLog;

impl RunLogFormat for PlainLog {
    fn read(path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        Ok(decode_text(path, bytes))
    }
}
