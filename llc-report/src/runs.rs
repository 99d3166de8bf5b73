//! Runs directory enumeration
//!
//! Run logs are paired with timing lines and policies purely by position, so
//! the listing order is what defines a run. Entries are sorted by file name
//! to make that order independent of the filesystem.

use crate::config::ProgramNameRule;
use crate::types::{ReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// List the run logs in `dir`, sorted by file name
///
/// Subdirectories and hidden files are skipped.
pub fn list_runs(dir: &Path) -> Result<Vec<PathBuf>> {
    log::info!("Scanning runs directory: {:?}", dir);

    let mut runs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let hidden = entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false);
        if hidden {
            log::debug!("Skipping hidden file {:?}", entry.path());
            continue;
        }
        runs.push(entry.path());
    }

    runs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::info!("Found {} run logs", runs.len());
    Ok(runs)
}

/// Cut the program name out of a run file name
pub fn program_name(path: &Path, rule: &ProgramNameRule) -> Result<String> {
    let invalid = || ReportError::InvalidFileName(path.to_path_buf());

    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let component = file_name.split('.').nth(rule.component).ok_or_else(invalid)?;

    let keep = component.chars().count().saturating_sub(rule.trim_trailing);
    let name: String = component.chars().take(keep).collect();
    if name.is_empty() {
        return Err(invalid());
    }
    Ok(name)
}
