//! Results file parser
//!
//! The results file is written by the benchmark driver, one line per timed
//! run. Only the last whitespace-separated token of a line is used: the
//! execution time. Lines are matched to runs purely by position.

use crate::config::TimingLayout;
use crate::types::{Measurement, ReportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Lines of a results file, kept verbatim until a run asks for its time
#[derive(Debug, Clone)]
pub struct TimingLog {
    path: PathBuf,
    lines: Vec<String>,
}

impl TimingLog {
    /// Read a results file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        log::info!("Reading results file: {:?}", path);
        let content = fs::read_to_string(path)?;
        let log = Self::from_text(path, &content);
        log::debug!("Results file has {} lines", log.len());
        Ok(log)
    }

    /// Build from already-loaded text; `path` is only used in error messages
    pub fn from_text(path: &Path, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// Number of lines in the file
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Execution time of run `run` (0-based, directory-listing order)
    pub fn time_for_run(&self, run: usize, layout: &TimingLayout) -> Result<Measurement> {
        let index = run * layout.stride;
        let line = self.lines.get(index).ok_or(ReportError::MissingTiming {
            run,
            line: index + 1,
        })?;

        let token = line
            .split_whitespace()
            .last()
            .ok_or_else(|| self.parse_error(index, "line is empty".to_string()))?;

        Measurement::parse(token).ok_or_else(|| {
            self.parse_error(index, format!("{:?} is not a finite number", token))
        })
    }

    fn parse_error(&self, index: usize, reason: String) -> ReportError {
        ReportError::ResultsParseError {
            path: self.path.clone(),
            line: index + 1,
            reason,
        }
    }
}
