//! Core types for the report generator
//!
//! This module defines the records the generator builds while scraping the
//! results file and the per-run simulator logs, plus the error type shared by
//! every stage of the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Cache replacement policy under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    #[serde(rename = "LRU", alias = "lru")]
    Lru,
    #[serde(rename = "Random", alias = "random")]
    Random,
    #[serde(rename = "DRRIP", alias = "drrip")]
    Drrip,
}

impl Policy {
    /// Label used in table headers and best-policy columns
    pub fn label(&self) -> &'static str {
        match self {
            Policy::Lru => "LRU",
            Policy::Random => "Random",
            Policy::Drrip => "DRRIP",
        }
    }

    /// Default group order: LRU, Random, DRRIP
    pub fn default_order() -> Vec<Policy> {
        vec![Policy::Lru, Policy::Random, Policy::Drrip]
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Policy {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Policy::Lru),
            "random" => Ok(Policy::Random),
            "drrip" => Ok(Policy::Drrip),
            _ => Err(ReportError::InvalidConfig(format!("Unknown policy: {}", s))),
        }
    }
}

/// A numeric field scraped from a log
///
/// The original token is kept so the rendered table shows exactly what the
/// simulator printed, while `value` is used for comparisons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    /// Token as it appeared in the input
    pub text: String,
    /// Parsed value
    pub value: f64,
}

impl Measurement {
    /// Parse a token into a measurement
    ///
    /// `nan` and `inf` are rejected: they cannot be ranked against other runs.
    pub fn parse(token: &str) -> Option<Self> {
        token.parse::<f64>().ok().filter(|v| v.is_finite()).map(|value| Self {
            text: token.to_string(),
            value,
        })
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Metrics extracted from one simulator output file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunMetrics {
    /// Policy this run was simulated under (by position in its group)
    pub policy: Policy,
    /// Cycles per instruction
    pub cpi: Measurement,
    /// Cache miss rate
    pub miss_rate: Measurement,
    /// True if the CPI came from the fallback trailer line
    pub cpi_from_fallback: bool,
}

/// One policy's column block in a report row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyResult {
    pub policy: Policy,
    /// Execution time from the results file
    pub time: Measurement,
    pub cpi: Measurement,
    pub miss_rate: Measurement,
    /// True if the CPI came from the fallback trailer line
    pub cpi_from_fallback: bool,
}

/// Best policy per metric within a group
///
/// `cpi` and `miss_rate` are `None` when every run in the group reported the
/// same miss rate; they render as `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BestPolicies {
    pub time: Policy,
    pub cpi: Option<Policy>,
    pub miss_rate: Option<Policy>,
}

/// One table row: a single program under every policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Program name parsed from the first file of the group
    pub program: String,
    /// Per-policy results, in group order
    pub results: Vec<PolicyResult>,
    /// Derived best policies (ranked layout only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<BestPolicies>,
}

/// Errors that can occur while building a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to parse results file {path:?} at line {line}: {reason}")]
    ResultsParseError {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Results file has no timing line {line} (needed for run {run})")]
    MissingTiming { run: usize, line: usize },

    #[error("Failed to parse run log {path:?}: {reason}")]
    RunLogParseError { path: PathBuf, reason: String },

    #[error("Failed to decompress {path:?}: {reason}")]
    DecompressError { path: PathBuf, reason: String },

    #[error("Cannot derive a program name from file name {0:?}")]
    InvalidFileName(PathBuf),

    #[error("Runs directory {path:?} holds {count} files, not a multiple of {group_size}")]
    IncompleteGroup {
        path: PathBuf,
        count: usize,
        group_size: usize,
    },

    #[error("Runs directory {0:?} contains no run files")]
    NoRuns(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to serialize report: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
