//! Report configuration types
//!
//! The simulator prints a fixed-format trailer at the end of every run log.
//! Where CPI and miss rate sit in that trailer is a contract with the
//! simulator, so the offsets live here as named settings rather than inside
//! the parser.

use crate::types::{Policy, ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the report generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where CPI and miss rate are found in each run log
    pub trailer: TrailerLayout,

    /// How timing lines in the results file map onto runs
    pub timing: TimingLayout,

    /// How the program name is cut out of a run file name
    pub naming: ProgramNameRule,

    /// Table columns to emit
    pub layout: ReportLayout,

    /// Output encoding
    pub format: OutputFormat,

    /// Policy of each file within a group, in directory-listing order
    pub policies: Vec<Policy>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            trailer: TrailerLayout::default(),
            timing: TimingLayout::default(),
            naming: ProgramNameRule::default(),
            layout: ReportLayout::default(),
            format: OutputFormat::default(),
            policies: Policy::default_order(),
        }
    }
}

/// Offsets into the simulator's trailer, all counted from the end of the
/// newline-split file (1 = last line / last token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailerLayout {
    /// Line holding the miss rate (default: 6)
    pub miss_rate_line: usize,
    /// Token of that line holding the miss rate (default: 1)
    pub miss_rate_token: usize,
    /// Line holding the CPI (default: 44)
    pub cpi_line: usize,
    /// Line used when `cpi_line` is absent (default: 39)
    pub cpi_fallback_line: usize,
    /// Token of the CPI line holding the CPI (default: 7)
    pub cpi_token: usize,
}

impl Default for TrailerLayout {
    fn default() -> Self {
        Self {
            miss_rate_line: 6,
            miss_rate_token: 1,
            cpi_line: 44,
            cpi_fallback_line: 39,
            cpi_token: 7,
        }
    }
}

/// Mapping from run index to results-file line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingLayout {
    /// Run `i` reads its time from line `i * stride` (0-based)
    pub stride: usize,
}

impl Default for TimingLayout {
    fn default() -> Self {
        Self { stride: 1 }
    }
}

/// Program name extraction from a run file name
///
/// The name is the `component`-th dot-separated piece of the file name with
/// `trim_trailing` characters dropped from its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramNameRule {
    pub component: usize,
    pub trim_trailing: usize,
}

impl Default for ProgramNameRule {
    fn default() -> Self {
        Self {
            component: 1,
            trim_trailing: 1,
        }
    }
}

/// Which columns the table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLayout {
    /// Program plus time/CPI/miss per policy
    Plain,
    /// Plain columns plus best time, best CPI, and best miss rate
    #[default]
    Ranked,
}

/// Output encoding of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl ReportConfig {
    /// Create a new report configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the trailer layout
    pub fn with_trailer(mut self, trailer: TrailerLayout) -> Self {
        self.trailer = trailer;
        self
    }

    /// Builder method: set the results-file stride
    pub fn with_timing_stride(mut self, stride: usize) -> Self {
        self.timing.stride = stride;
        self
    }

    /// Builder method: set the program name rule
    pub fn with_naming(mut self, naming: ProgramNameRule) -> Self {
        self.naming = naming;
        self
    }

    /// Builder method: set the table layout
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder method: set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder method: set the policy order within a group
    pub fn with_policies(mut self, policies: Vec<Policy>) -> Self {
        self.policies = policies;
        self
    }

    /// Number of run files per table row
    pub fn group_size(&self) -> usize {
        self.policies.len()
    }

    /// Reject settings the generator cannot work with
    pub fn validate(&self) -> Result<()> {
        let t = &self.trailer;
        let offsets = [
            ("trailer.miss_rate_line", t.miss_rate_line),
            ("trailer.miss_rate_token", t.miss_rate_token),
            ("trailer.cpi_line", t.cpi_line),
            ("trailer.cpi_fallback_line", t.cpi_fallback_line),
            ("trailer.cpi_token", t.cpi_token),
            ("timing.stride", self.timing.stride),
        ];
        for (name, value) in offsets {
            if value == 0 {
                return Err(ReportError::InvalidConfig(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        if self.policies.len() != 3 {
            return Err(ReportError::InvalidConfig(format!(
                "expected 3 policies per group, got {}",
                self.policies.len()
            )));
        }

        let distinct: HashSet<_> = self.policies.iter().collect();
        if distinct.len() != self.policies.len() {
            return Err(ReportError::InvalidConfig(
                "policies must not repeat".to_string(),
            ));
        }

        Ok(())
    }
}
