//! Configuration loading and parsing
//!
//! Every setting has a default, so an empty file (or no file at all) gives
//! the stock `result.out` + `runs/` -> `readme.md` behaviour.

use anyhow::{Context, Result};
use llc_report::{
    OutputFormat, Policy, ProgramNameRule, ReportConfig, ReportLayout, TimingLayout,
    TrailerLayout,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from report.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Policy of each file within a group, in listing order
    #[serde(default = "Policy::default_order")]
    pub policies: Vec<Policy>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub trailer: TrailerLayout,
    #[serde(default)]
    pub timing: TimingLayout,
    #[serde(default)]
    pub naming: ProgramNameRule,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policies: Policy::default_order(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            trailer: TrailerLayout::default(),
            timing: TimingLayout::default(),
            naming: ProgramNameRule::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default = "default_results")]
    pub results: PathBuf,
    #[serde(default = "default_runs")]
    pub runs: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            results: default_results(),
            runs: default_runs(),
        }
    }
}

fn default_results() -> PathBuf {
    PathBuf::from("result.out")
}

fn default_runs() -> PathBuf {
    PathBuf::from("runs")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub layout: ReportLayout,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output(),
            format: OutputFormat::default(),
            layout: ReportLayout::default(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from("readme.md")
}

impl AppConfig {
    /// Library configuration for the generator
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig::new()
            .with_trailer(self.trailer)
            .with_timing_stride(self.timing.stride)
            .with_naming(self.naming)
            .with_layout(self.output.layout)
            .with_format(self.output.format)
            .with_policies(self.policies.clone())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config
        .report_config()
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    Ok(config)
}
