//! Main report generator API
//!
//! `ReportGenerator` ties the pipeline together: read the results file, list
//! the run logs, walk them in groups (one group per program, one file per
//! policy), and assemble the comparison report.

use crate::config::ReportConfig;
use crate::formats::read_run_log;
use crate::report::Report;
use crate::runs::{list_runs, program_name};
use crate::timing::TimingLog;
use crate::trailer::extract_metrics;
use crate::types::{PolicyResult, ReportError, Result};
use std::fs;
use std::path::Path;

/// Entry point for building comparison reports
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator, rejecting unusable configurations up front
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the report from a results file and a runs directory
    ///
    /// Run `i` in sorted directory order takes its time from the results
    /// file by position and its policy from its position in the group.
    ///
    /// # Example
    /// ```no_run
    /// use llc_report::{ReportConfig, ReportGenerator};
    /// use std::path::Path;
    ///
    /// let generator = ReportGenerator::new(ReportConfig::new()).unwrap();
    /// let report = generator
    ///     .generate(Path::new("result.out"), Path::new("runs"))
    ///     .unwrap();
    /// println!("{}", report.to_markdown());
    /// ```
    pub fn generate(&self, results_path: &Path, runs_dir: &Path) -> Result<Report> {
        let timings = TimingLog::from_file(results_path)?;
        let runs = list_runs(runs_dir)?;
        let group_size = self.config.group_size();

        if runs.is_empty() {
            return Err(ReportError::NoRuns(runs_dir.to_path_buf()));
        }
        if runs.len() % group_size != 0 {
            return Err(ReportError::IncompleteGroup {
                path: runs_dir.to_path_buf(),
                count: runs.len(),
                group_size,
            });
        }

        let mut report = Report::new(self.config.layout, self.config.policies.clone());

        for (group_index, group) in runs.chunks(group_size).enumerate() {
            let program = program_name(&group[0], &self.config.naming)?;
            log::debug!("Group {}: {}", group_index, program);

            let mut results = Vec::with_capacity(group_size);
            for (position, path) in group.iter().enumerate() {
                let run = group_index * group_size + position;
                let policy = self.config.policies[position];

                let text = read_run_log(path)?;
                let metrics = extract_metrics(path, &text, policy, &self.config.trailer)?;
                let time = timings.time_for_run(run, &self.config.timing)?;
                log::debug!(
                    "Run {} ({:?}, {}): time={} cpi={}{} miss={}",
                    run,
                    path,
                    policy,
                    time,
                    metrics.cpi,
                    if metrics.cpi_from_fallback { " (fallback)" } else { "" },
                    metrics.miss_rate
                );

                results.push(PolicyResult {
                    policy,
                    time,
                    cpi: metrics.cpi,
                    miss_rate: metrics.miss_rate,
                    cpi_from_fallback: metrics.cpi_from_fallback,
                });
            }

            report.push_group(program, results);
        }

        log::info!("Built report with {} rows", report.rows.len());
        Ok(report)
    }

    /// Render `report` in the configured format
    pub fn render(&self, report: &Report) -> Result<String> {
        report.render(self.config.format)
    }

    /// Render `report` and overwrite `output` with it
    pub fn write_report(&self, report: &Report, output: &Path) -> Result<()> {
        let rendered = self.render(report)?;
        fs::write(output, rendered)?;
        log::info!("Report written to {:?}", output);
        Ok(())
    }

    /// Generate and write in one step; nothing is written if generation fails
    pub fn generate_to_file(
        &self,
        results_path: &Path,
        runs_dir: &Path,
        output: &Path,
    ) -> Result<Report> {
        let report = self.generate(results_path, runs_dir)?;
        self.write_report(&report, output)?;
        Ok(report)
    }
}
