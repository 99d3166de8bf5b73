//! Report assembly and rendering
//!
//! A report is one row per program. Each row carries the time, CPI, and miss
//! rate of every policy and, in the ranked layout, which policy did best.

use crate::config::{OutputFormat, ReportLayout};
use crate::types::{BestPolicies, Policy, PolicyResult, ReportRow, Result};
use serde::Serialize;

/// Placeholder for a best-policy column that has no winner
pub const NO_WINNER: &str = "--";

/// Complete comparison report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub layout: ReportLayout,
    /// Column order of the policy blocks
    pub policies: Vec<Policy>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(layout: ReportLayout, policies: Vec<Policy>) -> Self {
        Self {
            layout,
            policies,
            rows: Vec::new(),
        }
    }

    /// Append a row built from one group of runs
    pub fn push_group(&mut self, program: String, results: Vec<PolicyResult>) {
        let best = match self.layout {
            ReportLayout::Plain => None,
            ReportLayout::Ranked => best_policies(&results),
        };
        self.rows.push(ReportRow {
            program,
            results,
            best,
        });
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Markdown => Ok(self.to_markdown()),
            OutputFormat::Json => {
                let mut out = serde_json::to_string_pretty(self)?;
                out.push('\n');
                Ok(out)
            }
        }
    }

    /// Render as a markdown table: header, separator, one line per row
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let ranked = self.layout == ReportLayout::Ranked;

        out.push_str("| **Program** |");
        for policy in &self.policies {
            out.push_str(&format!(
                " **{p}_time** | **{p}_CPI** | **{p}_miss** |",
                p = policy.label()
            ));
        }
        if ranked {
            out.push_str(" **Best_time** | **Best_CPI** | **Best_miss** |");
        }
        out.push('\n');

        out.push_str("| ----: |");
        for _ in &self.policies {
            out.push_str(" -------: | ----: | ----: |");
        }
        if ranked {
            out.push_str(" :----: | :----: | :----: |");
        }
        out.push('\n');

        for row in &self.rows {
            out.push_str("| ");
            out.push_str(&row.program);
            for result in &row.results {
                out.push_str(&format!(
                    " | {} | {} | {}",
                    result.time, result.cpi, result.miss_rate
                ));
            }
            if ranked {
                if let Some(best) = &row.best {
                    out.push_str(&format!(
                        " | {} | {} | {}",
                        best.time,
                        label_or_placeholder(best.cpi),
                        label_or_placeholder(best.miss_rate)
                    ));
                }
            }
            out.push_str(" |\n");
        }

        out
    }
}

fn label_or_placeholder(policy: Option<Policy>) -> &'static str {
    policy.map(|p| p.label()).unwrap_or(NO_WINNER)
}

/// Pick the best policy per metric within one group
///
/// Time always has a winner. CPI and miss rate only have one when the miss
/// rates differ across the group. Ties go to the earliest policy.
pub fn best_policies(results: &[PolicyResult]) -> Option<BestPolicies> {
    let first = results.first()?;
    let time = argmin(results, |r| r.time.value)?;

    let miss_rates_differ = results
        .iter()
        .any(|r| r.miss_rate.value != first.miss_rate.value);

    let (cpi, miss_rate) = if miss_rates_differ {
        (
            argmin(results, |r| r.cpi.value),
            argmin(results, |r| r.miss_rate.value),
        )
    } else {
        (None, None)
    };

    Some(BestPolicies {
        time,
        cpi,
        miss_rate,
    })
}

fn argmin<F>(results: &[PolicyResult], key: F) -> Option<Policy>
where
    F: Fn(&PolicyResult) -> f64,
{
    let mut best: Option<&PolicyResult> = None;
    for result in results {
        if best.map_or(true, |current| key(result) < key(current)) {
            best = Some(result);
        }
    }
    best.map(|r| r.policy)
}
