//! Metric extraction from a simulator trailer
//!
//! The simulator ends every log with a fixed-format statistics block. CPI and
//! miss rate are read by position, counting lines and tokens from the end.
//! Lines come from splitting on `\n`, so a log ending in a newline has an
//! empty last line and that line counts towards the offsets.

use crate::config::TrailerLayout;
use crate::types::{Measurement, Policy, ReportError, Result, RunMetrics};
use std::path::Path;

/// Extract CPI and miss rate from a decoded run log
///
/// If the primary CPI line is missing, or too short to hold the CPI token,
/// the fallback line is used instead. Any other gap is an error.
pub fn extract_metrics(
    path: &Path,
    text: &str,
    policy: Policy,
    layout: &TrailerLayout,
) -> Result<RunMetrics> {
    let lines: Vec<&str> = text.split('\n').collect();

    let (cpi_token, cpi_from_fallback) =
        match token_at(&lines, layout.cpi_line, layout.cpi_token) {
            Some(token) => (token, false),
            None => {
                log::warn!(
                    "{:?}: no CPI at line -{}, using fallback line -{}",
                    path,
                    layout.cpi_line,
                    layout.cpi_fallback_line
                );
                let token = token_at(&lines, layout.cpi_fallback_line, layout.cpi_token)
                    .ok_or_else(|| {
                        parse_error(
                            path,
                            format!(
                                "no CPI token {} at line -{} or -{}",
                                layout.cpi_token, layout.cpi_line, layout.cpi_fallback_line
                            ),
                        )
                    })?;
                (token, true)
            }
        };

    let miss_token = token_at(&lines, layout.miss_rate_line, layout.miss_rate_token)
        .ok_or_else(|| {
            parse_error(
                path,
                format!(
                    "no miss rate token {} at line -{}",
                    layout.miss_rate_token, layout.miss_rate_line
                ),
            )
        })?;

    let cpi = Measurement::parse(cpi_token).ok_or_else(|| {
        parse_error(path, format!("CPI {:?} is not a finite number", cpi_token))
    })?;
    let miss_rate = Measurement::parse(miss_token).ok_or_else(|| {
        parse_error(path, format!("miss rate {:?} is not a finite number", miss_token))
    })?;

    Ok(RunMetrics {
        policy,
        cpi,
        miss_rate,
        cpi_from_fallback,
    })
}

/// `token`-th whitespace-separated token (from the end) of the `line`-th
/// line (from the end)
fn token_at<'a>(lines: &[&'a str], line: usize, token: usize) -> Option<&'a str> {
    let line = lines.len().checked_sub(line).map(|i| lines[i])?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len().checked_sub(token).map(|i| tokens[i])
}

fn parse_error(path: &Path, reason: String) -> ReportError {
    ReportError::RunLogParseError {
        path: path.to_path_buf(),
        reason,
    }
}
