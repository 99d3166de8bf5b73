//! LLC Replacement Policy Report Library
//!
//! Builds a comparison table of cache replacement policies (LRU, Random,
//! DRRIP) from the output of a last-level-cache simulator.
//!
//! # Architecture
//!
//! The library is a small sequential pipeline:
//! - Reads a results file with one execution-time line per run
//! - Lists the per-run simulator logs (gzip or plain text) in sorted order
//! - Extracts CPI and miss rate from each log's fixed-format trailer
//! - Groups runs in threes, one per policy, into report rows
//! - Renders the rows as a markdown table (or JSON)
//!
//! Runs, timing lines, and policies are matched by position only. The
//! upstream benchmark driver is responsible for producing them in the same
//! order.
//!
//! # Example Usage
//!
//! ```no_run
//! use llc_report::{ReportConfig, ReportGenerator, ReportLayout};
//! use std::path::Path;
//!
//! let config = ReportConfig::new()
//!     .with_layout(ReportLayout::Ranked)
//!     .with_timing_stride(3);
//!
//! let generator = ReportGenerator::new(config).unwrap();
//! generator
//!     .generate_to_file(
//!         Path::new("result.out"),
//!         Path::new("runs"),
//!         Path::new("readme.md"),
//!     )
//!     .unwrap();
//! ```

// Public modules
pub mod config;
pub mod formats;
pub mod generator;
pub mod report;
pub mod runs;
pub mod timing;
pub mod trailer;
pub mod types;

// Re-export main types for convenience
pub use config::{
    OutputFormat, ProgramNameRule, ReportConfig, ReportLayout, TimingLayout, TrailerLayout,
};
pub use generator::ReportGenerator;
pub use report::{Report, NO_WINNER};
pub use types::{
    BestPolicies, Measurement, Policy, PolicyResult, ReportError, ReportRow, Result, RunMetrics,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
