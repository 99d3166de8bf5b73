//! LLC Report CLI Application
//!
//! Command-line front end for the llc-report library. It adds:
//! - TOML configuration file loading
//! - Command-line overrides for paths and layout
//! - Logging setup

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use llc_report::{OutputFormat, ReportGenerator, ReportLayout};
use std::path::PathBuf;

mod config;

/// LLC Report - Compare cache replacement policies across simulator runs
#[derive(Parser, Debug)]
#[command(name = "llc-report")]
#[command(about = "Build a policy comparison table from LLC simulator runs", long_about = None)]
#[command(version)]
struct Args {
    /// Results file with one execution-time line per run (default: result.out)
    #[arg(short, long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Directory of per-run simulator logs (default: runs)
    #[arg(long, value_name = "DIR")]
    runs: Option<PathBuf>,

    /// Output file, overwritten on each run (default: readme.md)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (report.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Table layout
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Use every Nth line of the results file
    #[arg(long, value_name = "N")]
    timing_stride: Option<usize>,

    /// Print the report instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Plain,
    Ranked,
}

impl From<LayoutArg> for ReportLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Plain => ReportLayout::Plain,
            LayoutArg::Ranked => ReportLayout::Ranked,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("LLC Report CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using report library v{}", llc_report::VERSION);

    let app_config = resolve_config(&args)?;
    let generator = ReportGenerator::new(app_config.report_config())
        .context("Invalid report configuration")?;

    let input = &app_config.input;
    let report = generator
        .generate(&input.results, &input.runs)
        .with_context(|| {
            format!(
                "Failed to build report from {:?} and {:?}",
                input.results, input.runs
            )
        })?;

    if args.stdout {
        print!("{}", generator.render(&report)?);
    } else {
        let output = &app_config.output.path;
        generator
            .write_report(&report, output)
            .with_context(|| format!("Failed to write report to {:?}", output))?;
    }

    log::info!(
        "{} programs compared across {} policies",
        report.rows.len(),
        report.policies.len()
    );
    Ok(())
}

/// Config file (if any) with command-line overrides applied
fn resolve_config(args: &Args) -> Result<config::AppConfig> {
    let mut app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    if let Some(results) = &args.results {
        app_config.input.results = results.clone();
    }
    if let Some(runs) = &args.runs {
        app_config.input.runs = runs.clone();
    }
    if let Some(output) = &args.output {
        app_config.output.path = output.clone();
    }
    if let Some(layout) = args.layout {
        app_config.output.layout = layout.into();
    }
    if let Some(format) = args.format {
        app_config.output.format = format.into();
    }
    if let Some(stride) = args.timing_stride {
        app_config.timing.stride = stride;
    }

    log::debug!("Effective configuration: {:?}", app_config);
    Ok(app_config)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
