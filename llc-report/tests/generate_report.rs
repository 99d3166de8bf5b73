// End-to-end report generation over a temporary results file and runs directory
use llc_report::{
    OutputFormat, Policy, ReportConfig, ReportError, ReportGenerator, ReportLayout, NO_WINNER,
};
use std::fs;
use std::path::{Path, PathBuf};

/// One simulated run: the numbers that end up in its log trailer
struct Run<'a> {
    cpi: &'a str,
    miss: &'a str,
    /// Short logs lack the primary CPI line and use the fallback
    short: bool,
}

fn run<'a>(cpi: &'a str, miss: &'a str) -> Run<'a> {
    Run {
        cpi,
        miss,
        short: false,
    }
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

/// Wrap `data` in a gzip member made of stored deflate blocks
fn gzip(data: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = vec![0x1f, 0x8b, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xff];
    let chunks: Vec<&[u8]> = if data.is_empty() {
        vec![data]
    } else {
        data.chunks(0xFFFF).collect()
    };
    for (i, chunk) in chunks.iter().enumerate() {
        out.push(if i + 1 == chunks.len() { 1 } else { 0 });
        let len = chunk.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(chunk);
    }
    out.extend_from_slice(&crc32(data).to_le_bytes());
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out
}

/// Simulator log with CPI at line -44 (or -39 for short logs) and the miss
/// rate at line -6, counted over the newline-split text
fn run_log(run: &Run) -> String {
    let len = if run.short { 40 } else { 60 };
    let mut lines: Vec<String> = (0..len).map(|i| format!("stat_{} {}", i, i * 7)).collect();
    lines.push(String::new());
    let total = lines.len();

    let cpi_line = if run.short { 39 } else { 44 };
    lines[total - cpi_line] = format!("core 0 CPI {} cycles 1000 instrs 800 ipc 0.8", run.cpi);
    if !run.short {
        lines[total - 39] = "core 0 CPI 99.9 cycles 1 instrs 1 ipc 1".to_string();
    }
    lines[total - 6] = format!("LLC total miss rate: {}", run.miss);
    lines.join("\n")
}

struct Fixture {
    _dir: tempfile::TempDir,
    results: PathBuf,
    runs: PathBuf,
    output: PathBuf,
}

/// Lay out `result.out`, `runs/` and an output path for the given groups
fn fixture(groups: &[(&str, [Run; 3])], times: &[&str]) -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir().unwrap();
    let results = dir.path().join("result.out");
    let runs = dir.path().join("runs");
    let output = dir.path().join("readme.md");
    fs::create_dir(&runs).unwrap();

    let timing: String = times
        .iter()
        .enumerate()
        .map(|(i, t)| format!("run{} elapsed {}\n", i, t))
        .collect();
    fs::write(&results, timing).unwrap();

    for (g, (program, group)) in groups.iter().enumerate() {
        for (p, run) in group.iter().enumerate() {
            let name = format!("{}{}.{}_.gz", g, p, program);
            fs::write(runs.join(name), gzip(run_log(run).as_bytes())).unwrap();
        }
    }

    Fixture {
        _dir: dir,
        results,
        runs,
        output,
    }
}

fn generator(layout: ReportLayout) -> ReportGenerator {
    ReportGenerator::new(ReportConfig::new().with_layout(layout)).unwrap()
}

fn data_rows(markdown: &str) -> Vec<Vec<String>> {
    markdown
        .lines()
        .skip(2)
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn test_one_row_per_group() {
    let f = fixture(
        &[
            ("mcf", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")]),
            ("lbm", [run("2.5", "0.5"), run("2.6", "0.6"), run("2.4", "0.4")]),
        ],
        &["10", "11", "9", "20", "21", "19"],
    );

    let gen = generator(ReportLayout::Plain);
    let report = gen.generate_to_file(&f.results, &f.runs, &f.output).unwrap();
    let written = fs::read_to_string(&f.output).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(written.lines().count(), 4);
    let rows = data_rows(&written);
    assert_eq!(
        rows[0],
        vec!["mcf", "10", "1.5", "0.3", "11", "1.6", "0.4", "9", "1.4", "0.2"]
    );
    assert_eq!(rows[1][0], "lbm");
    assert_eq!(rows[1][1], "20");
}

#[test]
fn test_cpi_from_primary_line() {
    let f = fixture(
        &[("gcc", [run("1.11", "0.1"), run("1.22", "0.2"), run("1.33", "0.3")])],
        &["1", "2", "3"],
    );

    let report = generator(ReportLayout::Plain)
        .generate(&f.results, &f.runs)
        .unwrap();
    let cpis: Vec<&str> = report.rows[0]
        .results
        .iter()
        .map(|r| r.cpi.text.as_str())
        .collect();
    assert_eq!(cpis, vec!["1.11", "1.22", "1.33"]);
}

#[test]
fn test_cpi_fallback_for_short_log() {
    let short = Run {
        cpi: "3.21",
        miss: "0.2",
        short: true,
    };
    let f = fixture(
        &[("milc", [run("1.11", "0.1"), short, run("1.33", "0.3")])],
        &["1", "2", "3"],
    );

    let report = generator(ReportLayout::Plain)
        .generate(&f.results, &f.runs)
        .unwrap();
    let results = &report.rows[0].results;
    assert_eq!(results[0].cpi.text, "1.11");
    assert_eq!(results[1].cpi.text, "3.21");
    assert_eq!(results[2].cpi.text, "1.33");
    assert!(!results[0].cpi_from_fallback);
    assert!(results[1].cpi_from_fallback);
    assert!(!results[2].cpi_from_fallback);
}

#[test]
fn test_equal_miss_rates_render_placeholders() {
    let f = fixture(
        &[("astar", [run("1.2", "0.25"), run("1.1", "0.250"), run("1.3", "0.25")])],
        &["7", "5", "6"],
    );

    let gen = generator(ReportLayout::Ranked);
    gen.generate_to_file(&f.results, &f.runs, &f.output).unwrap();
    let rows = data_rows(&fs::read_to_string(&f.output).unwrap());

    assert_eq!(rows[0].len(), 13);
    assert_eq!(rows[0][10], "Random");
    assert_eq!(rows[0][11], NO_WINNER);
    assert_eq!(rows[0][12], NO_WINNER);
}

#[test]
fn test_best_policies_when_miss_rates_differ() {
    let f = fixture(
        &[("bzip2", [run("1.2", "0.30"), run("1.1", "0.35"), run("1.3", "0.28")])],
        &["7.5", "8.25", "7.25"],
    );

    let report = generator(ReportLayout::Ranked)
        .generate(&f.results, &f.runs)
        .unwrap();
    let best = report.rows[0].best.unwrap();
    assert_eq!(best.time, Policy::Drrip);
    assert_eq!(best.cpi, Some(Policy::Random));
    assert_eq!(best.miss_rate, Some(Policy::Drrip));

    let rows = data_rows(&report.to_markdown());
    assert_eq!(&rows[0][10..], &["DRRIP", "Random", "DRRIP"]);
}

#[test]
fn test_rerun_overwrites_with_identical_output() {
    let f = fixture(
        &[("sjeng", [run("1.2", "0.3"), run("1.1", "0.35"), run("1.3", "0.28")])],
        &["3", "2", "1"],
    );
    fs::write(&f.output, "stale content from an earlier run\n".repeat(50)).unwrap();

    let gen = generator(ReportLayout::Ranked);
    gen.generate_to_file(&f.results, &f.runs, &f.output).unwrap();
    let first = fs::read(&f.output).unwrap();
    gen.generate_to_file(&f.results, &f.runs, &f.output).unwrap();
    let second = fs::read(&f.output).unwrap();

    assert_eq!(first, second);
    assert!(!String::from_utf8(first).unwrap().contains("stale"));
}

#[test]
fn test_incomplete_group_fails_without_output() {
    let f = fixture(
        &[("mcf", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")])],
        &["10", "11", "9", "12"],
    );
    fs::write(f.runs.join("30.mcf_.gz"), gzip(run_log(&run("1.0", "0.1")).as_bytes())).unwrap();

    let err = generator(ReportLayout::Ranked)
        .generate_to_file(&f.results, &f.runs, &f.output)
        .unwrap_err();
    assert!(matches!(err, ReportError::IncompleteGroup { count: 4, .. }));
    assert!(!f.output.exists());
}

#[test]
fn test_missing_timing_line_is_fatal() {
    let f = fixture(
        &[("mcf", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")])],
        &["10", "11"],
    );

    let err = generator(ReportLayout::Plain)
        .generate(&f.results, &f.runs)
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingTiming { run: 2, .. }));
}

#[test]
fn test_timing_stride_of_three() {
    let f = fixture(
        &[("hmmer", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")])],
        &["10", "x", "x", "11", "x", "x", "9", "x", "x"],
    );

    let config = ReportConfig::new()
        .with_layout(ReportLayout::Plain)
        .with_timing_stride(3);
    let report = ReportGenerator::new(config)
        .unwrap()
        .generate(&f.results, &f.runs)
        .unwrap();
    let times: Vec<&str> = report.rows[0]
        .results
        .iter()
        .map(|r| r.time.text.as_str())
        .collect();
    assert_eq!(times, vec!["10", "11", "9"]);
}

#[test]
fn test_plain_text_run_logs() {
    let f = fixture(&[], &["4", "5", "6"]);
    let logs = [run("1.0", "0.1"), run("2.0", "0.2"), run("3.0", "0.3")];
    for (i, log) in logs.iter().enumerate() {
        fs::write(f.runs.join(format!("{}.gobmk_.log", i)), run_log(log)).unwrap();
    }

    let report = generator(ReportLayout::Plain)
        .generate(&f.results, &f.runs)
        .unwrap();
    assert_eq!(report.rows[0].program, "gobmk");
    assert_eq!(report.rows[0].results[2].cpi.text, "3.0");
}

#[test]
fn test_corrupt_gzip_is_fatal() {
    let f = fixture(
        &[("mcf", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")])],
        &["10", "11", "9"],
    );
    let victim: PathBuf = f.runs.join("01.mcf_.gz");
    fs::write(&victim, b"\x1f\x8b truncated").unwrap();

    let err = generator(ReportLayout::Plain)
        .generate(&f.results, &f.runs)
        .unwrap_err();
    assert!(matches!(err, ReportError::DecompressError { ref path, .. } if path == &victim));
}

#[test]
fn test_json_output() {
    let f = fixture(
        &[("namd", [run("1.5", "0.3"), run("1.6", "0.4"), run("1.4", "0.2")])],
        &["10", "11", "9"],
    );

    let config = ReportConfig::new().with_format(OutputFormat::Json);
    let gen = ReportGenerator::new(config).unwrap();
    gen.generate_to_file(&f.results, &f.runs, &f.output).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&f.output).unwrap()).unwrap();
    assert_eq!(value["rows"][0]["program"], "namd");
    assert_eq!(value["rows"][0]["best"]["miss_rate"], "DRRIP");
    assert!(Path::new(&f.output).exists());
}
