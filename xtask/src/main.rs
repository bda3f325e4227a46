use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Frontier workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark every traversal strategy and write a comparison report
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,
    },
}

const BENCH: &str = "traversal_benchmark";
const BASELINE: &str = "sequential";

/// workload -> engine label (e.g. `threads_static/4`) -> mean time in ns
type Results = BTreeMap<String, BTreeMap<String, f64>>;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench { quick, report_only } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report()?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Running traversal benchmarks...");
    let start = Instant::now();

    let mut cmd = Command::new("cargo");
    cmd.env("CARGO_INCREMENTAL", "0")
        .args(["bench", "--bench", BENCH, "--features", "parallel"]);

    // Args for the test runner (Criterion) go after --
    cmd.arg("--");
    if quick {
        cmd.args(["--measurement-time", "0.5", "--sample-size", "10", "--noplot"]);
    }

    let status = cmd.status().context("failed to run cargo bench")?;
    if !status.success() {
        anyhow::bail!("benchmark run failed");
    }

    println!("Finished in {:.2?}", start.elapsed());
    Ok(())
}

fn generate_report() -> Result<()> {
    println!("\n>>> Generating Report...");
    let criterion_dir = Path::new("target/criterion");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, criterion_dir, &mut results)?;

    let report_path = Path::new("benchmark_results/report.md");
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }

    use std::io::Write;
    let mut file = fs::File::create(report_path)?;
    writeln!(file, "# Traversal Strategy Report")?;

    for (workload, engines) in &results {
        let baseline = engines.get(BASELINE).copied();

        writeln!(file, "\n## {workload}\n")?;
        writeln!(file, "| Engine | Mean | Speedup vs {BASELINE} |")?;
        writeln!(file, "|---|---|---|")?;
        for (engine, &ns) in engines {
            let speedup = match baseline {
                Some(base) if ns > 0.0 => format!("**{:.2}x**", base / ns),
                _ => "-".to_string(),
            };
            writeln!(file, "| {engine} | {} | {speedup} |", format_time(ns))?;
        }
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn format_time(ns: f64) -> String {
    if ns > 1e9 {
        format!("{:.2} s", ns / 1e9)
    } else if ns > 1e6 {
        format!("{:.2} ms", ns / 1e6)
    } else if ns > 1e3 {
        format!("{:.2} us", ns / 1e3)
    } else {
        format!("{ns:.0} ns")
    }
}

/// Walks `target/criterion/<workload>/<engine>[/<workers>]/new/estimates.json`.
fn collect_results(root: &Path, dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().and_then(|s| s.to_str()) == Some("report") {
                continue;
            }
            collect_results(root, &path, results)?;
            continue;
        }
        if path.file_name().and_then(|s| s.to_str()) != Some("estimates.json") {
            continue;
        }

        // Only the latest run; skip saved baselines.
        let Some(run_dir) = path.parent() else { continue };
        if run_dir.file_name().and_then(|s| s.to_str()) != Some("new") {
            continue;
        }
        let Some(bench_dir) = run_dir.parent() else { continue };
        let Ok(relative) = bench_dir.strip_prefix(root) else { continue };

        let mut parts = relative.iter().filter_map(|p| p.to_str());
        let Some(workload) = parts.next() else { continue };
        let engine = parts.collect::<Vec<_>>().join("/");
        if engine.is_empty() {
            continue;
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        if let Some(mean) = json
            .get("mean")
            .and_then(|m| m.get("point_estimate"))
            .and_then(serde_json::Value::as_f64)
        {
            results
                .entry(workload.to_string())
                .or_default()
                .insert(engine, mean);
        }
    }
    Ok(())
}
