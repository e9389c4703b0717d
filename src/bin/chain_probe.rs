use std::env;
use std::time::Instant;

use chain_dp::{ChainError, ChainOptimizer, ChainSolution};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("chain_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    if let Some(dims) = options.dims.as_deref() {
        if let Err(err) = run_single(dims) {
            eprintln!("chain_probe: {err}");
            std::process::exit(1);
        }
        return;
    }

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Matrix-Chain Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Runs the interval DP engine on chains of increasing length and checks:");
    eprintln!(
        "  • Correctness: costs match an independent u128 full-table DP (up to n = {})",
        options.verify_limit
    );
    eprintln!("  • Performance: wall-clock time (O(n³)) and memory growth (O(n²)) with n");
    eprintln!();
    eprintln!("Metrics explained:");
    eprintln!("  • wall_s: Wall-clock time in seconds (lower is better)");
    eprintln!("  • rss_delta_kib: Resident memory delta in KiB");
    eprintln!("  • status: 'passed' = matches baseline, 'not_checked' = too large to verify");
    eprintln!();
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Varied dimensions...");
    eprintln!("      Deterministic pseudo-random shapes in 1..=97.");
    measurements.extend(run_varied(&options, &mut sys));
    eprintln!();

    eprintln!("[2/3] Uniform dimensions...");
    eprintln!("      Every split ties; checks the closed form and first-split tie-break.");
    measurements.extend(run_uniform(&options, &mut sys));
    eprintln!();

    eprintln!("[3/3] Schedule equivalence...");
    eprintln!("      Forced-parallel and forced-serial schedules must produce identical tables.");
    measurements.extend(run_schedules(&options, &mut sys));
    eprintln!();

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("chain_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    dims: Option<Vec<usize>>,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 256usize;
        let mut dims = None;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else if let Some(value) = arg.strip_prefix("--dims=") {
                dims = Some(parse_dims(value)?);
            } else if arg == "--dims" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --dims".to_string())?
                    .into();
                dims = Some(parse_dims(&value)?);
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
            dims,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin chain_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Longest chain to verify against the baseline DP (default: 256)
  --dims <p0,p1,...,pn>         Optimize a single chain and print its cost and bracketing
  -h, --help                    Print this help message

Examples:
  cargo run --bin chain_probe
  cargo run --bin chain_probe -- --format table --verify-limit 128
  cargo run --bin chain_probe -- --dims 30,35,15,5,10,20,25
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

fn parse_dims(value: &str) -> Result<Vec<usize>, String> {
    value
        .split(',')
        .map(|d| {
            d.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid dimension '{}'", d.trim()))
        })
        .collect()
}

fn run_single(dims: &[usize]) -> Result<(), ChainError> {
    let solution = ChainOptimizer::new().optimize_dims(dims)?;
    println!("matrices: {}", solution.num_items());
    println!("optimal cost: {}", solution.optimal_cost());
    println!("parenthesization: {}", solution.parenthesization());
    for d in solution.split_decisions() {
        println!("  split A{}..A{} after A{}", d.start, d.end, d.split);
    }
    Ok(())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            VerificationStatus::Passed => "✓",
            VerificationStatus::Failed => "✗",
            VerificationStatus::NotChecked => "○",
        }
    }
}

const LENGTHS: &[usize] = &[8, 16, 32, 64, 128, 256, 512];

fn run_varied(options: &Options, sys: &mut System) -> Vec<Measurement> {
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] Testing n = {}... ", idx + 1, total, n);
            let mut cost_result = 0u64;
            let m = measure("varied", format!("n={n}"), sys, || {
                let dims = deterministic_dims(n, 1);
                let solution = match ChainOptimizer::new().optimize_dims(&dims) {
                    Ok(s) => s,
                    Err(err) => return (VerificationStatus::Failed, Some(err.to_string())),
                };
                cost_result = solution.optimal_cost();

                if n <= options.verify_limit {
                    let baseline = full_table_cost(&dims);
                    if baseline == u128::from(cost_result) {
                        (VerificationStatus::Passed, None)
                    } else {
                        (
                            VerificationStatus::Failed,
                            Some(format!("expected {baseline}, got {cost_result}")),
                        )
                    }
                } else {
                    (VerificationStatus::NotChecked, None)
                }
            });
            eprintln!(
                "{} cost={}, time={:.3}s, status={}",
                m.verification_status.icon(),
                cost_result,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn run_uniform(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const DIM: usize = 7;
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] Testing n = {}... ", idx + 1, total, n);
            let m = measure("uniform", format!("n={n}"), sys, || {
                let dims = vec![DIM; n + 1];
                let solution = match ChainOptimizer::new().optimize_dims(&dims) {
                    Ok(s) => s,
                    Err(err) => return (VerificationStatus::Failed, Some(err.to_string())),
                };
                if n > options.verify_limit {
                    return (VerificationStatus::NotChecked, None);
                }
                let expected = (n as u64 - 1) * (DIM as u64).pow(3);
                if solution.optimal_cost() != expected {
                    return (
                        VerificationStatus::Failed,
                        Some(format!("expected {expected}, got {}", solution.optimal_cost())),
                    );
                }
                match first_split_violation(&solution) {
                    None => (VerificationStatus::Passed, None),
                    Some((i, j, k)) => (
                        VerificationStatus::Failed,
                        Some(format!("split[{i}][{j}] = {k}, expected {i}")),
                    ),
                }
            });
            eprintln!(
                "{} time={:.3}s, status={}",
                m.verification_status.icon(),
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn run_schedules(options: &Options, sys: &mut System) -> Vec<Measurement> {
    let total = LENGTHS.len();
    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] Testing n = {}... ", idx + 1, total, n);
            let m = measure("schedules", format!("n={n}"), sys, || {
                let dims = deterministic_dims(n, 5);
                let eager = ChainOptimizer::new()
                    .with_parallel_min_width(1)
                    .optimize_dims(&dims);
                if n > options.verify_limit {
                    return match eager {
                        Ok(_) => (VerificationStatus::NotChecked, None),
                        Err(err) => (VerificationStatus::Failed, Some(err.to_string())),
                    };
                }
                let serial = ChainOptimizer::new()
                    .with_parallel_min_width(usize::MAX)
                    .optimize_dims(&dims);
                match (eager, serial) {
                    (Ok(a), Ok(b)) if a == b => (VerificationStatus::Passed, None),
                    (Ok(_), Ok(_)) => (
                        VerificationStatus::Failed,
                        Some("tables differ between schedules".to_string()),
                    ),
                    (Err(err), _) | (_, Err(err)) => {
                        (VerificationStatus::Failed, Some(err.to_string()))
                    }
                }
            });
            eprintln!(
                "{} time={:.3}s, status={}",
                m.verification_status.icon(),
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn first_split_violation(solution: &ChainSolution) -> Option<(usize, usize, usize)> {
    let n = solution.num_items();
    for i in 1..=n {
        for j in (i + 1)..=n {
            match solution.split().get(i, j) {
                Some(k) if k == i => {}
                Some(k) => return Some((i, j, k)),
                None => return Some((i, j, 0)),
            }
        }
    }
    None
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Test Summary");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    let total = measurements.len().max(1);
    let pct = |count: usize| 100.0 * count as f64 / total as f64;
    eprintln!("Verification Results:");
    eprintln!("  Total runs: {}", measurements.len());
    eprintln!("  ✓ Passed: {} ({:.1}%)", passed, pct(passed));
    eprintln!("  ✗ Failed: {} ({:.1}%)", failed, pct(failed));
    eprintln!(
        "  ○ Not checked (n > {}): {} ({:.1}%)",
        options.verify_limit,
        not_checked,
        pct(not_checked)
    );
    eprintln!();

    if failed > 0 {
        eprintln!("Failed Runs:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {}", detail);
                }
            }
        }
        eprintln!();
    }

    eprintln!("Performance Statistics by Scenario:");
    eprintln!();
    let mut scenarios: Vec<&'static str> = measurements.iter().map(|m| m.scenario).collect();
    scenarios.dedup();
    for scenario in scenarios {
        let ms: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.scenario == scenario)
            .collect();
        let min_time = ms.iter().map(|m| m.wall_s).fold(f64::INFINITY, f64::min);
        let max_time = ms.iter().map(|m| m.wall_s).fold(0.0, f64::max);
        let avg_time = ms.iter().map(|m| m.wall_s).sum::<f64>() / ms.len() as f64;
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);

        eprintln!("  {}:", scenario);
        eprintln!("    Runs: {}", ms.len());
        eprintln!(
            "    Time: min={:.3}s, max={:.3}s, avg={:.3}s",
            min_time, max_time, avg_time
        );
        eprintln!("    Memory: max_delta={} KiB", max_mem);
        eprintln!();
    }

    eprintln!("{}", "=".repeat(80));
    if failed == 0 {
        eprintln!("✓ All verified runs passed.");
    } else {
        eprintln!("✗ {} run(s) failed. Please review the errors above.", failed);
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>12}  {:>14}  {:>12}  {}",
        "scenario",
        "size",
        "wall_s",
        "rss_delta_kib",
        "status",
        "detail",
        col1 = col1,
        col2 = col2
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<12}  {:-<14}  {:-<12}  {:-<12}",
        "",
        "",
        "",
        "",
        "",
        "",
        col1 = col1,
        col2 = col2
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>12.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail.as_deref().unwrap_or(""),
            col1 = col1,
            col2 = col2
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

/// `p[0..=n]` with entries in `1..=97`, reproducible per `seed`.
fn deterministic_dims(n: usize, seed: usize) -> Vec<usize> {
    (0..=n).map(|i| 1 + (i * 37 + seed * 11) % 97).collect()
}

/// Textbook full-table DP in `u128`, independent of the engine.
fn full_table_cost(p: &[usize]) -> u128 {
    let n = p.len() - 1;
    let mut m = vec![vec![0u128; n + 1]; n + 1];
    for len in 2..=n {
        for i in 1..=(n - len + 1) {
            let j = i + len - 1;
            m[i][j] = u128::MAX;
            for k in i..j {
                let cost =
                    m[i][k] + m[k + 1][j] + (p[i - 1] as u128) * (p[k] as u128) * (p[j] as u128);
                if cost < m[i][j] {
                    m[i][j] = cost;
                }
            }
        }
    }
    m[1][n]
}
