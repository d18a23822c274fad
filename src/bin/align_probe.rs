use std::env;
use std::time::Instant;

use motif_align::{Aligner, AlignerBuilder, MatchScorer, Score, Symbol, SENTINEL};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const MATCH_BONUS: Score = 3;
const MISMATCH_PENALTY: Score = 1;
const GAP_PENALTY: Score = 5;
/// Target symbols between two sentinels in the synthetic corpus.
const TRACK_LEN: usize = 48;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("align_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let mut builder = AlignerBuilder::new(MatchScorer::new(MATCH_BONUS, MISMATCH_PENALTY))
        .gap_penalty(GAP_PENALTY);
    if let Some(threads) = options.threads {
        builder = builder.threads(threads);
    }
    let aligner = match builder.build() {
        Ok(aligner) => aligner,
        Err(err) => {
            eprintln!("align_probe: {err}");
            std::process::exit(2);
        }
    };

    eprintln!("{}", "=".repeat(72));
    eprintln!("motif-align probe: timing and baseline checks per aligner");
    eprintln!("  query length {}, baseline verification up to |T| = {}", options.query_len, options.verify_limit);
    eprintln!("{}", "=".repeat(72));

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/4] global");
    measurements.extend(run_variant(Variant::Global, &aligner, &options, &mut sys));
    eprintln!("[2/4] local (full matrix)");
    measurements.extend(run_variant(Variant::Local, &aligner, &options, &mut sys));
    eprintln!("[3/4] local (linear space)");
    measurements.extend(run_variant(Variant::Linear, &aligner, &options, &mut sys));
    eprintln!("[4/4] local (wavefront)");
    measurements.extend(run_variant(Variant::Wavefront, &aligner, &options, &mut sys));

    let failed = measurements
        .iter()
        .filter(|m| matches!(m.verification, VerificationStatus::Failed))
        .count();
    eprintln!();
    if failed == 0 {
        eprintln!("all checked runs matched the baseline");
    } else {
        eprintln!("{failed} run(s) disagreed with the baseline");
    }

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("align_probe output error: {err}");
        std::process::exit(1);
    }
    if failed > 0 {
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
    query_len: usize,
    max_target: usize,
    threads: Option<usize>,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut options = Options {
            format: OutputFormat::Csv,
            verify_limit: 1024,
            query_len: 32,
            max_target: 16384,
            threads: None,
        };

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            }
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = || -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {flag}")),
                }
            };
            match flag.as_str() {
                "--format" => options.format = OutputFormat::from_str(&value()?)?,
                "--verify-limit" => options.verify_limit = parse_count(&value()?, "verify limit")?,
                "--query-len" => options.query_len = parse_count(&value()?, "query length")?,
                "--max-target" => options.max_target = parse_count(&value()?, "max target")?,
                "--threads" => options.threads = Some(parse_count(&value()?, "threads")?),
                _ => return Err(format!("unrecognized argument '{flag}'")),
            }
        }

        Ok(options)
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --release --bin align_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest target length checked against the i64 baseline (default: 1024)
  --query-len <N>               Query length (default: 32)
  --max-target <N>              Largest target length (default: 16384)
  --threads <N>                 Dedicated pool size for the wavefront aligner
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_count(value: &str, what: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("{what} must be a non-negative integer"))
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

#[derive(Copy, Clone)]
enum Variant {
    Global,
    Local,
    Linear,
    Wavefront,
}

impl Variant {
    fn label(self) -> &'static str {
        match self {
            Variant::Global => "global",
            Variant::Local => "local",
            Variant::Linear => "local_linear",
            Variant::Wavefront => "local_wavefront",
        }
    }

    /// Full-matrix variants stop earlier than the two-row one.
    fn max_target(self, options: &Options) -> usize {
        match self {
            Variant::Linear => options.max_target,
            _ => options.max_target.min(4096),
        }
    }
}

#[derive(Clone, Serialize)]
struct Measurement {
    scenario: &'static str,
    target_len: usize,
    score: Score,
    wall_s: f64,
    rss_delta_kib: u64,
    verification: VerificationStatus,
    detail: Option<String>,
}

#[derive(Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
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
}

fn run_variant(
    variant: Variant,
    aligner: &Aligner<MatchScorer>,
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    let query = motif(options.query_len, 3);
    target_sizes(variant.max_target(options))
        .into_iter()
        .map(|len| {
            let target = corpus(len);
            let before = rss_kib(sys);
            let start = Instant::now();
            let score = match variant {
                Variant::Global => aligner.global(&query, &target).score,
                Variant::Local => aligner.local(&query, &target).score,
                Variant::Linear => aligner.local_linear(&query, &target),
                Variant::Wavefront => aligner.local_wavefront(&query, &target).score,
            };
            let wall_s = start.elapsed().as_secs_f64();
            let rss_delta_kib = rss_kib(sys).saturating_sub(before);

            let (verification, detail) = if len <= options.verify_limit {
                let expected = match variant {
                    Variant::Global => baseline_global(&query, &target),
                    _ => baseline_local(&query, &target),
                };
                if expected == i64::from(score) {
                    (VerificationStatus::Passed, None)
                } else {
                    (
                        VerificationStatus::Failed,
                        Some(format!("expected {expected}, got {score}")),
                    )
                }
            } else {
                (VerificationStatus::NotChecked, None)
            };

            eprintln!(
                "      |T|={len:<6} score={score:<8} time={wall_s:.3}s status={}",
                verification.label()
            );
            Measurement {
                scenario: variant.label(),
                target_len: len,
                score,
                wall_s,
                rss_delta_kib,
                verification,
                detail,
            }
        })
        .collect()
}

fn target_sizes(max: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut len = 256;
    while len <= max {
        sizes.push(len);
        len *= 2;
    }
    sizes
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,target_len,score,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m.detail.as_deref().unwrap_or_default().replace('"', "'");
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.target_len,
            m.score,
            m.wall_s,
            m.rss_delta_kib,
            m.verification.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());

    println!(
        "{:<col1$}  {:>10}  {:>10}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "target_len", "score", "wall_s", "rss_delta_kib", "status"
    );
    println!("{}", "-".repeat(col1 + 72));
    for m in measurements {
        println!(
            "{:<col1$}  {:>10}  {:>10}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.target_len,
            m.score,
            m.wall_s,
            m.rss_delta_kib,
            m.verification.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    let text = serde_json::to_string_pretty(measurements).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}

/// Deterministic interval sequence in `-6..=6`.
fn motif(len: usize, phase: usize) -> Vec<Symbol> {
    (0..len)
        .map(|i| ((i * 7 + phase) % 13) as Symbol - 6)
        .collect()
}

/// Concatenated synthetic tracks, each closed by a sentinel.
fn corpus(len: usize) -> Vec<Symbol> {
    let mut out = Vec::with_capacity(len);
    let mut track = 0;
    while out.len() < len {
        let body = motif(TRACK_LEN.min(len - out.len()), track);
        out.extend(body);
        if out.len() < len {
            out.push(SENTINEL);
        }
        track += 1;
    }
    out
}

fn sigma(a: Symbol, b: Symbol) -> i64 {
    if a == SENTINEL || b == SENTINEL {
        // Far below any reachable sum, still safe to add in i64.
        -(1 << 40)
    } else if a == b {
        i64::from(MATCH_BONUS)
    } else {
        -i64::from(MISMATCH_PENALTY)
    }
}

fn baseline_global(q: &[Symbol], t: &[Symbol]) -> i64 {
    let g = i64::from(GAP_PENALTY);
    let (m, n) = (q.len(), t.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];
    for j in 1..=n {
        dp[0][j] = dp[0][j - 1] - g;
    }
    for i in 1..=m {
        dp[i][0] = dp[i - 1][0] - g;
        for j in 1..=n {
            dp[i][j] = (dp[i - 1][j] - g)
                .max(dp[i][j - 1] - g)
                .max(dp[i - 1][j - 1] + sigma(q[i - 1], t[j - 1]));
        }
    }
    dp[m][n]
}

fn baseline_local(q: &[Symbol], t: &[Symbol]) -> i64 {
    let g = i64::from(GAP_PENALTY);
    let (m, n) = (q.len(), t.len());
    let mut dp = vec![vec![0i64; n + 1]; m + 1];
    let mut best = 0;
    for i in 1..=m {
        for j in 1..=n {
            let top = if q[i - 1] == SENTINEL { i64::MIN } else { dp[i - 1][j] - g };
            let left = if t[j - 1] == SENTINEL { i64::MIN } else { dp[i][j - 1] - g };
            let diag = dp[i - 1][j - 1] + sigma(q[i - 1], t[j - 1]);
            dp[i][j] = top.max(left).max(diag).max(0);
            best = best.max(dp[i][j]);
        }
    }
    best
}
