use std::io;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cbench_codecs::{all_codecs, codec_by_name, default_codecs};
use cbench_core::{Codec, Harness, HarnessConfig};

mod payload;

use payload::{read_payload, synthetic_payload};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "cbench",
    about = "Sweep compression levels across codecs and report the time/size trade-off",
    version
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Benchmark every level of each codec against one payload
    Run {
        /// Payload file ("-" reads stdin)
        #[arg(required_unless_present = "synthetic_bytes")]
        input: Option<PathBuf>,
        /// Use a generated file-listing payload of this many bytes instead of INPUT
        #[arg(long, conflicts_with = "input")]
        synthetic_bytes: Option<usize>,
        /// Codec to run, repeatable, in run order (default: LZMA Gzip BZ2 Zstandard Brotli)
        #[arg(short, long = "codec")]
        codecs: Vec<String>,
        /// Restrict a codec's levels, e.g. `zstd=1..=9` or `gzip=6`
        #[arg(long = "levels", value_parser = parse_level_override)]
        levels: Vec<(String, RangeInclusive<i32>)>,
        /// Directory for the CSV reports
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Print tables only; skip CSV files
        #[arg(long)]
        no_csv: bool,
        /// Sweep codecs concurrently (levels within a codec stay sequential)
        #[arg(long)]
        parallel: bool,
    },
    /// List available codecs and their level ranges
    Codecs,
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// Parse `NAME=LO..=HI`, `NAME=LO..HI` (exclusive end), or `NAME=LEVEL`.
fn parse_level_override(arg: &str) -> Result<(String, RangeInclusive<i32>), String> {
    let (name, spec) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=RANGE, got '{arg}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<i32>()
            .map_err(|e| format!("invalid level '{s}' in '{arg}': {e}"))
    };
    let range = if let Some((lo, hi)) = spec.split_once("..=") {
        parse(lo)?..=parse(hi)?
    } else if let Some((lo, hi)) = spec.split_once("..") {
        parse(lo)?..=parse(hi)?.saturating_sub(1)
    } else {
        let level = parse(spec)?;
        level..=level
    };
    Ok((name.trim().to_string(), range))
}

fn select_codecs(names: &[String]) -> anyhow::Result<Vec<Arc<dyn Codec>>> {
    if names.is_empty() {
        return Ok(default_codecs());
    }
    names
        .iter()
        .map(|name| codec_by_name(name).map_err(anyhow::Error::from))
        .collect()
}

/// Map each override onto the canonical name of a selected codec. An override
/// naming a codec that is not part of this run is an error.
fn resolve_level_overrides(
    codecs: &[Arc<dyn Codec>],
    overrides: Vec<(String, RangeInclusive<i32>)>,
) -> anyhow::Result<Vec<(&'static str, RangeInclusive<i32>)>> {
    overrides
        .into_iter()
        .map(|(name, levels)| {
            // Canonicalise aliases so `zstd=...` reaches the "Zstandard" sweep.
            let canonical = codec_by_name(&name)?.name();
            if !codecs.iter().any(|c| c.name() == canonical) {
                let selected: Vec<&str> = codecs.iter().map(|c| c.name()).collect();
                anyhow::bail!(
                    "--levels {name}: codec {canonical} is not selected (running: {})",
                    selected.join(", ")
                );
            }
            Ok((canonical, levels))
        })
        .collect()
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("cbench_core={level},cbench_cli={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ── Subcommand implementations ─────────────────────────────────────────────

struct RunArgs {
    input: Option<PathBuf>,
    synthetic_bytes: Option<usize>,
    codecs: Vec<String>,
    levels: Vec<(String, RangeInclusive<i32>)>,
    out_dir: PathBuf,
    no_csv: bool,
    parallel: bool,
}

fn run_benchmark(args: RunArgs) -> anyhow::Result<()> {
    let payload = match (&args.input, args.synthetic_bytes) {
        (_, Some(len)) => synthetic_payload(len),
        (Some(path), None) => read_payload(path)?,
        (None, None) => anyhow::bail!("either INPUT or --synthetic-bytes is required"),
    };
    tracing::info!(
        bytes = payload.len(),
        synthetic = args.synthetic_bytes.is_some(),
        "payload loaded"
    );

    let codecs = select_codecs(&args.codecs)?;

    let mut config = HarnessConfig::new()
        .with_output_dir(&args.out_dir)
        .with_csv(!args.no_csv)
        .with_parallel(args.parallel);
    for (name, levels) in resolve_level_overrides(&codecs, args.levels)? {
        config = config.with_levels(name, levels);
    }

    if config.write_csv {
        std::fs::create_dir_all(&config.output_dir)?;
    }

    let harness = Harness::new(codecs, config);
    let outcome = harness.run(&payload);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = harness.report(&outcome, &mut out)?;

    for path in &summary.artifacts {
        eprintln!("  wrote {}", path.display());
    }
    for path in &summary.removed_stale {
        eprintln!("  removed stale {}", path.display());
    }
    if summary.failed_sweeps > 0 {
        anyhow::bail!(
            "{} of {} codec sweeps failed",
            summary.failed_sweeps,
            outcome.runs.len()
        );
    }
    Ok(())
}

fn run_list_codecs() {
    let defaults: Vec<&str> = default_codecs().iter().map(|c| c.name()).collect();
    println!("  {:<12}  {:>8}  {:>6}  {}", "codec", "levels", "count", "default");
    println!("  {}", "-".repeat(40));
    for codec in all_codecs() {
        let levels = codec.levels();
        let count = levels.clone().count();
        println!(
            "  {:<12}  {:>8}  {:>6}  {}",
            codec.name(),
            format!("{}..={}", levels.start(), levels.end()),
            count,
            if defaults.contains(&codec.name()) { "yes" } else { "no" }
        );
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Run {
            input,
            synthetic_bytes,
            codecs,
            levels,
            out_dir,
            no_csv,
            parallel,
        } => run_benchmark(RunArgs {
            input,
            synthetic_bytes,
            codecs,
            levels,
            out_dir,
            no_csv,
            parallel,
        }),
        Commands::Codecs => {
            run_list_codecs();
            Ok(())
        }
    }
}
