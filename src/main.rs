//! Wptscore CLI
//!
//! A thin command-line wrapper around the wptscore library: loads wptreport
//! JSON files, scores runs, and reassembles sharded report chunks. All the
//! scoring logic lives in the library; this binary only does file IO and
//! output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use wptscore::{focus, report, score, RawReport};

#[derive(Parser)]
#[command(name = "wptscore")]
#[command(author, version, about = "Score and compare Web-Platform-Tests runs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a wptreport, optionally against a reference run
    Score {
        /// The wptreport JSON file to score
        run: PathBuf,

        /// Reference run defining the test universe and focus areas
        /// (defaults to the scored run itself)
        #[arg(long, value_name = "FILE")]
        against: Option<PathBuf>,
    },

    /// Reassemble sharded wptreport chunks into a single report
    Merge {
        /// Chunk files, in order
        #[arg(required = true)]
        chunks: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Score { run, against } => run_score(&run, against.as_deref()),
        Commands::Merge { chunks } => run_merge(&chunks),
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_report(path: &Path) -> anyhow::Result<RawReport> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let report = RawReport::from_slice(&bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(report)
}

fn run_score(run_path: &Path, against_path: Option<&Path>) -> anyhow::Result<()> {
    let run = report::normalize(&load_report(run_path)?);
    let against = match against_path {
        Some(path) => report::normalize(&load_report(path)?),
        None => run.clone(),
    };

    // The reference run defines the test universe, so the focus map comes
    // from it as well.
    let focus_map = focus::focus_areas_map(&against);
    let scores = score::score_runs(&run, &against, &focus_map);

    println!("{}", serde_json::to_string_pretty(&scores)?);
    Ok(())
}

fn run_merge(chunk_paths: &[PathBuf]) -> anyhow::Result<()> {
    let chunks = chunk_paths
        .iter()
        .map(|p| load_report(p))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let merged = report::merge_chunked_reports(chunks)?;
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
