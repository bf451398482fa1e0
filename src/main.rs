//! CLI driver: read a source file, obfuscate struct identifiers, print or
//! write the rewritten source.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use structveil::{obfuscate_source, ObfuscateOptions};

#[derive(Parser, Debug)]
#[command(
    name = "structveil",
    version,
    about = "Renames struct types and fields to opaque identifiers"
)]
struct Cli {
    /// Source file to obfuscate
    input: PathBuf,

    /// Write the rewritten source here instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "in_place")]
    out: Option<PathBuf>,

    /// Rewrite the input file in place
    #[arg(long)]
    in_place: bool,

    /// Generated identifier length
    #[arg(long, default_value_t = 5)]
    length: usize,

    /// Seed the name generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Write the original -> opaque rename map as JSON
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    debug!(file = %cli.input.display(), "original source:\n{source}");

    let mut options = ObfuscateOptions::new().name_length(cli.length);
    if let Some(seed) = cli.seed {
        options = options.seed(seed);
    }

    let (rewritten, report) = obfuscate_source(&source, &options)
        .with_context(|| format!("cannot obfuscate {}", cli.input.display()))?;
    debug!("rewritten source:\n{rewritten}");

    if let Some(path) = &cli.report {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }

    if cli.in_place {
        fs::write(&cli.input, &rewritten)
            .with_context(|| format!("failed to rewrite {}", cli.input.display()))?;
    } else if let Some(path) = &cli.out {
        fs::write(path, &rewritten)
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        print!("{rewritten}");
    }
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("structveil={level}")));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
