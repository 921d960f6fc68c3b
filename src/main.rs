use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mod_files::{ManifestBuilder, ManifestConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Scan a directory and emit mod_files.txt of all files, excluding specified ones.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root directory to scan
    #[arg(short, long, default_value = ".")]
    directory: PathBuf,

    /// Optional extra exclude list (one relative path per line)
    #[arg(short, long)]
    exclude_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;

    let output_path = run(Args::parse())?;
    println!("Wrote add-list to {}", output_path.display());
    Ok(())
}

fn run(args: Args) -> Result<PathBuf> {
    let mut config = ManifestConfig::new(args.directory);
    if let Some(exclude_file) = args.exclude_file {
        config = config.with_exclude_file(exclude_file);
    }
    let config = config
        .resolve()
        .context("could not resolve scan root")?;

    let summary = ManifestBuilder::new(config)
        .build()
        .context("manifest generation failed")?;

    Ok(summary.output_path)
}
