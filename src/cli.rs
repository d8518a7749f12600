//! Command-line surface of `site-relink`.
//!
//! The binary only parses arguments and installs logging; everything it prints goes through
//! [`execute`] so the output contract can be exercised against in-memory writers.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::RelinkConfig;
use crate::error::RelinkError;
use crate::mapping::FingerprintMap;
use crate::models::RelinkSummary;
use crate::relinker::{RelinkOptions, SiteRelinker};

/// Rewrite asset references in a built site to their fingerprinted filenames.
#[derive(Debug, Parser)]
#[command(name = "site-relink", version, about)]
pub struct Cli {
    /// Built site directory (e.g. `dist`).
    #[arg(long, alias = "root", value_name = "DIR")]
    pub dist: PathBuf,

    /// Mapping file of `<original> <hashed>` lines. Defaults to the configured path inside the site.
    #[arg(long, value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Explicit configuration file. Defaults to `relink.config.json` in the site root.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Run the command, writing the summary to `out` and fatal errors to `err`.
///
/// Returns the process exit status: `0` on completion, `1` when the site root or the
/// mapping file is missing or unreadable.
pub fn execute(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match run(cli, out) {
        Ok(_) => 0,
        Err(error) => {
            let _ = writeln!(err, "[site-relink] {error:#}");
            1
        }
    }
}

/// Relink the site described by `cli` and print its summary to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<RelinkSummary> {
    if !cli.dist.is_dir() {
        return Err(RelinkError::RootNotFound {
            path: cli.dist.clone(),
        }
        .into());
    }

    let config = match &cli.config {
        Some(path) => RelinkConfig::load(path)?,
        None => RelinkConfig::discover(&cli.dist),
    };
    let mapping_path = cli
        .mapping
        .clone()
        .unwrap_or_else(|| config.mapping_path(&cli.dist));
    let mapping = FingerprintMap::load(&mapping_path)?;

    let relinker = SiteRelinker::new(&cli.dist, mapping)?;
    tracing::info!(
        root = %relinker.root().display(),
        entries = relinker.mapping().len(),
        "relinking site"
    );
    let summary = relinker.run(
        &config.selection(),
        RelinkOptions {
            dry_run: cli.dry_run,
        },
    );

    if cli.json {
        let rendered =
            serde_json::to_string(&summary).context("failed to serialise relink summary")?;
        writeln!(out, "{rendered}").context("failed to write summary")?;
    } else {
        writeln!(
            out,
            "processed={} changed={}",
            summary.processed, summary.changed
        )
        .context("failed to write summary")?;
    }
    Ok(summary)
}
