//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::border::{CornerPolicy, MissingBorderPolicy};
use crate::config::CliOverrides;
use crate::pipeline::WritePolicy;

/// Batch image border normalizer
#[derive(Debug, Parser)]
#[command(name = "shrink-borders", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree and normalize uniform image borders
    Process(ProcessArgs),
    /// Show version, platform and config file locations
    Info,
}

#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Directory to process (scanned recursively for .jpg/.jpeg/.png)
    pub directory: PathBuf,

    /// Border pixels to keep on every side (default: 50)
    #[arg(short, long)]
    pub padding: Option<u32>,

    /// Per-channel color match tolerance, 0 = exact (default: 0)
    #[arg(short, long)]
    pub tolerance: Option<u8>,

    /// Output directory for processed images (default: processed-images)
    #[arg(short, long, conflicts_with = "in_place")]
    pub output_dir: Option<PathBuf>,

    /// Rewrite files where they are instead of using an output directory
    #[arg(long)]
    pub in_place: bool,

    /// Actually write files (default is dry-run mode)
    #[arg(long)]
    pub no_dry_run: bool,

    /// How corner pixels establish the border color
    #[arg(long, value_enum)]
    pub corner_policy: Option<CornerPolicy>,

    /// What to do when no uniform border color is found
    #[arg(long, value_enum)]
    pub missing_border: Option<MissingBorderPolicy>,

    /// Fallback fill color as RRGGBB hex (default: ffffff)
    #[arg(long)]
    pub fill_color: Option<String>,

    /// Worker threads (default: one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Also write log output to this file
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Write a JSON report of all per-image outcomes to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Explicit config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ProcessArgs {
    /// Collect the explicitly-passed values for config merging
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            padding: self.padding,
            tolerance: self.tolerance,
            corner_policy: self.corner_policy,
            missing_border: self.missing_border,
            fill_color: self.fill_color.clone(),
            output_dir: self.output_dir.clone(),
            threads: self.threads,
        }
    }

    /// Dry run unless --no-dry-run was given
    pub fn dry_run(&self) -> bool {
        !self.no_dry_run
    }

    /// Resolve the write policy from the mode flags
    pub fn write_policy(&self, output_dir: PathBuf) -> WritePolicy {
        if self.dry_run() {
            WritePolicy::DryRun
        } else if self.in_place {
            WritePolicy::InPlace
        } else {
            WritePolicy::ToDirectory(output_dir)
        }
    }
}
