//! shrink-borders - batch image border normalizer
//!
//! CLI entry point

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn, Level};

use shrink_borders::{
    exit_codes, BatchReport, Cli, Commands, Config, ImagePipeline, ProcessArgs,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process(args) => run_process(&args),
        Commands::Info => run_info(),
    };

    std::process::exit(match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

// ============ Process Command ============

fn run_process(args: &ProcessArgs) -> anyhow::Result<()> {
    let start_time = Instant::now();

    // Validate input path
    if !args.directory.exists() {
        eprintln!(
            "Error: Directory does not exist: {}",
            args.directory.display()
        );
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }
    if !args.directory.is_dir() {
        eprintln!("Error: Not a directory: {}", args.directory.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    init_logging(args)?;

    // Load config file if specified, otherwise use default locations
    let file_config = match &args.config {
        Some(config_path) => match Config::load_from_path(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}", e);
                Config::default()
            }
        },
        None => Config::load().unwrap_or_default(),
    };

    // Merge config file with CLI arguments (CLI takes precedence)
    let resolved = file_config.merge_with_cli(&args.overrides())?;

    let image_files = collect_image_files(&args.directory)
        .with_context(|| format!("scanning {}", args.directory.display()))?;

    info!("Directory: {}", args.directory.display());
    info!(
        "Padding: {}px, tolerance: {}",
        resolved.options.padding, resolved.options.tolerance
    );
    info!("Mode: {}", if args.dry_run() { "DRY-RUN" } else { "LIVE" });
    info!("Found {} image(s)", image_files.len());

    if image_files.is_empty() {
        println!("No image files found in {}", args.directory.display());
        return Ok(());
    }

    let write_policy = args.write_policy(resolved.output_dir.clone());
    let pipeline = ImagePipeline::new(resolved.options.clone(), write_policy);

    // Progress bar for the batch; logging replaces it in verbose mode
    let bar = if args.quiet || args.verbose > 0 {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(image_files.len() as u64);
        bar.set_style(ProgressStyle::default_bar());
        bar
    };

    // Images are independent; spread the batch over a worker pool
    let process_all = || {
        image_files
            .par_iter()
            .map(|path| {
                let outcome = pipeline.process_file(path);
                bar.inc(1);
                outcome
            })
            .collect::<Vec<_>>()
    };

    let outcomes = match resolved.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("building worker pool")?
            .install(process_all),
        None => process_all(),
    };
    bar.finish_and_clear();

    let report = BatchReport::new(
        outcomes,
        args.dry_run(),
        start_time.elapsed().as_secs_f64(),
    );

    if let Some(report_path) = &args.report {
        report
            .save_json(report_path)
            .with_context(|| format!("writing report to {}", report_path.display()))?;
    }

    if !args.quiet {
        report.print_summary();
    }

    let error_count = report.count(shrink_borders::Action::Failed);
    if error_count > 0 {
        anyhow::bail!("{} file(s) failed to process", error_count);
    }

    Ok(())
}

/// Set up tracing output: level from -q/-v, optionally teed to a log file
fn init_logging(args: &ProcessArgs) -> anyhow::Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    let level = if args.quiet {
        Level::WARN
    } else {
        match args.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(Arc::new(file)))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

// ============ Helper Functions ============

/// Recursively collect image files under a directory, in sorted order
fn collect_image_files(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();
    collect_into(root, &mut image_files)?;
    image_files.sort();
    Ok(image_files)
}

fn collect_into(dir: &Path, image_files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_into(&path, image_files)?;
        } else if is_image_file(&path) {
            image_files.push(path);
        }
    }
    Ok(())
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "png"))
}

// ============ Info Command ============

fn run_info() -> anyhow::Result<()> {
    println!("shrink-borders v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("System Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);
    println!("  CPUs: {}", num_cpus::get());

    println!();
    println!("Defaults:");
    let defaults = shrink_borders::BorderOptions::default();
    println!("  Padding: {}px", defaults.padding);
    println!("  Tolerance: {}", defaults.tolerance);
    println!("  Corner policy: all four corners must agree");
    println!("  Missing border: skip");

    println!();
    println!("Config File Locations:");
    println!("  Local: ./shrink-borders.toml");
    if let Some(config_dir) = dirs::config_dir() {
        println!(
            "  User:  {}",
            config_dir.join("shrink-borders/config.toml").display()
        );
    }

    Ok(())
}
