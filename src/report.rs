//! Structured per-image outcomes and batch reporting.
//!
//! The pipeline returns one [`ImageOutcome`] per file instead of writing to
//! shared counters; the batch driver accumulates them into a
//! [`BatchReport`] for the console summary and the optional JSON dump.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::border::BorderWidths;

/// What happened to a single image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Border detected, cropped and re-padded to the target width
    Normalized,
    /// No uniform border; whole image surrounded with the fallback fill
    Padded,
    /// Border already at the target width; nothing to do
    Unchanged,
    /// Left untouched (mismatched corners or no content)
    Skipped,
    /// Decode or write failure; the batch continues
    Failed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Normalized => "NORMALIZED",
            Action::Padded => "PADDED",
            Action::Unchanged => "UNCHANGED",
            Action::Skipped => "SKIP",
            Action::Failed => "ERROR",
        };
        f.write_str(name)
    }
}

/// Outcome record for one processed file
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutcome {
    /// Input file
    pub path: PathBuf,
    /// Semantic decision for this image
    pub action: Action,
    /// Human-readable reason for skips and failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Input dimensions, when the file decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_size: Option<(u32, u32)>,
    /// Output dimensions, when a transform was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<(u32, u32)>,
    /// Classified border color (RGB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<[u8; 3]>,
    /// Measured input border widths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_widths: Option<BorderWidths>,
    /// Where the result was written; `None` in dry-run mode or for skips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    /// False when the write was suppressed (dry run) or not needed
    pub written: bool,
}

impl ImageOutcome {
    /// Record a skip with a reason
    pub fn skipped(path: &Path, size: (u32, u32), reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            action: Action::Skipped,
            reason: Some(reason.into()),
            original_size: Some(size),
            output_size: None,
            border_color: None,
            border_widths: None,
            output_path: None,
            written: false,
        }
    }

    /// Record a per-file failure
    pub fn failed(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            action: Action::Failed,
            reason: Some(reason.into()),
            original_size: None,
            output_size: None,
            border_color: None,
            border_widths: None,
            output_path: None,
            written: false,
        }
    }
}

/// Accumulated results for one batch run
#[derive(Debug, Serialize)]
pub struct BatchReport {
    /// When the batch finished
    pub completed_at: DateTime<Utc>,
    /// Wall-clock duration of the batch
    pub elapsed_seconds: f64,
    /// Whether writes were suppressed
    pub dry_run: bool,
    /// Per-file outcomes, in input order
    pub outcomes: Vec<ImageOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<ImageOutcome>, dry_run: bool, elapsed_seconds: f64) -> Self {
        Self {
            completed_at: Utc::now(),
            elapsed_seconds,
            dry_run,
            outcomes,
        }
    }

    pub fn count(&self, action: Action) -> usize {
        self.outcomes.iter().filter(|o| o.action == action).count()
    }

    /// Number of images that were (or would be) rewritten
    pub fn changed(&self) -> usize {
        self.count(Action::Normalized) + self.count(Action::Padded)
    }

    /// Write the report as pretty JSON
    pub fn save_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Print the final console summary
    pub fn print_summary(&self) {
        println!();
        println!("{}", "=".repeat(80));
        println!("Processing Summary{}", if self.dry_run { " (dry run)" } else { "" });
        println!("{}", "=".repeat(80));
        println!("  Total files:  {}", self.outcomes.len());
        println!("  Normalized:   {}", self.count(Action::Normalized));
        println!("  Padded:       {}", self.count(Action::Padded));
        println!("  Unchanged:    {}", self.count(Action::Unchanged));
        println!("  Skipped:      {}", self.count(Action::Skipped));
        println!("  Errors:       {}", self.count(Action::Failed));
        println!("  Total time:   {:.2}s", self.elapsed_seconds);
        println!("{}", "=".repeat(80));
    }
}
