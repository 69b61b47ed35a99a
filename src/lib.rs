//! shrink-borders - batch image border normalizer
//!
//! Scans a directory tree for raster images, detects solid-color borders by
//! corner sampling, and normalizes detected borders to an exact uniform
//! pixel width. The core lives in [`border`]; [`pipeline`] wires it to file
//! I/O and [`report`] accumulates structured per-image outcomes.

pub mod border;
pub mod cli;
pub mod config;
pub mod pipeline;
pub mod report;

pub use border::{
    BorderClassifier, BorderError, BorderNormalizer, BorderOptions, BorderOptionsBuilder,
    BorderWidths, BoundaryScanner, ContentBox, CornerPolicy, MissingBorderPolicy,
};
pub use cli::{Cli, Commands, ProcessArgs};
pub use config::{CliOverrides, Config, ConfigError, ResolvedConfig};
pub use pipeline::{Evaluation, ImagePipeline, PipelineError, SkipReason, WritePolicy};
pub use report::{Action, BatchReport, ImageOutcome};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
}
