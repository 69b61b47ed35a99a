//! Per-file processing pipeline.
//!
//! Wires the pure border core (classify → scan → normalize) to file I/O:
//! decode, evaluate, render, and write according to the configured write
//! policy. Each file is self-contained; a failure is recorded in the
//! outcome and never aborts the batch.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::border::{
    BorderClassifier, BorderError, BorderNormalizer, BorderOptions, BorderWidths,
    BoundaryScanner, ContentBox, MissingBorderPolicy,
};
use crate::report::{Action, ImageOutcome};

/// Pipeline error types
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Unsupported image format: {0}")]
    UnknownFormat(PathBuf),

    #[error(transparent)]
    Border(#[from] BorderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where (and whether) transformed images are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WritePolicy {
    /// Compute and report only; never write
    DryRun,
    /// Write results into a separate directory, flat, keeping file names
    ToDirectory(PathBuf),
    /// Atomically replace the input file
    InPlace,
}

/// Decision computed for one in-memory image, before any I/O
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Uniform border found; crop to content and re-pad
    Normalize {
        color: Rgb<u8>,
        content: ContentBox,
        widths: BorderWidths,
    },
    /// No uniform border; surround the whole image with the fallback fill
    FallbackPad { fill: Rgb<u8> },
    /// Border already at the target width on all sides
    Unchanged {
        color: Rgb<u8>,
        widths: BorderWidths,
    },
    /// Leave untouched
    Skip { reason: SkipReason },
}

/// Why an image was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Corner pixels disagree beyond tolerance
    NoUniformBorder,
    /// Every pixel matches the border color
    NoContent,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoUniformBorder => "corner pixels do not share one color",
            SkipReason::NoContent => "image is entirely border color",
        }
    }
}

/// Classify-scan-normalize pipeline for image files
pub struct ImagePipeline {
    options: BorderOptions,
    write_policy: WritePolicy,
}

impl ImagePipeline {
    pub fn new(options: BorderOptions, write_policy: WritePolicy) -> Self {
        Self {
            options,
            write_policy,
        }
    }

    pub fn options(&self) -> &BorderOptions {
        &self.options
    }

    /// Evaluate one in-memory image. Pure: no I/O, no shared state.
    pub fn evaluate(&self, image: &RgbImage) -> Evaluation {
        let Some(color) = BorderClassifier::classify(image, &self.options) else {
            return match self.options.missing_border {
                MissingBorderPolicy::Skip => Evaluation::Skip {
                    reason: SkipReason::NoUniformBorder,
                },
                MissingBorderPolicy::FallbackPad => Evaluation::FallbackPad {
                    fill: self.options.fill,
                },
            };
        };

        let content = match BoundaryScanner::scan(image, color, self.options.tolerance) {
            Ok(content) => content,
            Err(BorderError::NoContent) => {
                return Evaluation::Skip {
                    reason: SkipReason::NoContent,
                }
            }
            Err(BorderError::InvalidDimensions { .. }) => {
                // Zero-sized buffers never reach here via the decoder, but
                // treat them as contentless rather than panicking
                return Evaluation::Skip {
                    reason: SkipReason::NoContent,
                };
            }
            Err(BorderError::PaddingTooLarge(_)) => {
                unreachable!("BoundaryScanner::scan never reports padding overflow")
            }
        };

        let (width, height) = image.dimensions();
        let widths = BoundaryScanner::measure(&content, width, height);

        if widths == BorderWidths::uniform(self.options.padding) {
            Evaluation::Unchanged { color, widths }
        } else {
            Evaluation::Normalize {
                color,
                content,
                widths,
            }
        }
    }

    /// Render the transformed image for an evaluation, if it produces one
    pub fn render(
        &self,
        image: &RgbImage,
        evaluation: &Evaluation,
    ) -> crate::border::Result<Option<RgbImage>> {
        match evaluation {
            Evaluation::Normalize { color, content, .. } => {
                BorderNormalizer::normalize(image, content, self.options.padding, *color).map(Some)
            }
            Evaluation::FallbackPad { fill } => {
                BorderNormalizer::pad(image, self.options.padding, *fill).map(Some)
            }
            Evaluation::Unchanged { .. } | Evaluation::Skip { .. } => Ok(None),
        }
    }

    /// Process one file end to end, returning its outcome record.
    ///
    /// Errors are folded into the outcome so one bad file never aborts the
    /// batch.
    pub fn process_file(&self, path: &Path) -> ImageOutcome {
        match self.process_file_inner(path) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "processing failed");
                ImageOutcome::failed(path, e.to_string())
            }
        }
    }

    fn process_file_inner(&self, path: &Path) -> Result<ImageOutcome, PipelineError> {
        let image = image::open(path)
            .map_err(|source| PipelineError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        let original_size = image.dimensions();

        let evaluation = self.evaluate(&image);
        debug!(path = %path.display(), ?evaluation, "evaluated");

        let outcome = match &evaluation {
            Evaluation::Skip { reason } => {
                info!(path = %path.display(), "SKIP: {}", reason.as_str());
                ImageOutcome::skipped(path, original_size, reason.as_str())
            }
            Evaluation::Unchanged { color, widths } => {
                info!(
                    path = %path.display(),
                    "UNCHANGED: border already {}px on all sides",
                    widths.left
                );
                ImageOutcome {
                    path: path.to_path_buf(),
                    action: Action::Unchanged,
                    reason: None,
                    original_size: Some(original_size),
                    output_size: Some(original_size),
                    border_color: Some(color.0),
                    border_widths: Some(*widths),
                    output_path: None,
                    written: false,
                }
            }
            Evaluation::Normalize {
                color,
                content,
                widths,
            } => {
                let output =
                    BorderNormalizer::normalize(&image, content, self.options.padding, *color)?;
                info!(
                    path = %path.display(),
                    "NORMALIZED: {}x{} -> {}x{} (borders L:{} R:{} T:{} B:{})",
                    original_size.0,
                    original_size.1,
                    output.width(),
                    output.height(),
                    widths.left,
                    widths.right,
                    widths.top,
                    widths.bottom,
                );
                let (output_path, written) = self.write(path, &output)?;
                ImageOutcome {
                    path: path.to_path_buf(),
                    action: Action::Normalized,
                    reason: None,
                    original_size: Some(original_size),
                    output_size: Some(output.dimensions()),
                    border_color: Some(color.0),
                    border_widths: Some(*widths),
                    output_path,
                    written,
                }
            }
            Evaluation::FallbackPad { fill } => {
                let output = BorderNormalizer::pad(&image, self.options.padding, *fill)?;
                info!(
                    path = %path.display(),
                    "PADDED: no uniform border, added {}px frame",
                    self.options.padding
                );
                let (output_path, written) = self.write(path, &output)?;
                ImageOutcome {
                    path: path.to_path_buf(),
                    action: Action::Padded,
                    reason: None,
                    original_size: Some(original_size),
                    output_size: Some(output.dimensions()),
                    border_color: Some(fill.0),
                    border_widths: None,
                    output_path,
                    written,
                }
            }
        };

        Ok(outcome)
    }

    /// Write a transformed image per the write policy.
    ///
    /// Returns the output path (if any) and whether a write happened.
    fn write(
        &self,
        input: &Path,
        output: &RgbImage,
    ) -> Result<(Option<PathBuf>, bool), PipelineError> {
        match &self.write_policy {
            WritePolicy::DryRun => Ok((None, false)),
            WritePolicy::ToDirectory(dir) => {
                std::fs::create_dir_all(dir)?;
                let file_name = input
                    .file_name()
                    .ok_or_else(|| PipelineError::UnknownFormat(input.to_path_buf()))?;
                let out_path = dir.join(file_name);
                output
                    .save(&out_path)
                    .map_err(|source| PipelineError::Encode {
                        path: out_path.clone(),
                        source,
                    })?;
                Ok((Some(out_path), true))
            }
            WritePolicy::InPlace => {
                self.write_in_place(input, output)?;
                Ok((Some(input.to_path_buf()), true))
            }
        }
    }

    /// Replace `input` atomically: encode into a temp file in the same
    /// directory, then rename over the original. The file is either fully
    /// rewritten or untouched.
    fn write_in_place(&self, input: &Path, output: &RgbImage) -> Result<(), PipelineError> {
        let format = ImageFormat::from_path(input)
            .map_err(|_| PipelineError::UnknownFormat(input.to_path_buf()))?;
        let dir = input.parent().unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            output
                .write_to(&mut writer, format)
                .map_err(|source| PipelineError::Encode {
                    path: input.to_path_buf(),
                    source,
                })?;
        }
        tmp.persist(input).map_err(|e| PipelineError::Io(e.error))?;
        Ok(())
    }
}
