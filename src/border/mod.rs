//! Border detection & normalization module
//!
//! Detects solid-color borders on raster images and normalizes them to an
//! exact uniform pixel width on all four sides.
//!
//! # Pipeline
//!
//! 1. Classify: sample the corner pixels and decide whether the image has a
//!    uniform border color ([`BorderClassifier`])
//! 2. Scan: walk inward from each edge to find the tight content bounding
//!    box ([`BoundaryScanner`])
//! 3. Normalize: crop to the content box and re-pad with exactly the
//!    requested border width ([`BorderNormalizer`])
//!
//! All three steps are pure functions over an in-memory `RgbImage`; file
//! I/O, traversal and reporting live in the calling layer.
//!
//! # Example
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use shrink_borders::{BorderClassifier, BorderNormalizer, BorderOptions, BoundaryScanner};
//!
//! let mut img = RgbImage::from_pixel(100, 80, Rgb([255, 255, 255]));
//! for y in 20..60 {
//!     for x in 30..70 {
//!         img.put_pixel(x, y, Rgb([10, 10, 10]));
//!     }
//! }
//!
//! let options = BorderOptions::builder().padding(5).build();
//! let color = BorderClassifier::classify(&img, &options).unwrap();
//! let content = BoundaryScanner::scan(&img, color, options.tolerance).unwrap();
//! let normalized = BorderNormalizer::normalize(&img, &content, options.padding, color).unwrap();
//!
//! assert_eq!(normalized.dimensions(), (40 + 10, 40 + 10));
//! ```

// Submodules
mod classify;
mod normalize;
mod scan;
mod types;

// Re-export public API
pub use classify::BorderClassifier;
pub use normalize::BorderNormalizer;
pub use scan::BoundaryScanner;
pub use types::{BorderError, BorderWidths, ContentBox, Result};

use image::Rgb;

// ============================================================
// Constants
// ============================================================

/// Default per-channel tolerance: exact match
const DEFAULT_TOLERANCE: u8 = 0;

/// Default target border width in pixels
const DEFAULT_PADDING: u32 = 50;

/// Largest accepted target border width. Keeps output dimensions well away
/// from `u32` overflow for any decodable image.
pub const MAX_PADDING: u32 = 65_535;

/// Fallback fill color when padding an image with no classified border
const DEFAULT_FILL: Rgb<u8> = Rgb([255, 255, 255]);

// ============================================================
// Options
// ============================================================

/// Border detection and normalization options
#[derive(Debug, Clone)]
pub struct BorderOptions {
    /// Per-channel absolute difference allowed when matching pixels (0-255)
    pub tolerance: u8,
    /// Target uniform border width in pixels
    pub padding: u32,
    /// How corner pixels establish the border color
    pub corner_policy: CornerPolicy,
    /// What to do when no uniform border color is found
    pub missing_border: MissingBorderPolicy,
    /// Fill color for fallback padding
    pub fill: Rgb<u8>,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            padding: DEFAULT_PADDING,
            corner_policy: CornerPolicy::AllFourCorners,
            missing_border: MissingBorderPolicy::Skip,
            fill: DEFAULT_FILL,
        }
    }
}

impl BorderOptions {
    /// Create a new options builder
    pub fn builder() -> BorderOptionsBuilder {
        BorderOptionsBuilder::default()
    }

    /// Options requiring exact color matches (tolerance 0)
    pub fn exact() -> Self {
        Self::default()
    }

    /// Options tolerating small per-channel differences, for lossy sources
    /// such as JPEG where the border color dithers slightly
    pub fn lenient(tolerance: u8) -> Self {
        Self {
            tolerance,
            ..Default::default()
        }
    }
}

/// Builder for BorderOptions
#[derive(Debug, Default)]
pub struct BorderOptionsBuilder {
    options: BorderOptions,
}

impl BorderOptionsBuilder {
    /// Set per-channel match tolerance (0-255)
    #[must_use]
    pub fn tolerance(mut self, tolerance: u8) -> Self {
        self.options.tolerance = tolerance;
        self
    }

    /// Set target uniform border width in pixels
    #[must_use]
    pub fn padding(mut self, padding: u32) -> Self {
        self.options.padding = padding;
        self
    }

    /// Set the corner sampling policy
    #[must_use]
    pub fn corner_policy(mut self, policy: CornerPolicy) -> Self {
        self.options.corner_policy = policy;
        self
    }

    /// Set the behavior when corners disagree
    #[must_use]
    pub fn missing_border(mut self, policy: MissingBorderPolicy) -> Self {
        self.options.missing_border = policy;
        self
    }

    /// Set the fallback fill color
    #[must_use]
    pub fn fill(mut self, fill: Rgb<u8>) -> Self {
        self.options.fill = fill;
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> BorderOptions {
        self.options
    }
}

/// How the border color is established from corner samples
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CornerPolicy {
    /// Require all four corners to agree within tolerance
    #[default]
    AllFourCorners,
    /// Trust the top-left pixel unconditionally
    TopLeftOnly,
}

/// Behavior when no uniform border color is classified
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MissingBorderPolicy {
    /// Leave the image untouched and report a skip
    #[default]
    Skip,
    /// Surround the whole image with the fallback fill color
    FallbackPad,
}

/// Per-channel pixel comparison within tolerance.
///
/// Tolerance 0 degenerates to equality. Monotone in tolerance: any pair
/// matching at tolerance `t` also matches at every `t' >= t`.
pub(crate) fn pixels_match(a: Rgb<u8>, b: Rgb<u8>, tolerance: u8) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .all(|(&ca, &cb)| ca.abs_diff(cb) <= tolerance)
}
