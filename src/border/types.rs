//! Common types for the border module

use thiserror::Error;

/// Border detection error types
#[derive(Debug, Error)]
pub enum BorderError {
    #[error("Image has no content: every pixel matches the border color")]
    NoContent,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Padding {0} is too large: output dimensions would overflow")]
    PaddingTooLarge(u32),
}

pub type Result<T> = std::result::Result<T, BorderError>;

/// Per-side border thickness in pixels.
///
/// The four sides are measured independently and are allowed to disagree;
/// unequal widths are exactly what normalization corrects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BorderWidths {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl BorderWidths {
    /// Construct widths that are the same on every side
    pub fn uniform(width: u32) -> Self {
        Self {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    /// True when all four sides have the same thickness
    pub fn is_uniform(&self) -> bool {
        self.left == self.right && self.left == self.top && self.left == self.bottom
    }

    pub fn total_horizontal(&self) -> u32 {
        self.left + self.right
    }

    pub fn total_vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// Tight bounding box of non-border content, in pixel coordinates.
///
/// Half-open on the right and bottom: `x0 <= x < x1`, `y0 <= y < y1`.
/// A `ContentBox` is never empty; the scanner reports
/// [`BorderError::NoContent`] instead of constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ContentBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl ContentBox {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Whether the box spans the full image, i.e. no border was found
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x0 == 0 && self.y0 == 0 && self.x1 == width && self.y1 == height
    }
}
