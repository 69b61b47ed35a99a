//! Boundary scanner: edge scans to the content bounding box
//!
//! Walks inward from each of the four image edges until a row or column
//! contains a pixel deviating from the border color beyond tolerance. The
//! four scans are independent, so the resulting per-side border widths may
//! disagree; that asymmetry is what the normalizer corrects.

use image::{Rgb, RgbImage};
use tracing::trace;

use super::pixels_match;
use super::types::{BorderError, BorderWidths, ContentBox, Result};

/// Edge-scanning content boundary detector
pub struct BoundaryScanner;

impl BoundaryScanner {
    /// Scan for the tight bounding box of non-border content.
    ///
    /// Each side's scan is capped at the image midpoint, so a border is
    /// never measured wider than half the corresponding dimension. An image
    /// whose every pixel matches the border color has no content box and
    /// yields [`BorderError::NoContent`].
    pub fn scan(image: &RgbImage, border: Rgb<u8>, tolerance: u8) -> Result<ContentBox> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(BorderError::InvalidDimensions { width, height });
        }

        let first_col = (0..width)
            .find(|&x| !Self::column_matches(image, x, border, tolerance))
            .ok_or(BorderError::NoContent)?;
        let last_col = (0..width)
            .rev()
            .find(|&x| !Self::column_matches(image, x, border, tolerance))
            .ok_or(BorderError::NoContent)?;
        let first_row = (0..height)
            .find(|&y| !Self::row_matches(image, y, border, tolerance))
            .ok_or(BorderError::NoContent)?;
        let last_row = (0..height)
            .rev()
            .find(|&y| !Self::row_matches(image, y, border, tolerance))
            .ok_or(BorderError::NoContent)?;

        // A border may not consume more than half a dimension
        let content = ContentBox {
            x0: first_col.min(width / 2),
            y0: first_row.min(height / 2),
            x1: (last_col + 1).max(width - width / 2),
            y1: (last_row + 1).max(height - height / 2),
        };

        trace!(?content, "content box located");
        Ok(content)
    }

    /// Derive per-side border widths from a content box
    pub fn measure(content: &ContentBox, width: u32, height: u32) -> BorderWidths {
        BorderWidths {
            left: content.x0,
            right: width - content.x1,
            top: content.y0,
            bottom: height - content.y1,
        }
    }

    fn column_matches(image: &RgbImage, x: u32, border: Rgb<u8>, tolerance: u8) -> bool {
        (0..image.height()).all(|y| pixels_match(*image.get_pixel(x, y), border, tolerance))
    }

    fn row_matches(image: &RgbImage, y: u32, border: Rgb<u8>, tolerance: u8) -> bool {
        (0..image.width()).all(|x| pixels_match(*image.get_pixel(x, y), border, tolerance))
    }
}
