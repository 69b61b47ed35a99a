//! Normalizer: crop to content and re-pad with a uniform border
//!
//! Takes the content box found by the scanner, discards every original
//! border pixel, and surrounds the content with exactly the requested
//! number of fill pixels on all four sides. The output border is uniform
//! no matter how unequal the input borders were.

use image::{Rgb, RgbImage};

use super::types::{BorderError, ContentBox, Result};

/// Crop-and-repad border normalizer
pub struct BorderNormalizer;

impl BorderNormalizer {
    /// Crop `image` to `content`, then surround it with `padding` pixels of
    /// `fill` on every side.
    ///
    /// Output dimensions are `content.width() + 2 * padding` by
    /// `content.height() + 2 * padding`; with a non-empty content box the
    /// result is always at least 1x1. A `padding` large enough to push a
    /// dimension past `u32::MAX` yields [`BorderError::PaddingTooLarge`]
    /// instead of wrapping.
    pub fn normalize(
        image: &RgbImage,
        content: &ContentBox,
        padding: u32,
        fill: Rgb<u8>,
    ) -> Result<RgbImage> {
        let out_width = Self::padded_dimension(content.width(), padding)?;
        let out_height = Self::padded_dimension(content.height(), padding)?;

        let mut out = RgbImage::from_pixel(out_width, out_height, fill);
        for y in content.y0..content.y1 {
            for x in content.x0..content.x1 {
                out.put_pixel(
                    x - content.x0 + padding,
                    y - content.y0 + padding,
                    *image.get_pixel(x, y),
                );
            }
        }
        Ok(out)
    }

    /// Surround the whole image with `padding` pixels of `fill` without
    /// cropping anything. Used by the fallback policy when no border color
    /// was classified.
    pub fn pad(image: &RgbImage, padding: u32, fill: Rgb<u8>) -> Result<RgbImage> {
        let (width, height) = image.dimensions();
        let content = ContentBox {
            x0: 0,
            y0: 0,
            x1: width,
            y1: height,
        };
        Self::normalize(image, &content, padding, fill)
    }

    fn padded_dimension(content: u32, padding: u32) -> Result<u32> {
        padding
            .checked_mul(2)
            .and_then(|total| content.checked_add(total))
            .ok_or(BorderError::PaddingTooLarge(padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{BorderWidths, BoundaryScanner};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const INK: Rgb<u8> = Rgb([30, 30, 30]);

    fn bordered_image(width: u32, height: u32, content: ContentBox) -> RgbImage {
        let mut img = RgbImage::from_pixel(width, height, WHITE);
        for y in content.y0..content.y1 {
            for x in content.x0..content.x1 {
                img.put_pixel(x, y, INK);
            }
        }
        img
    }

    #[test]
    fn test_normalize_symmetric_borders() {
        // 1920x1080, white border L=200 R=200 T=100 B=100, padding 5
        let content = ContentBox {
            x0: 200,
            y0: 100,
            x1: 1720,
            y1: 980,
        };
        let img = bordered_image(1920, 1080, content);

        let out = BorderNormalizer::normalize(&img, &content, 5, WHITE).unwrap();
        assert_eq!(out.dimensions(), (1530, 890));

        // Border pixels are fill, content corner pixels are content
        assert_eq!(*out.get_pixel(0, 0), WHITE);
        assert_eq!(*out.get_pixel(4, 4), WHITE);
        assert_eq!(*out.get_pixel(5, 5), INK);
        assert_eq!(*out.get_pixel(1524, 884), INK);
        assert_eq!(*out.get_pixel(1529, 889), WHITE);
    }

    #[test]
    fn test_output_border_is_exactly_padding() {
        let content = ContentBox {
            x0: 15,
            y0: 0,
            x1: 1910,
            y1: 1067,
        };
        let img = bordered_image(1920, 1080, content);

        let padding = 5;
        let out = BorderNormalizer::normalize(&img, &content, padding, WHITE).unwrap();
        assert_eq!(out.dimensions(), (1895 + 10, 1067 + 10));

        // Re-scanning the output measures a uniform border of exactly
        // `padding` on all four sides
        let rescanned = BoundaryScanner::scan(&out, WHITE, 0).unwrap();
        let widths = BoundaryScanner::measure(&rescanned, out.width(), out.height());
        assert_eq!(widths, BorderWidths::uniform(padding));
    }

    #[test]
    fn test_normalize_idempotent() {
        let content = ContentBox {
            x0: 30,
            y0: 12,
            x1: 170,
            y1: 88,
        };
        let img = bordered_image(200, 100, content);
        let padding = 7;

        let once = BorderNormalizer::normalize(&img, &content, padding, WHITE).unwrap();

        let content_once = BoundaryScanner::scan(&once, WHITE, 0).unwrap();
        let twice = BorderNormalizer::normalize(&once, &content_once, padding, WHITE).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_padding_is_tight_crop() {
        let content = ContentBox {
            x0: 3,
            y0: 4,
            x1: 13,
            y1: 9,
        };
        let img = bordered_image(16, 12, content);

        let out = BorderNormalizer::normalize(&img, &content, 0, WHITE).unwrap();
        assert_eq!(out.dimensions(), (10, 5));
        assert!(out.pixels().all(|&p| p == INK));
    }

    #[test]
    fn test_content_preserved_verbatim() {
        // Non-uniform content survives the move untouched
        let mut img = RgbImage::from_pixel(30, 30, WHITE);
        img.put_pixel(10, 10, Rgb([1, 2, 3]));
        img.put_pixel(19, 14, Rgb([4, 5, 6]));

        let content = ContentBox {
            x0: 10,
            y0: 10,
            x1: 20,
            y1: 15,
        };
        let out = BorderNormalizer::normalize(&img, &content, 2, WHITE).unwrap();

        assert_eq!(*out.get_pixel(2, 2), Rgb([1, 2, 3]));
        assert_eq!(*out.get_pixel(11, 6), Rgb([4, 5, 6]));
    }

    #[test]
    fn test_pad_whole_image() {
        let img = RgbImage::from_pixel(10, 8, INK);
        let out = BorderNormalizer::pad(&img, 3, WHITE).unwrap();

        assert_eq!(out.dimensions(), (16, 14));
        assert_eq!(*out.get_pixel(0, 0), WHITE);
        assert_eq!(*out.get_pixel(3, 3), INK);
        assert_eq!(*out.get_pixel(12, 10), INK);
        assert_eq!(*out.get_pixel(15, 13), WHITE);
    }

    #[test]
    fn test_pad_zero_is_identity() {
        let img = RgbImage::from_pixel(5, 5, INK);
        let out = BorderNormalizer::pad(&img, 0, WHITE).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_overflowing_padding_rejected() {
        let content = ContentBox {
            x0: 1,
            y0: 1,
            x1: 9,
            y1: 9,
        };
        let img = bordered_image(10, 10, content);

        // 2 * padding alone overflows u32
        let result = BorderNormalizer::normalize(&img, &content, 2_200_000_000, WHITE);
        assert!(matches!(result, Err(BorderError::PaddingTooLarge(_))));

        // 2 * padding fits but the sum with the content width does not
        let result = BorderNormalizer::normalize(&img, &content, u32::MAX / 2, WHITE);
        assert!(matches!(result, Err(BorderError::PaddingTooLarge(_))));

        let result = BorderNormalizer::pad(&img, 2_200_000_000, WHITE);
        assert!(matches!(result, Err(BorderError::PaddingTooLarge(_))));
    }
}
