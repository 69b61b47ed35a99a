//! Border classifier: corner sampling
//!
//! Decides whether an image has a solid-color border at all by comparing
//! its four corner pixels. The border color is only trusted when every
//! corner agrees within tolerance (or unconditionally under
//! [`CornerPolicy::TopLeftOnly`]).

use image::{Rgb, RgbImage};

use super::{pixels_match, BorderOptions, CornerPolicy};

/// Corner-based border color classifier
pub struct BorderClassifier;

impl BorderClassifier {
    /// Classify the border color of an image.
    ///
    /// Returns the top-left corner color when the configured policy accepts
    /// it as the border color, `None` otherwise. Pure function of the four
    /// corner samples; on a 1x1 or 1xN image coincident corners trivially
    /// match themselves.
    pub fn classify(image: &RgbImage, options: &BorderOptions) -> Option<Rgb<u8>> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let top_left = *image.get_pixel(0, 0);

        match options.corner_policy {
            CornerPolicy::TopLeftOnly => Some(top_left),
            CornerPolicy::AllFourCorners => {
                let corners = [
                    *image.get_pixel(width - 1, 0),
                    *image.get_pixel(0, height - 1),
                    *image.get_pixel(width - 1, height - 1),
                ];

                if corners
                    .iter()
                    .all(|&c| pixels_match(top_left, c, options.tolerance))
                {
                    Some(top_left)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with_corners(
        tl: Rgb<u8>,
        tr: Rgb<u8>,
        bl: Rgb<u8>,
        br: Rgb<u8>,
    ) -> RgbImage {
        let mut img = RgbImage::from_pixel(20, 10, Rgb([128, 128, 128]));
        img.put_pixel(0, 0, tl);
        img.put_pixel(19, 0, tr);
        img.put_pixel(0, 9, bl);
        img.put_pixel(19, 9, br);
        img
    }

    #[test]
    fn test_uniform_corners_match() {
        let white = Rgb([255, 255, 255]);
        let img = image_with_corners(white, white, white, white);

        let color = BorderClassifier::classify(&img, &BorderOptions::default());
        assert_eq!(color, Some(white));
    }

    #[test]
    fn test_one_corner_differs() {
        let white = Rgb([255, 255, 255]);
        let blue = Rgb([80, 120, 230]);
        let img = image_with_corners(white, white, white, blue);

        let color = BorderClassifier::classify(&img, &BorderOptions::default());
        assert_eq!(color, None);
    }

    #[test]
    fn test_corners_within_tolerance() {
        let img = image_with_corners(
            Rgb([250, 250, 250]),
            Rgb([252, 249, 251]),
            Rgb([248, 250, 250]),
            Rgb([251, 251, 249]),
        );

        assert_eq!(
            BorderClassifier::classify(&img, &BorderOptions::default()),
            None
        );

        let lenient = BorderOptions::lenient(3);
        assert_eq!(
            BorderClassifier::classify(&img, &lenient),
            Some(Rgb([250, 250, 250]))
        );
    }

    #[test]
    fn test_top_left_only_ignores_other_corners() {
        let white = Rgb([255, 255, 255]);
        let blue = Rgb([80, 120, 230]);
        let img = image_with_corners(white, blue, blue, blue);

        let opts = BorderOptions::builder()
            .corner_policy(CornerPolicy::TopLeftOnly)
            .build();

        assert_eq!(BorderClassifier::classify(&img, &opts), Some(white));
    }

    #[test]
    fn test_returns_top_left_color() {
        // Tolerance accepts the spread; the reported color is the top-left one
        let img = image_with_corners(
            Rgb([200, 200, 200]),
            Rgb([205, 200, 200]),
            Rgb([200, 205, 200]),
            Rgb([200, 200, 205]),
        );

        let opts = BorderOptions::lenient(5);
        assert_eq!(
            BorderClassifier::classify(&img, &opts),
            Some(Rgb([200, 200, 200]))
        );
    }

    #[test]
    fn test_single_pixel_image() {
        let img = RgbImage::from_pixel(1, 1, Rgb([42, 42, 42]));

        let color = BorderClassifier::classify(&img, &BorderOptions::default());
        assert_eq!(color, Some(Rgb([42, 42, 42])));
    }

    #[test]
    fn test_single_row_image() {
        let mut img = RgbImage::from_pixel(8, 1, Rgb([0, 0, 0]));
        img.put_pixel(7, 0, Rgb([255, 0, 0]));

        // Corners (0,0)/(0,H-1) coincide, as do (W-1,0)/(W-1,H-1)
        let color = BorderClassifier::classify(&img, &BorderOptions::default());
        assert_eq!(color, None);

        img.put_pixel(7, 0, Rgb([0, 0, 0]));
        let color = BorderClassifier::classify(&img, &BorderOptions::default());
        assert_eq!(color, Some(Rgb([0, 0, 0])));
    }
}
