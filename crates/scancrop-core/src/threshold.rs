//! Fixed binary thresholding on grayscale buffers.

use crate::image::{GrayImage, GrayImageView};

/// Apply a fixed binary threshold.
///
/// Pixels with intensity strictly above `threshold_value` map to `max_value`
/// (clamped to `0..=255`); all others map to 0. The threshold is compared as
/// `i32`, so out-of-range values are legal: `threshold_value >= 255` yields an
/// all-zero mask, a negative value yields a mask of `max_value` everywhere.
pub fn binary_threshold(src: &GrayImageView<'_>, threshold_value: i32, max_value: i32) -> GrayImage {
    let high = max_value.clamp(0, 255) as u8;

    let data = src
        .data
        .iter()
        .map(|&v| if (v as i32) > threshold_value { high } else { 0 })
        .collect();

    GrayImage {
        width: src.width,
        height: src.height,
        data,
    }
}

/// Invert a mask in place (`255 - v` per pixel).
///
/// Applied after [`binary_threshold`] so that the photo regions (originally
/// non-white) become the foreground class.
pub fn invert(mask: &mut GrayImage) {
    for v in &mut mask.data {
        *v = 255 - *v;
    }
}
