//! Core pixel-level primitives for scanned-photo extraction.
//!
//! This crate is intentionally small and free of image-format concerns. It
//! operates on raw row-major byte buffers and provides the pieces the crop
//! pipeline is built from: grayscale conversion, binary thresholding, and
//! external-region extraction on a binary mask.

mod image;
mod logger;
mod region;
mod threshold;

pub use image::{gray_from_rgb8, GrayImage, GrayImageView};
pub use logger::init_with_level;
pub use region::{find_external_regions, sort_reading_order, BoundingBox, Region};
pub use threshold::{binary_threshold, invert};
