//! Detects and crops individual photos out of scanned multi-photo images.
//!
//! A flatbed scan often holds several photos on a white background. This
//! crate finds each photo with a fixed binary threshold and external-region
//! extraction, then writes one cropped JPEG per photo.
//!
//! ## Quickstart
//!
//! ```no_run
//! use scancrop::{crop_scan, CropParams};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = crop_scan("scan.jpg", "output_images", &CropParams::default())?;
//! println!("wrote {} photo(s)", report.files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - [`crop_scan`]: the per-image pipeline (decode, threshold, regions, crop).
//! - [`process_folder`]: batch driver with a fixed-size worker pool.
//! - [`BatchConfig`] / [`CropParams`]: JSON-able configuration.
//! - `scancrop::core`: pixel-level primitives (buffers, threshold, regions).
//! - `scancrop::synth`: synthetic test-scan generation.

pub use scancrop_core as core;
pub use scancrop_synth as synth;

mod batch;
mod config;
mod crop;

pub use batch::{list_image_files, process_folder, BatchError, BatchSummary};
pub use config::{BatchConfig, ConfigError, CropParams};
pub use crop::{crop_scan, CropError, CropReport};
