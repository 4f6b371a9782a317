//! JSON-able configuration for the crop pipeline and batch driver.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_threshold_value() -> i32 {
    240
}
fn default_threshold_max() -> i32 {
    255
}
fn default_min_contour_width() -> i32 {
    50
}
fn default_min_contour_height() -> i32 {
    50
}

/// Tuning knobs of the crop routine.
///
/// Values are plain `i32` and deliberately unvalidated; the threshold
/// clamping rules live in `scancrop_core::binary_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropParams {
    /// Intensities strictly above this count as background.
    #[serde(default = "default_threshold_value")]
    pub threshold_value: i32,
    /// Mask value assigned to background pixels before inversion.
    #[serde(default = "default_threshold_max")]
    pub threshold_max: i32,
    /// Regions narrower than this are rejected as noise.
    #[serde(default = "default_min_contour_width")]
    pub min_contour_width: i32,
    /// Regions shorter than this are rejected as noise.
    #[serde(default = "default_min_contour_height")]
    pub min_contour_height: i32,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            threshold_value: default_threshold_value(),
            threshold_max: default_threshold_max(),
            min_contour_width: default_min_contour_width(),
            min_contour_height: default_min_contour_height(),
        }
    }
}

fn default_input_folder() -> String {
    "raw".to_owned()
}
fn default_output_folder() -> String {
    "output_images".to_owned()
}
fn default_threads() -> usize {
    1
}
fn default_allowed_extensions() -> Vec<String> {
    vec![".png".to_owned(), ".jpg".to_owned(), ".jpeg".to_owned()]
}

/// Configuration of one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_input_folder")]
    pub input_folder: String,
    #[serde(default = "default_output_folder")]
    pub output_folder: String,
    /// Worker count; 1 is effectively sequential.
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Case-insensitive filename suffixes accepted from the input folder.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default)]
    pub params: CropParams,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_folder: default_input_folder(),
            output_folder: default_output_folder(),
            threads: default_threads(),
            allowed_extensions: default_allowed_extensions(),
            params: CropParams::default(),
        }
    }
}

impl BatchConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
