//! Synthetic multi-photo scan generation.
//!
//! Produces fixture images for exercising the crop pipeline: a white canvas
//! with A4-scan proportions, tiled with uniformly colored rectangles standing
//! in for photos. Not part of the production pipeline.

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Errors produced while writing a synthetic scan.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

fn default_canvas_width() -> u32 {
    2000
}
fn default_canvas_height() -> u32 {
    2800
}
fn default_photo_width() -> u32 {
    800
}
fn default_photo_height() -> u32 {
    1200
}
fn default_margin() -> u32 {
    100
}

/// Layout of a synthetic scan.
///
/// Defaults mimic an A4 flatbed scan holding portrait 800×1200 photos with a
/// 100 px gutter. Only `photo_count` usually needs setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthSpec {
    pub photo_count: usize,
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    #[serde(default = "default_photo_width")]
    pub photo_width: u32,
    #[serde(default = "default_photo_height")]
    pub photo_height: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
}

impl SynthSpec {
    /// A spec with default canvas geometry and the given photo count.
    pub fn with_photo_count(photo_count: usize) -> Self {
        Self {
            photo_count,
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            photo_width: default_photo_width(),
            photo_height: default_photo_height(),
            margin: default_margin(),
        }
    }

    /// Side of the square-ish grid the photos are tiled into.
    pub fn grid_size(&self) -> usize {
        (self.photo_count as f64).sqrt().ceil() as usize
    }

    /// Top-left corners and fill colors of all photos, in placement order.
    ///
    /// Positions may extend past the canvas; rendering clips them, matching
    /// a paste onto a fixed-size background.
    pub fn placements(&self) -> Vec<(u32, u32, Rgb<u8>)> {
        let grid = self.grid_size();
        let count = self.photo_count.min(grid * grid);

        (0..count)
            .map(|i| {
                let col = (i % grid) as u32;
                let row = (i / grid) as u32;
                let x = self.margin + col * (self.photo_width + self.margin);
                let y = self.margin + row * (self.photo_height + self.margin);
                (x, y, PALETTE[i % PALETTE.len()])
            })
            .collect()
    }

    /// Default output filename for this spec.
    pub fn default_filename(&self) -> String {
        format!("test_{}_scan.jpg", self.photo_count)
    }
}

/// Fill colors cycled across photos (CSS values).
pub const PALETTE: [Rgb<u8>; 8] = [
    Rgb([0, 0, 255]),     // blue
    Rgb([255, 0, 0]),     // red
    Rgb([0, 128, 0]),     // green
    Rgb([255, 255, 0]),   // yellow
    Rgb([128, 0, 128]),   // purple
    Rgb([255, 165, 0]),   // orange
    Rgb([255, 192, 203]), // pink
    Rgb([0, 255, 255]),   // cyan
];

/// Render the synthetic scan to an in-memory RGB image.
pub fn render(spec: &SynthSpec) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(
        spec.canvas_width,
        spec.canvas_height,
        Rgb([255, 255, 255]),
    );

    for (x0, y0, color) in spec.placements() {
        let x1 = (x0 + spec.photo_width).min(spec.canvas_width);
        let y1 = (y0 + spec.photo_height).min(spec.canvas_height);
        for y in y0.min(y1)..y1 {
            for x in x0.min(x1)..x1 {
                canvas.put_pixel(x, y, color);
            }
        }
    }

    canvas
}

/// Render the scan and write it as a quality-95 JPEG.
///
/// `filename` falls back to `test_<photo_count>_scan.jpg`. The output folder
/// is created if missing. Returns the full path of the written file.
pub fn write_jpeg(
    spec: &SynthSpec,
    output_folder: impl AsRef<Path>,
    filename: Option<&str>,
) -> Result<PathBuf, SynthError> {
    let output_folder = output_folder.as_ref();
    fs::create_dir_all(output_folder)?;

    let name = filename
        .map(str::to_owned)
        .unwrap_or_else(|| spec.default_filename());
    let path = output_folder.join(name);

    let canvas = render(spec);
    let file = fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, 95);
    canvas.write_with_encoder(encoder)?;
    writer.flush()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_size_is_ceil_sqrt() {
        assert_eq!(SynthSpec::with_photo_count(1).grid_size(), 1);
        assert_eq!(SynthSpec::with_photo_count(4).grid_size(), 2);
        assert_eq!(SynthSpec::with_photo_count(5).grid_size(), 3);
        assert_eq!(SynthSpec::with_photo_count(9).grid_size(), 3);
    }

    #[test]
    fn four_photos_fill_a_two_by_two_grid() {
        let spec = SynthSpec::with_photo_count(4);
        let placements = spec.placements();
        assert_eq!(placements.len(), 4);
        assert_eq!((placements[0].0, placements[0].1), (100, 100));
        assert_eq!((placements[1].0, placements[1].1), (1000, 100));
        assert_eq!((placements[2].0, placements[2].1), (100, 1400));
        assert_eq!((placements[3].0, placements[3].1), (1000, 1400));
    }

    #[test]
    fn render_paints_photos_and_leaves_margins_white() {
        let spec = SynthSpec::with_photo_count(4);
        let canvas = render(&spec);
        assert_eq!(canvas.dimensions(), (2000, 2800));
        assert_eq!(*canvas.get_pixel(150, 150), PALETTE[0]);
        assert_eq!(*canvas.get_pixel(1050, 150), PALETTE[1]);
        assert_eq!(*canvas.get_pixel(50, 50), Rgb([255, 255, 255]));
        assert_eq!(*canvas.get_pixel(950, 150), Rgb([255, 255, 255]));
    }

    #[test]
    fn photos_past_the_canvas_edge_are_clipped() {
        // Nine photos need a 3x3 grid; the third column and row run off the
        // 2000x2800 canvas and must not panic.
        let spec = SynthSpec::with_photo_count(9);
        let canvas = render(&spec);
        assert_eq!(canvas.dimensions(), (2000, 2800));
        assert_eq!(*canvas.get_pixel(1950, 150), PALETTE[2]);
    }

    #[test]
    fn default_filename_embeds_count() {
        assert_eq!(
            SynthSpec::with_photo_count(6).default_filename(),
            "test_6_scan.jpg"
        );
    }

    #[test]
    fn write_jpeg_round_trips_dimensions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let spec = SynthSpec {
            canvas_width: 400,
            canvas_height: 560,
            photo_width: 160,
            photo_height: 240,
            margin: 20,
            photo_count: 2,
        };
        let path = write_jpeg(&spec, dir.path(), None).expect("write scan");
        assert_eq!(path.file_name().unwrap(), "test_2_scan.jpg");

        let decoded = image::open(&path).expect("decode scan");
        assert_eq!(decoded.width(), 400);
        assert_eq!(decoded.height(), 560);
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: SynthSpec = serde_json::from_str(r#"{"photo_count": 3}"#).expect("parse");
        assert_eq!(spec.photo_count, 3);
        assert_eq!(spec.canvas_width, 2000);
        assert_eq!(spec.margin, 100);
    }
}
