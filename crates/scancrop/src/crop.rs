//! The crop routine: one scanned image in, zero or more photo files out.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use scancrop_core::{
    binary_threshold, find_external_regions, gray_from_rgb8, invert, sort_reading_order,
};

use crate::config::CropParams;

/// Errors from a single crop run.
///
/// All of these are non-fatal to a batch: the driver logs them and moves on
/// to the next file.
#[derive(thiserror::Error, Debug)]
pub enum CropError {
    #[error("unable to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unable to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Outcome of one crop run.
///
/// Distinguishes "no regions detected at all" (`regions_found == 0`) from
/// "regions detected but all below the minimum size" (`regions_found > 0`,
/// `files` empty).
#[derive(Debug, Clone, Default)]
pub struct CropReport {
    /// External regions detected before size filtering.
    pub regions_found: usize,
    /// Output files written, in reading order.
    pub files: Vec<PathBuf>,
}

/// Detect the photos in a scanned image and write each as a separate JPEG.
///
/// Pipeline: decode → grayscale → binary threshold → invert → external
/// regions → reading-order sort → minimum-size filter → crop of the original
/// image. Outputs are named `<source-basename>_<index>.jpg` with the index
/// counting accepted regions from 0.
///
/// An existing file at an output path is overwritten; a warning is logged
/// when that happens, since two inputs sharing a basename would otherwise
/// clobber each other silently.
pub fn crop_scan(
    image_path: impl AsRef<Path>,
    output_folder: impl AsRef<Path>,
    params: &CropParams,
) -> Result<CropReport, CropError> {
    let image_path = image_path.as_ref();
    let output_folder = output_folder.as_ref();

    let rgb: RgbImage = image::open(image_path)
        .map_err(|source| CropError::Read {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let gray = gray_from_rgb8(rgb.as_raw(), rgb.width() as usize, rgb.height() as usize);
    let mut mask = binary_threshold(&gray.view(), params.threshold_value, params.threshold_max);
    invert(&mut mask);

    let mut regions = find_external_regions(&mask.view());
    if regions.is_empty() {
        log::warn!("no photo regions found in {}", image_path.display());
        return Ok(CropReport::default());
    }
    sort_reading_order(&mut regions);

    let base = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scan".to_owned());

    let mut report = CropReport {
        regions_found: regions.len(),
        files: Vec::new(),
    };

    for region in &regions {
        let bbox = region.bounding_box();
        if (bbox.width as i64) < params.min_contour_width as i64
            || (bbox.height as i64) < params.min_contour_height as i64
        {
            continue;
        }

        let out_path = output_folder.join(format!("{base}_{}.jpg", report.files.len()));
        if out_path.exists() {
            log::warn!("overwriting existing output {}", out_path.display());
        }

        let cropped = image::imageops::crop_imm(
            &rgb,
            bbox.x as u32,
            bbox.y as u32,
            bbox.width as u32,
            bbox.height as u32,
        )
        .to_image();

        let file = fs::File::create(&out_path).map_err(|source| CropError::Write {
            path: out_path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, 95);
        cropped
            .write_with_encoder(encoder)
            .map_err(|source| CropError::Encode {
                path: out_path.clone(),
                source,
            })?;
        writer.flush().map_err(|source| CropError::Write {
            path: out_path.clone(),
            source,
        })?;

        log::info!("saved {}", out_path.display());
        report.files.push(out_path);
    }

    Ok(report)
}
