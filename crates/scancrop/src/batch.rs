//! Batch driver: map the crop routine over a folder of scans.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::BatchConfig;
use crate::crop::crop_scan;

/// Errors that abort a batch run before any file is processed.
///
/// Per-file crop failures are not here; those are logged and skipped.
#[derive(thiserror::Error, Debug)]
pub enum BatchError {
    #[error("unable to list input folder {path}: {source}")]
    ListInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to create output folder {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Totals of a completed batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files that ran the crop routine to completion (even with 0 outputs).
    pub processed: usize,
    /// Files skipped after a crop error.
    pub failed: usize,
    /// Cropped photos written across all files.
    pub files_written: usize,
}

/// Enumerate the image files of `input_folder`, non-recursively.
///
/// A file is accepted when its name ends with one of `allowed_extensions`
/// (case-insensitive). The result is sorted so runs are reproducible.
pub fn list_image_files(
    input_folder: impl AsRef<Path>,
    allowed_extensions: &[String],
) -> Result<Vec<PathBuf>, BatchError> {
    let input_folder = input_folder.as_ref();
    let list_err = |source| BatchError::ListInput {
        path: input_folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(input_folder).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_lowercase();
        if allowed_extensions
            .iter()
            .any(|ext| name.ends_with(&ext.to_lowercase()))
        {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Run the crop routine over every matching file in the input folder.
///
/// Creates the output folder if missing and distributes files across a
/// fixed-size worker pool of `config.threads` workers. Files are independent
/// and completion order is unspecified for more than one worker; the set of
/// produced files does not depend on the worker count.
///
/// A file that fails to crop is logged and skipped; the run still completes.
pub fn process_folder(config: &BatchConfig) -> Result<BatchSummary, BatchError> {
    let output_folder = Path::new(&config.output_folder);
    fs::create_dir_all(output_folder).map_err(|source| BatchError::CreateOutput {
        path: output_folder.to_path_buf(),
        source,
    })?;

    let files = list_image_files(&config.input_folder, &config.allowed_extensions)?;
    log::info!(
        "processing {} file(s) from {} with {} thread(s)",
        files.len(),
        config.input_folder,
        config.threads
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let summary = pool.install(|| {
        files
            .par_iter()
            .map(
                |path| match crop_scan(path, output_folder, &config.params) {
                    Ok(report) => BatchSummary {
                        processed: 1,
                        failed: 0,
                        files_written: report.files.len(),
                    },
                    Err(err) => {
                        log::error!("{err}");
                        BatchSummary {
                            processed: 0,
                            failed: 1,
                            files_written: 0,
                        }
                    }
                },
            )
            .reduce(BatchSummary::default, |a, b| BatchSummary {
                processed: a.processed + b.processed,
                failed: a.failed + b.failed,
                files_written: a.files_written + b.files_written,
            })
    });

    Ok(summary)
}
