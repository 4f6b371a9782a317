use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use scancrop::synth::{self, SynthSpec};
use scancrop::{process_folder, BatchConfig, CropParams};

#[derive(Parser)]
#[command(
    name = "scancrop",
    version,
    about = "Detect and crop individual photos out of scanned images"
)]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crop every matching scan in a folder.
    Crop(CropArgs),
    /// Generate a synthetic test scan.
    Synth(SynthArgs),
}

#[derive(Args)]
struct CropArgs {
    /// Folder containing the scanned images.
    #[arg(long, env = "INPUT_FOLDER", default_value = "raw")]
    input_folder: String,

    /// Folder receiving the cropped photos.
    #[arg(long, env = "OUTPUT_FOLDER", default_value = "output_images")]
    output_folder: String,

    /// Number of processing threads.
    #[arg(long, env = "THREADS", default_value_t = 1)]
    threads: usize,

    /// Intensities strictly above this count as background.
    #[arg(long, env = "THRESHOLD_VALUE", default_value_t = 240)]
    threshold_value: i32,

    /// Mask value assigned to background pixels before inversion.
    #[arg(long, env = "THRESHOLD_MAX", default_value_t = 255)]
    threshold_max: i32,

    /// Minimum width of a region to keep, in pixels.
    #[arg(long, env = "MIN_CONTOUR_WIDTH", default_value_t = 50)]
    min_contour_width: i32,

    /// Minimum height of a region to keep, in pixels.
    #[arg(long, env = "MIN_CONTOUR_HEIGHT", default_value_t = 50)]
    min_contour_height: i32,

    /// Comma-separated list of accepted filename extensions.
    #[arg(long, env = "ALLOWED_EXTENSIONS", default_value = ".png,.jpg,.jpeg")]
    allowed_extensions: String,
}

#[derive(Args)]
struct SynthArgs {
    /// Number of photos to place on the canvas.
    #[arg(short, long, default_value_t = 4)]
    num_photos: usize,

    /// Output filename; defaults to test_<n>_scan.jpg.
    #[arg(short, long)]
    output: Option<String>,

    /// Output folder.
    #[arg(short, long, default_value = "demos")]
    folder: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = scancrop::core::init_with_level(level);

    match cli.command {
        Command::Crop(args) => run_crop(args),
        Command::Synth(args) => run_synth(args),
    }
}

fn run_crop(args: CropArgs) -> ExitCode {
    let config = BatchConfig {
        input_folder: args.input_folder,
        output_folder: args.output_folder,
        threads: args.threads,
        allowed_extensions: args
            .allowed_extensions
            .split(',')
            .map(str::to_owned)
            .collect(),
        params: CropParams {
            threshold_value: args.threshold_value,
            threshold_max: args.threshold_max,
            min_contour_width: args.min_contour_width,
            min_contour_height: args.min_contour_height,
        },
    };

    // Per-file failures are logged inside the driver and do not fail the run.
    match process_folder(&config) {
        Ok(summary) => {
            log::info!(
                "done: {} processed, {} failed, {} photo(s) written",
                summary.processed,
                summary.failed,
                summary.files_written
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_synth(args: SynthArgs) -> ExitCode {
    let spec = SynthSpec::with_photo_count(args.num_photos);
    match synth::write_jpeg(&spec, &args.folder, args.output.as_deref()) {
        Ok(path) => {
            println!("Test image created at: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
