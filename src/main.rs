use clap::{Parser, Subcommand};
use rawpress::batch::{self, Outcome};
use rawpress::config::{BatchOptions, PixelBudget};
use rawpress::imaging::{Quality, RustBackend};
use rawpress::{metadata, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

/// How often the foreground thread polls the batch worker.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "rawpress")]
#[command(about = "Batch DNG to JPEG converter that carries camera metadata across")]
#[command(long_about = "\
Batch DNG to JPEG converter that carries camera metadata across

Every .dng file in the input folder is decoded, optionally downscaled to
a pixel budget, and written as a JPEG with the same name into the output
folder. Recognized EXIF fields (capture settings, camera and lens
identification, GPS position) are transcoded into the output; everything
else is dropped.

Sizing:

  --megapixels original   keep the source dimensions (default)
  --megapixels 2..16      cap the output at N million pixels, preserving
                          aspect ratio; images already under the cap are
                          never upscaled

The batch stops at the first file that fails to decode or encode;
already-written JPEGs stay on disk. A source without readable metadata
still converts — it just carries no EXIF.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every .dng file in a folder to resized JPEGs
    Convert {
        /// Folder containing .dng files
        #[arg(long)]
        input: PathBuf,

        /// Folder for the converted JPEGs (created if missing)
        #[arg(long)]
        output: PathBuf,

        /// Output size: 'original' or a megapixel budget (2, 4, ... 16)
        #[arg(long, default_value = "original")]
        megapixels: PixelBudget,

        /// JPEG quality
        #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(1..=100))]
        quality: u32,

        /// Print the final report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the metadata fields a file would carry into its JPEG
    Tags {
        /// Source file to inspect
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Convert {
            input,
            output,
            megapixels,
            quality,
            json,
        } => run_convert(input, output, megapixels, quality, json),
        Command::Tags { file } => run_tags(&file),
    }
}

fn run_convert(
    input: PathBuf,
    output_dir: PathBuf,
    megapixels: PixelBudget,
    quality: u32,
    json: bool,
) -> ExitCode {
    let options = BatchOptions {
        input_dir: input,
        output_dir,
        pixel_budget: megapixels,
        quality: Quality::new(quality),
    };

    let handle = batch::spawn_batch(Arc::new(RustBackend::new()), options);
    let progress = handle.progress();
    let mut last_file: Option<String> = None;

    // Poll the worker on a short fixed interval; the snapshot read never
    // blocks on the conversion itself.
    while !handle.is_finished() {
        let snapshot = progress.snapshot();
        if snapshot.current_file != last_file {
            if let Some(name) = &snapshot.current_file {
                println!(
                    "{}",
                    output::format_converting(name, snapshot.processed + 1, snapshot.total)
                );
            }
            last_file = snapshot.current_file;
        }
        std::thread::sleep(POLL_INTERVAL);
    }

    match handle.join() {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(rendered) => println!("{rendered}"),
                    Err(err) => {
                        eprintln!("failed to render report: {err}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                output::print_report(&report);
            }
            match report.outcome {
                Outcome::Failed { .. } => ExitCode::FAILURE,
                _ => ExitCode::SUCCESS,
            }
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_tags(file: &Path) -> ExitCode {
    match metadata::read_raw_tags(file) {
        Ok(tags) => {
            let block = metadata::transcode(&tags);
            if block.is_empty() {
                println!("no recognized metadata in {}", file.display());
            } else {
                for line in output::format_metadata_block(&block) {
                    println!("{line}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("cannot read metadata from {}: {err}", file.display());
            ExitCode::FAILURE
        }
    }
}
