//! Batch driver: enumerate, convert, report.
//!
//! The driver owns everything around the per-file pipeline: input
//! validation, output-directory creation, `.dng` enumeration, progress
//! publication, and the fail-fast loop. `spawn_batch` runs it on a
//! background worker thread so the caller can poll progress without
//! blocking; `run_batch` is the synchronous core.

use crate::config::BatchOptions;
use crate::imaging::ImageBackend;
use crate::pipeline::{self, ConversionJob, FileOutcome, FileReport};
use crate::progress::ProgressTracker;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

/// Extension accepted from the input directory, matched
/// case-insensitively.
pub const RAW_EXTENSION: &str = "dng";

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("input directory does not exist: {0}")]
    InputDirectoryMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Terminal state of a batch run. `NoInputFiles` and `Cancelled` are
/// benign; `Failed` carries the offending file and cause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Completed,
    NoInputFiles,
    Cancelled,
    Failed { file: String, cause: String },
}

/// Cumulative batch state returned to the caller.
#[derive(Debug, Serialize)]
pub struct ConversionReport {
    pub total: usize,
    pub processed: usize,
    pub files: Vec<FileReport>,
    pub outcome: Outcome,
}

/// List the raw files in `dir`, sorted by name.
///
/// The reference iterated raw directory-listing order; sorting makes
/// batch output and failure points reproducible across filesystems.
pub fn enumerate_raw_files(dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(RAW_EXTENSION));
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Run a whole batch synchronously, publishing progress as it goes.
///
/// Stops at the first failed file; prior outputs stay on disk.
pub fn run_batch<B: ImageBackend + ?Sized>(
    backend: &B,
    options: &BatchOptions,
    progress: &ProgressTracker,
) -> Result<ConversionReport, BatchError> {
    if !options.input_dir.is_dir() {
        return Err(BatchError::InputDirectoryMissing(options.input_dir.clone()));
    }
    fs::create_dir_all(&options.output_dir)?;

    let inputs = enumerate_raw_files(&options.input_dir)?;
    let total = inputs.len();
    if total == 0 {
        // The reference completes the progress bar when there is nothing
        // to do.
        progress.complete();
        return Ok(ConversionReport {
            total: 0,
            processed: 0,
            files: Vec::new(),
            outcome: Outcome::NoInputFiles,
        });
    }

    progress.start(total);
    let mut files = Vec::new();
    let mut outcome = Outcome::Completed;

    for source in &inputs {
        if progress.cancel_flag().is_cancelled() {
            outcome = Outcome::Cancelled;
            break;
        }

        let job = ConversionJob::new(
            source,
            &options.output_dir,
            options.pixel_budget,
            options.quality,
        );
        progress.begin_file(&job.file_name());

        match pipeline::convert_file(backend, &job, progress.cancel_flag()) {
            Ok(FileOutcome::Converted(report)) => {
                files.push(report);
                progress.file_done();
            }
            Ok(FileOutcome::Cancelled) => {
                outcome = Outcome::Cancelled;
                break;
            }
            Err(err) => {
                outcome = Outcome::Failed {
                    file: err.file().to_string(),
                    cause: err.cause(),
                };
                break;
            }
        }
    }

    Ok(ConversionReport {
        total,
        processed: files.len(),
        files,
        outcome,
    })
}

/// Handle to a batch running on a background worker thread.
pub struct BatchHandle {
    worker: JoinHandle<Result<ConversionReport, BatchError>>,
    progress: Arc<ProgressTracker>,
}

impl BatchHandle {
    /// Shared progress tracker for polling.
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    /// Non-blocking liveness poll.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Request cooperative cancellation; the worker stops at the next
    /// stage boundary.
    pub fn cancel(&self) {
        self.progress.request_cancel();
    }

    /// Wait for the worker and return its report.
    pub fn join(self) -> Result<ConversionReport, BatchError> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(BatchError::Io(std::io::Error::other(
                "batch worker panicked",
            ))),
        }
    }
}

/// Run the batch on a background thread so the caller can poll progress
/// without blocking.
pub fn spawn_batch(backend: Arc<dyn ImageBackend>, options: BatchOptions) -> BatchHandle {
    let progress = Arc::new(ProgressTracker::new());
    let worker_progress = Arc::clone(&progress);
    let worker = thread::spawn(move || run_batch(backend.as_ref(), &options, &worker_progress));
    BatchHandle { worker, progress }
}
