//! Per-file conversion pipeline.
//!
//! Each file walks the same stages: decode → transcode metadata → resize
//! → encode. A failure in decode or encode fails the job; metadata
//! problems never do — they degrade to "no metadata attached" with a
//! diagnostic in the report. The cancel flag is checked between stages so
//! a cancelled batch never leaves a partially written output.

use crate::config::PixelBudget;
use crate::imaging::{
    BackendError, EncodeParams, ImageBackend, Quality, calculate_budget_dimensions,
};
use crate::metadata;
use crate::progress::CancelFlag;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to decode {file}: {source}")]
    Decode {
        file: String,
        source: BackendError,
    },
    #[error("failed to encode {file}: {source}")]
    Encode {
        file: String,
        source: BackendError,
    },
}

impl ConvertError {
    /// Name of the file the conversion stopped at.
    pub fn file(&self) -> &str {
        match self {
            Self::Decode { file, .. } | Self::Encode { file, .. } => file,
        }
    }

    /// The cause without the file name, for report aggregation.
    pub fn cause(&self) -> String {
        match self {
            Self::Decode { source, .. } => format!("decode failed: {source}"),
            Self::Encode { source, .. } => format!("encode failed: {source}"),
        }
    }
}

/// One (source path, output path) pair plus the run's resize and quality
/// settings. Created per file, discarded when the file completes or fails.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub pixel_budget: PixelBudget,
    pub quality: Quality,
}

impl ConversionJob {
    /// Output path: same stem as the source, `.jpg` extension, in
    /// `output_dir`.
    pub fn new(
        source: &Path,
        output_dir: &Path,
        pixel_budget: PixelBudget,
        quality: Quality,
    ) -> Self {
        let stem = source
            .file_stem()
            .unwrap_or_else(|| source.as_os_str())
            .to_string_lossy();
        Self {
            source: source.to_path_buf(),
            output: output_dir.join(format!("{stem}.jpg")),
            pixel_budget,
            quality,
        }
    }

    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

/// Result of one completed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub source: String,
    pub output: String,
    pub original_dimensions: (u32, u32),
    pub output_dimensions: (u32, u32),
    pub resized: bool,
    pub metadata_attached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Outcome of a single pipeline run.
#[derive(Debug, PartialEq)]
pub enum FileOutcome {
    Converted(FileReport),
    Cancelled,
}

/// Convert one file end to end.
pub fn convert_file<B: ImageBackend + ?Sized>(
    backend: &B,
    job: &ConversionJob,
    cancel: &CancelFlag,
) -> Result<FileOutcome, ConvertError> {
    let file = job.file_name();

    if cancel.is_cancelled() {
        return Ok(FileOutcome::Cancelled);
    }
    let pixels = backend
        .decode(&job.source)
        .map_err(|source| ConvertError::Decode {
            file: file.clone(),
            source,
        })?;
    let original = pixels.dimensions();

    if cancel.is_cancelled() {
        return Ok(FileOutcome::Cancelled);
    }
    // Second pass over the source: metadata is read independently of the
    // pixel decode.
    let (exif, diagnostic) = transcode_source(&job.source);
    let metadata_attached = exif.is_some();

    if cancel.is_cancelled() {
        return Ok(FileOutcome::Cancelled);
    }
    let target = calculate_budget_dimensions(original, job.pixel_budget.pixel_count());
    let (pixels, resized) = if target != original {
        (backend.resize(&pixels, target.0, target.1), true)
    } else {
        (pixels, false)
    };

    if cancel.is_cancelled() {
        return Ok(FileOutcome::Cancelled);
    }
    backend
        .encode_jpeg(
            &pixels,
            &EncodeParams {
                output: job.output.clone(),
                quality: job.quality,
                exif,
            },
        )
        .map_err(|source| ConvertError::Encode {
            file: file.clone(),
            source,
        })?;

    Ok(FileOutcome::Converted(FileReport {
        source: file,
        output: job
            .output
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned(),
        original_dimensions: original,
        output_dimensions: target,
        resized,
        metadata_attached,
        diagnostic,
    }))
}

/// Run the transcoder against the source file. Never fails the job:
/// any problem collapses to "attach nothing" plus a diagnostic.
fn transcode_source(source: &Path) -> (Option<Vec<u8>>, Option<String>) {
    let tags = match metadata::read_raw_tags(source) {
        Ok(tags) => tags,
        Err(err) => return (None, Some(format!("no metadata carried over: {err}"))),
    };
    let block = metadata::transcode(&tags);
    if block.is_empty() {
        return (None, None);
    }
    match block.to_exif_bytes() {
        Ok(bytes) => (Some(bytes), None),
        Err(err) => (None, Some(format!("no metadata carried over: {err}"))),
    }
}
