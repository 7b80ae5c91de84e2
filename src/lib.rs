//! # Rawpress
//!
//! Batch converter from camera raw (DNG) files to resized JPEGs that
//! carries photographic metadata across the format boundary.
//!
//! # Architecture: Pipeline Over a Backend
//!
//! Each file walks four stages, orchestrated by [`pipeline`] and driven
//! over a folder by [`batch`]:
//!
//! ```text
//! decode  →  transcode metadata  →  resize  →  encode + embed
//! ```
//!
//! Pixel work (decode, resample, encode) sits behind the
//! [`imaging::ImageBackend`] trait; the metadata pass is a second,
//! independent read of the source file. The split exists for two reasons:
//!
//! - **Testability**: pipeline and batch logic run against a recording
//!   mock backend, without encoding a single pixel.
//! - **Honest failure boundaries**: decode and encode problems fail the
//!   file (and, by the fail-fast policy, the batch); metadata problems
//!   never do — a file with no readable EXIF container converts fine and
//!   simply carries nothing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pixel operations behind a backend trait: decode, Lanczos3 resize, JPEG encode; pure budget math |
//! | [`metadata`] | The transcoder: source tag taxonomy → five-group destination taxonomy → EXIF blob |
//! | [`pipeline`] | Per-file stage sequencing with isolated failure handling |
//! | [`batch`] | Folder enumeration, fail-fast loop, background worker, terminal report |
//! | [`progress`] | Snapshot-based progress and cooperative cancellation |
//! | [`config`] | The fixed pixel-budget choices and run options |
//! | [`output`] | CLI report formatting — pure `format_*` functions plus print wrappers |
//!
//! # Design Decisions
//!
//! ## Two Taxonomies, One Table
//!
//! The source side names tags with strings (`"EXIF FNumber"`); the
//! destination side wants numeric field ids sorted into five IFD groups.
//! The whole bridge is one immutable table
//! ([`metadata::mapping`]) consulted per tag — no per-tag code paths.
//! Unrecognized tags drop silently: carrying a curated subset is the
//! contract, and a malformed metadata container degrades to "no metadata
//! attached" rather than a failed conversion.
//!
//! ## Pixel Budgets, Not Target Sizes
//!
//! Output size is capped by pixel count (2–16 MP, or keep-original), with
//! aspect ratio preserved and dimensions truncated so the cap is never
//! exceeded. The image is never upscaled.
//!
//! ## Sequential Batch, Polled Progress
//!
//! One background worker converts files in name order and stops at the
//! first failure, leaving earlier outputs on disk. The caller polls a
//! snapshot (percent, current file) and may request cooperative
//! cancellation; nothing is killed mid-write.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod progress;

#[cfg(test)]
pub(crate) mod test_helpers;
