//! Metadata transcoding — the bridge between two tag taxonomies.
//!
//! The source side is string-keyed: each tag is named `"<group> <tag>"`
//! (`"EXIF FNumber"`, `"GPS GPSLatitude"`) and carries a flat sequence of
//! primitive atoms. The destination side is the structured form the output
//! encoder embeds: five fixed IFD groups, each mapping numeric field ids
//! to typed values.
//!
//! The module is split into:
//! - [`reader`] — parse a file's EXIF container into source tags
//! - [`mapping`] — the static name → (field id, kind) table and the
//!   prefix routing rule
//! - [`transcode`](transcode()) — convert recognized tags into a
//!   [`MetadataBlock`] and serialize it for embedding
//!
//! Unrecognized tags are dropped, never errors. A source without any
//! metadata container surfaces as [`MetadataError`], which the pipeline
//! downgrades to "no metadata attached" plus a diagnostic.

use thiserror::Error;

pub mod mapping;
pub mod reader;
pub mod transcode;

pub use mapping::{FieldId, IfdGroup, ValueKind};
pub use reader::{Atom, RawTag, read_raw_tags};
pub use transcode::{IfdValue, MetadataBlock, transcode};

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("EXIF data error: {0}")]
    Exif(#[from] exif::Error),
}
