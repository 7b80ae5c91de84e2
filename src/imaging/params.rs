//! Parameter types for imaging operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`pipeline`](crate::pipeline) (which decides what
//! to produce for each file) and the [`backend`](super::backend) (which
//! does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing pipeline logic.

use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Full specification for one JPEG encode: where to write, at what quality,
/// and which EXIF blob (if any) to embed.
///
/// Chroma is always encoded at full resolution; subsampling is not a
/// parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub quality: Quality,
    /// Serialized metadata blob. `None` means no EXIF segment at all,
    /// not an empty one.
    pub exif: Option<Vec<u8>>,
}
