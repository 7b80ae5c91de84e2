//! Imaging backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the conversion
//! pipeline delegates: decode a source file to pixels, resample a pixel
//! buffer, and encode a pixel buffer as JPEG (with an optional embedded
//! metadata blob).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, built on
//! the `image` crate. Tests use the recording `MockBackend` below.

use super::params::EncodeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    ProcessingFailed(String),
}

/// Interleaved RGB8 pixel data with its dimensions.
///
/// The currency between decode, resize, and encode. `data` holds exactly
/// `width * height * 3` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len() as u64,
            u64::from(width) * u64::from(height) * 3,
            "pixel data length must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// An all-black buffer of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        let len = u64::from(width) * u64::from(height) * 3;
        Self::new(width, height, vec![0; len as usize])
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Trait for imaging backends.
///
/// Every backend must implement all three operations — decode, resize, and
/// encode — so the pipeline and batch driver stay backend-agnostic.
pub trait ImageBackend: Send + Sync {
    /// Decode a source image file into an RGB8 pixel buffer.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError>;

    /// Resample a pixel buffer to the given dimensions with a
    /// high-quality (Lanczos-class) filter.
    fn resize(&self, pixels: &PixelBuffer, width: u32, height: u32) -> PixelBuffer;

    /// Encode a pixel buffer as JPEG and write it to `params.output`,
    /// embedding `params.exif` when present.
    fn encode_jpeg(&self, pixels: &PixelBuffer, params: &EncodeParams)
    -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations without doing pixel work.
    /// Uses Mutex (not RefCell) so it stays Sync for the batch worker.
    #[derive(Default)]
    pub struct MockBackend {
        /// Dimensions handed out by successive decode calls (popped from
        /// the back); when exhausted, decode returns a 100x75 buffer.
        pub decode_dimensions: Mutex<Vec<(u32, u32)>>,
        /// File names (substring match) whose decode fails.
        pub fail_decode: Vec<String>,
        /// File names (substring match) whose encode fails.
        pub fail_encode: Vec<String>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode(String),
        Resize {
            from: (u32, u32),
            to: (u32, u32),
        },
        Encode {
            output: String,
            quality: u32,
            has_exif: bool,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<(u32, u32)>) -> Self {
            Self {
                decode_dimensions: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn failing_decode(name: &str) -> Self {
            Self {
                fail_decode: vec![name.to_string()],
                ..Self::default()
            }
        }

        pub fn failing_encode(name: &str) -> Self {
            Self {
                fail_encode: vec![name.to_string()],
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn matches(list: &[String], path: &Path) -> bool {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            list.iter().any(|pat| name.contains(pat.as_str()))
        }
    }

    impl ImageBackend for MockBackend {
        fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Decode(path.to_string_lossy().to_string()));

            if Self::matches(&self.fail_decode, path) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock decode failure: {}",
                    path.display()
                )));
            }

            let (width, height) = self
                .decode_dimensions
                .lock()
                .unwrap()
                .pop()
                .unwrap_or((100, 75));
            Ok(PixelBuffer::blank(width, height))
        }

        fn resize(&self, pixels: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
            self.operations.lock().unwrap().push(RecordedOp::Resize {
                from: pixels.dimensions(),
                to: (width, height),
            });
            PixelBuffer::blank(width, height)
        }

        fn encode_jpeg(
            &self,
            _pixels: &PixelBuffer,
            params: &EncodeParams,
        ) -> Result<(), BackendError> {
            self.operations.lock().unwrap().push(RecordedOp::Encode {
                output: params.output.to_string_lossy().to_string(),
                quality: params.quality.value(),
                has_exif: params.exif.is_some(),
            });

            if Self::matches(&self.fail_encode, &params.output) {
                return Err(BackendError::ProcessingFailed(format!(
                    "mock encode failure: {}",
                    params.output.display()
                )));
            }
            // Touch the output so directory-content assertions work.
            std::fs::write(&params.output, b"")?;
            Ok(())
        }
    }

    #[test]
    fn pixel_buffer_blank_has_matching_length() {
        let buf = PixelBuffer::blank(4, 3);
        assert_eq!(buf.data.len(), 36);
        assert_eq!(buf.dimensions(), (4, 3));
    }

    #[test]
    fn mock_records_decode() {
        let backend = MockBackend::with_dimensions(vec![(800, 600)]);

        let buf = backend.decode(Path::new("/test/image.dng")).unwrap();
        assert_eq!(buf.dimensions(), (800, 600));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Decode(p) if p == "/test/image.dng"));
    }

    #[test]
    fn mock_decode_failure_matches_file_name() {
        let backend = MockBackend::failing_decode("bad");
        assert!(backend.decode(Path::new("/in/bad.dng")).is_err());
        assert!(backend.decode(Path::new("/in/good.dng")).is_ok());
    }

    #[test]
    fn mock_records_resize_and_encode() {
        let backend = MockBackend::new();
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.jpg");

        let buf = backend.decode(Path::new("/in/a.dng")).unwrap();
        let resized = backend.resize(&buf, 50, 40);
        assert_eq!(resized.dimensions(), (50, 40));

        backend
            .encode_jpeg(
                &resized,
                &EncodeParams {
                    output: out.clone(),
                    quality: crate::imaging::Quality::new(85),
                    exif: None,
                },
            )
            .unwrap();
        assert!(out.exists());

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 3);
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize {
                from: (100, 75),
                to: (50, 40)
            }
        ));
        assert!(matches!(
            &ops[2],
            RecordedOp::Encode {
                quality: 85,
                has_exif: false,
                ..
            }
        ));
    }
}
