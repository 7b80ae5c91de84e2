//! Pure Rust imaging backend — no system dependencies.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (DNG, TIFF, JPEG) | `image` crate (DNG is a TIFF container) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (full-resolution chroma) |
//! | EXIF embedding | `img-parts` (APP1 segment splice) |

use super::backend::{BackendError, ImageBackend, PixelBuffer};
use super::params::EncodeParams;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageFormat, ImageReader, RgbImage};
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use std::io::Cursor;
use std::path::Path;

/// Extension fallbacks for files whose content-based format probe fails.
///
/// DNG carries the TIFF magic bytes, so the probe normally resolves it on
/// its own; the table only decides files with an unrecognized signature.
const FORMAT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("dng", ImageFormat::Tiff),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
];

fn format_for_extension(path: &Path) -> Option<ImageFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    FORMAT_CANDIDATES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, format)| *format)
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn attach_exif(encoded: Vec<u8>, blob: &[u8]) -> Result<Vec<u8>, BackendError> {
    let mut jpeg = Jpeg::from_bytes(encoded.into()).map_err(|e| {
        BackendError::ProcessingFailed(format!("reparsing encoded JPEG failed: {e}"))
    })?;
    jpeg.set_exif(Some(blob.to_vec().into()));

    let mut out = Vec::new();
    jpeg.encoder()
        .write_to(&mut out)
        .map_err(|e| BackendError::ProcessingFailed(format!("embedding EXIF failed: {e}")))?;
    Ok(out)
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, BackendError> {
        let mut reader = ImageReader::open(path)
            .map_err(BackendError::Io)?
            .with_guessed_format()
            .map_err(BackendError::Io)?;

        if reader.format().is_none() {
            match format_for_extension(path) {
                Some(format) => reader.set_format(format),
                None => {
                    return Err(BackendError::ProcessingFailed(format!(
                        "unrecognized image format: {}",
                        path.display()
                    )));
                }
            }
        }

        let img = reader.decode().map_err(|e| {
            BackendError::ProcessingFailed(format!("failed to decode {}: {e}", path.display()))
        })?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(PixelBuffer::new(width, height, rgb.into_raw()))
    }

    fn resize(&self, pixels: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
        let img = RgbImage::from_raw(pixels.width, pixels.height, pixels.data.clone())
            .expect("PixelBuffer length matches its dimensions");
        let resized = image::imageops::resize(&img, width, height, FilterType::Lanczos3);
        PixelBuffer::new(width, height, resized.into_raw())
    }

    fn encode_jpeg(
        &self,
        pixels: &PixelBuffer,
        params: &EncodeParams,
    ) -> Result<(), BackendError> {
        // Encode to memory first so the EXIF segment can be spliced in
        // before anything touches the disk.
        let mut encoded = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(
            Cursor::new(&mut encoded),
            params.quality.value() as u8,
        );
        encoder
            .encode(
                &pixels.data,
                pixels.width,
                pixels.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;

        let bytes = match &params.exif {
            Some(blob) => attach_exif(encoded, blob)?,
            None => encoded,
        };
        std::fs::write(&params.output, bytes).map_err(BackendError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::test_helpers::{write_jpeg, write_tiff_as};

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        write_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let buf = backend.decode(&path).unwrap();
        assert_eq!(buf.dimensions(), (200, 150));
    }

    #[test]
    fn decode_tiff_container_with_dng_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("capture.dng");
        write_tiff_as(&path, 120, 80);

        let backend = RustBackend::new();
        let buf = backend.decode(&path).unwrap();
        assert_eq!(buf.dimensions(), (120, 80));
    }

    #[test]
    fn decode_nonexistent_file_errors() {
        let backend = RustBackend::new();
        assert!(matches!(
            backend.decode(Path::new("/nonexistent/image.dng")),
            Err(BackendError::Io(_))
        ));
    }

    #[test]
    fn decode_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.dng");
        std::fs::write(&path, b"not an image at all").unwrap();

        let backend = RustBackend::new();
        assert!(backend.decode(&path).is_err());
    }

    #[test]
    fn resize_produces_target_dimensions() {
        let backend = RustBackend::new();
        let buf = PixelBuffer::blank(400, 300);
        let resized = backend.resize(&buf, 200, 150);
        assert_eq!(resized.dimensions(), (200, 150));
        assert_eq!(resized.data.len(), 200 * 150 * 3);
    }

    #[test]
    fn encode_writes_decodable_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("out.jpg");

        let backend = RustBackend::new();
        backend
            .encode_jpeg(
                &PixelBuffer::blank(64, 48),
                &EncodeParams {
                    output: out.clone(),
                    quality: Quality::new(85),
                    exif: None,
                },
            )
            .unwrap();

        let buf = backend.decode(&out).unwrap();
        assert_eq!(buf.dimensions(), (64, 48));
    }

    #[test]
    fn encode_embeds_exif_segment() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("tagged.jpg");

        let blob = crate::test_helpers::exif_blob(&crate::test_helpers::sample_source_fields());

        let backend = RustBackend::new();
        backend
            .encode_jpeg(
                &PixelBuffer::blank(32, 32),
                &EncodeParams {
                    output: out.clone(),
                    quality: Quality::new(90),
                    exif: Some(blob),
                },
            )
            .unwrap();

        let bytes = std::fs::read(&out).unwrap();
        let jpeg = Jpeg::from_bytes(bytes.into()).unwrap();
        assert!(jpeg.exif().is_some());
    }
}
