//! Shared test fixtures: synthetic images, with and without embedded
//! EXIF segments.
//!
//! The EXIF blobs here are built directly with the `exif` writer, not
//! through the transcoder, so reader tests exercise parsing against an
//! independently constructed file.

use exif::experimental::Writer;
use exif::{Context, Field, In, Rational, Tag, Value};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, RgbImage};
use img_parts::ImageEXIF;
use img_parts::jpeg::Jpeg;
use std::path::Path;

/// A small gradient so encoded files are not degenerate single-color
/// images.
pub fn rgb_pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Write a baseline JPEG (no metadata) with the given dimensions.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = rgb_pattern(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a TIFF container under any file name (e.g. a `.dng` path).
pub fn write_tiff_as(path: &Path, width: u32, height: u32) {
    DynamicImage::ImageRgb8(rgb_pattern(width, height))
        .save_with_format(path, ImageFormat::Tiff)
        .unwrap();
}

/// Source fields for a capture-like EXIF segment: camera make, aperture,
/// and a GPS position.
pub fn sample_source_fields() -> Vec<Field> {
    vec![
        Field {
            tag: Tag(Context::Tiff, 0x010f),
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![b"Rawpress Test".to_vec()]),
        },
        Field {
            tag: Tag(Context::Exif, 0x829d),
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![Rational { num: 28, denom: 10 }]),
        },
        Field {
            tag: Tag(Context::Gps, 0x0002),
            ifd_num: In::PRIMARY,
            value: Value::Rational(vec![
                Rational { num: 52, denom: 1 },
                Rational { num: 30, denom: 1 },
                Rational {
                    num: 1234,
                    denom: 100,
                },
            ]),
        },
    ]
}

/// Build a TIFF-structured EXIF blob from fields.
pub fn exif_blob(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut cursor = std::io::Cursor::new(Vec::new());
    writer.write(&mut cursor, false).unwrap();
    cursor.into_inner()
}

/// Write a JPEG carrying the given fields in an EXIF segment.
pub fn write_jpeg_with_exif(path: &Path, width: u32, height: u32, fields: &[Field]) {
    let img = rgb_pattern(width, height);
    let mut encoded = Vec::new();
    JpegEncoder::new(std::io::Cursor::new(&mut encoded))
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();

    let mut jpeg = Jpeg::from_bytes(encoded.into()).unwrap();
    jpeg.set_exif(Some(exif_blob(fields).into()));
    let mut out = Vec::new();
    jpeg.encoder().write_to(&mut out).unwrap();
    std::fs::write(path, out).unwrap();
}
