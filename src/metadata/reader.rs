//! Source-taxonomy metadata reading.
//!
//! Parses a file's EXIF container and renders every field into the
//! string-keyed source taxonomy the transcoder consumes: the tag name is
//! `"<group> <tagname>"` (`"EXIF FNumber"`, `"GPS GPSLatitude"`, …) and
//! the value is a flat sequence of primitive atoms. This pass is
//! independent of the pixel decode — the pipeline reads the source file
//! twice, once for pixels and once for metadata.

use super::MetadataError;
use exif::{Context, Field, In, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A single primitive value carried by a source tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Int(i64),
    /// (numerator, denominator), sign as supplied by the source.
    Rational(i64, i64),
    Text(String),
}

/// One source-taxonomy metadata entry. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    /// String key in the source taxonomy, e.g. `"EXIF FNumber"`.
    pub name: String,
    /// Ordered value atoms; never empty.
    pub values: Vec<Atom>,
    /// Human-readable rendering, used for byte-string conversion.
    pub printable: String,
}

impl RawTag {
    pub fn new(name: &str, values: Vec<Atom>) -> Self {
        let printable = match values.as_slice() {
            [Atom::Text(text)] => text.clone(),
            _ => String::new(),
        };
        Self {
            name: name.to_string(),
            values,
            printable,
        }
    }
}

/// Read all source tags from a file's EXIF container.
///
/// Errors when the file has no parseable metadata container at all; the
/// pipeline treats that as "no metadata", not as a failed conversion.
pub fn read_raw_tags(path: &Path) -> Result<Vec<RawTag>, MetadataError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;
    Ok(exif.fields().filter_map(field_to_raw_tag).collect())
}

/// Source group names follow the exifread convention: the primary TIFF
/// IFD is `Image`, the second one `Thumbnail`.
fn group_name(field: &Field) -> Option<&'static str> {
    match field.tag.context() {
        Context::Tiff => Some(if field.ifd_num == In::THUMBNAIL {
            "Thumbnail"
        } else {
            "Image"
        }),
        Context::Exif => Some("EXIF"),
        Context::Gps => Some("GPS"),
        Context::Interop => Some("Interoperability"),
        _ => None,
    }
}

fn field_to_raw_tag(field: &Field) -> Option<RawTag> {
    let group = group_name(field)?;
    let values = value_atoms(&field.value);
    if values.is_empty() {
        return None;
    }

    // ASCII values render as the plain string; everything else uses the
    // parser's display form (e.g. "1/200" for a rational).
    let printable = match values.as_slice() {
        [Atom::Text(text)] => text.clone(),
        _ => field.display_value().to_string(),
    };

    Some(RawTag {
        name: format!("{group} {}", field.tag),
        values,
        printable,
    })
}

fn value_atoms(value: &Value) -> Vec<Atom> {
    match value {
        Value::Byte(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::Short(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::Long(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::SByte(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::SShort(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::SLong(v) => v.iter().map(|&n| Atom::Int(n.into())).collect(),
        Value::Rational(v) => v
            .iter()
            .map(|r| Atom::Rational(r.num.into(), r.denom.into()))
            .collect(),
        Value::SRational(v) => v
            .iter()
            .map(|r| Atom::Rational(r.num.into(), r.denom.into()))
            .collect(),
        Value::Ascii(parts) => {
            let text = parts
                .iter()
                .map(|part| String::from_utf8_lossy(part))
                .collect::<Vec<_>>()
                .join(" ");
            let text = text.trim_matches('\0').trim().to_string();
            if text.is_empty() {
                Vec::new()
            } else {
                vec![Atom::Text(text)]
            }
        }
        // Fixed-length identifier fields (version codes) arrive as
        // undefined bytes.
        Value::Undefined(bytes, _) => bytes.iter().map(|&n| Atom::Int(n.into())).collect(),
        // Float/double and unknown types have no mapped destination.
        _ => Vec::new(),
    }
}
