//! The static source-name → destination-field mapping table.
//!
//! One immutable, process-wide table drives the whole transcoder: each
//! recognized source tag name maps to the numeric field id it occupies in
//! the destination taxonomy, together with the conversion its values go
//! through. Anything not in the table is dropped silently — partial
//! carry-over is the contract, not a failure.
//!
//! Routing to a destination group is independent of the table: the group
//! is the leading word of the source name (`"EXIF FNumber"` lives in the
//! Exif IFD). Keeping the two rules separate makes the consistency between
//! them testable (see `table_names_all_route` below).

use std::collections::HashMap;
use std::sync::LazyLock;

/// How a recognized source tag's values convert into the destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The tag's human-readable rendering, stored as raw bytes.
    ByteString,
    /// First value atom as a signed integer.
    SignedInteger,
    /// First value atom as an unsigned integer.
    UnsignedLong,
    /// First value atom as an unsigned (numerator, denominator) pair.
    Rational,
    /// First value atom as a signed (numerator, denominator) pair.
    SignedRational,
    /// Every value atom as an unsigned pair, order preserved.
    RationalList,
    /// Every value atom as a small integer, order preserved. Used for
    /// fixed-length identifier fields (version codes and the like).
    ByteList,
}

/// The five destination metadata groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdGroup {
    Image,
    Exif,
    Gps,
    Interop,
    Thumbnail,
}

impl IfdGroup {
    /// Route a source tag name to its destination group by prefix.
    /// Names without a recognized leading group word are rejected.
    pub fn for_tag_name(name: &str) -> Option<IfdGroup> {
        let (group, _) = name.split_once(' ')?;
        match group {
            "Image" => Some(IfdGroup::Image),
            "EXIF" => Some(IfdGroup::Exif),
            "GPS" => Some(IfdGroup::Gps),
            "Interoperability" => Some(IfdGroup::Interop),
            "Thumbnail" => Some(IfdGroup::Thumbnail),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IfdGroup::Image => "Image",
            IfdGroup::Exif => "Exif",
            IfdGroup::Gps => "GPS",
            IfdGroup::Interop => "Interop",
            IfdGroup::Thumbnail => "Thumbnail",
        }
    }
}

/// Destination field id, unique within its group.
pub type FieldId = u16;

/// The recognized source tags.
///
/// Thumbnail-IFD tags are deliberately absent: the source's embedded
/// thumbnail geometry would be stale in the re-encoded output.
const TAG_TABLE: &[(&str, FieldId, ValueKind)] = &[
    // IFD0 — descriptive image fields
    ("Image ImageDescription", 0x010e, ValueKind::ByteString),
    ("Image Make", 0x010f, ValueKind::ByteString),
    ("Image Model", 0x0110, ValueKind::ByteString),
    ("Image Orientation", 0x0112, ValueKind::UnsignedLong),
    ("Image XResolution", 0x011a, ValueKind::Rational),
    ("Image YResolution", 0x011b, ValueKind::Rational),
    ("Image ResolutionUnit", 0x0128, ValueKind::UnsignedLong),
    ("Image Software", 0x0131, ValueKind::ByteString),
    ("Image DateTime", 0x0132, ValueKind::ByteString),
    ("Image Artist", 0x013b, ValueKind::ByteString),
    ("Image Copyright", 0x8298, ValueKind::ByteString),
    // Exif IFD — capture fields
    ("EXIF ExposureTime", 0x829a, ValueKind::Rational),
    ("EXIF FNumber", 0x829d, ValueKind::Rational),
    ("EXIF ExposureProgram", 0x8822, ValueKind::UnsignedLong),
    ("EXIF PhotographicSensitivity", 0x8827, ValueKind::UnsignedLong),
    ("EXIF SensitivityType", 0x8830, ValueKind::UnsignedLong),
    ("EXIF TimeZoneOffset", 0x882a, ValueKind::SignedInteger),
    ("EXIF ExifVersion", 0x9000, ValueKind::ByteList),
    ("EXIF DateTimeOriginal", 0x9003, ValueKind::ByteString),
    ("EXIF DateTimeDigitized", 0x9004, ValueKind::ByteString),
    ("EXIF ShutterSpeedValue", 0x9201, ValueKind::SignedRational),
    ("EXIF ApertureValue", 0x9202, ValueKind::Rational),
    ("EXIF BrightnessValue", 0x9203, ValueKind::SignedRational),
    ("EXIF ExposureBiasValue", 0x9204, ValueKind::SignedRational),
    ("EXIF MaxApertureValue", 0x9205, ValueKind::Rational),
    ("EXIF SubjectDistance", 0x9206, ValueKind::Rational),
    ("EXIF MeteringMode", 0x9207, ValueKind::UnsignedLong),
    ("EXIF LightSource", 0x9208, ValueKind::UnsignedLong),
    ("EXIF Flash", 0x9209, ValueKind::UnsignedLong),
    ("EXIF FocalLength", 0x920a, ValueKind::Rational),
    ("EXIF SubSecTime", 0x9290, ValueKind::ByteString),
    ("EXIF SubSecTimeOriginal", 0x9291, ValueKind::ByteString),
    ("EXIF SubSecTimeDigitized", 0x9292, ValueKind::ByteString),
    ("EXIF ColorSpace", 0xa001, ValueKind::UnsignedLong),
    ("EXIF ExposureMode", 0xa402, ValueKind::UnsignedLong),
    ("EXIF WhiteBalance", 0xa403, ValueKind::UnsignedLong),
    ("EXIF DigitalZoomRatio", 0xa404, ValueKind::Rational),
    ("EXIF FocalLengthIn35mmFilm", 0xa405, ValueKind::UnsignedLong),
    ("EXIF SceneCaptureType", 0xa406, ValueKind::UnsignedLong),
    ("EXIF Contrast", 0xa408, ValueKind::UnsignedLong),
    ("EXIF Saturation", 0xa409, ValueKind::UnsignedLong),
    ("EXIF Sharpness", 0xa40a, ValueKind::UnsignedLong),
    ("EXIF BodySerialNumber", 0xa431, ValueKind::ByteString),
    ("EXIF LensSpecification", 0xa432, ValueKind::RationalList),
    ("EXIF LensMake", 0xa433, ValueKind::ByteString),
    ("EXIF LensModel", 0xa434, ValueKind::ByteString),
    // GPS IFD — position and time
    ("GPS GPSVersionID", 0x0000, ValueKind::ByteList),
    ("GPS GPSLatitudeRef", 0x0001, ValueKind::ByteString),
    ("GPS GPSLatitude", 0x0002, ValueKind::RationalList),
    ("GPS GPSLongitudeRef", 0x0003, ValueKind::ByteString),
    ("GPS GPSLongitude", 0x0004, ValueKind::RationalList),
    ("GPS GPSAltitudeRef", 0x0005, ValueKind::ByteList),
    ("GPS GPSAltitude", 0x0006, ValueKind::Rational),
    ("GPS GPSTimeStamp", 0x0007, ValueKind::RationalList),
    ("GPS GPSSatellites", 0x0008, ValueKind::ByteString),
    ("GPS GPSSpeedRef", 0x000c, ValueKind::ByteString),
    ("GPS GPSSpeed", 0x000d, ValueKind::Rational),
    ("GPS GPSImgDirectionRef", 0x0010, ValueKind::ByteString),
    ("GPS GPSImgDirection", 0x0011, ValueKind::Rational),
    ("GPS GPSMapDatum", 0x0012, ValueKind::ByteString),
    ("GPS GPSDateStamp", 0x001d, ValueKind::ByteString),
    // Interoperability IFD
    ("Interoperability InteroperabilityIndex", 0x0001, ValueKind::ByteString),
    ("Interoperability InteroperabilityVersion", 0x0002, ValueKind::ByteList),
];

static TAG_MAPPING: LazyLock<HashMap<&'static str, (FieldId, ValueKind)>> = LazyLock::new(|| {
    TAG_TABLE
        .iter()
        .map(|&(name, id, kind)| (name, (id, kind)))
        .collect()
});

/// Look up a source tag name. `None` means the tag is not carried over.
pub fn lookup(name: &str) -> Option<(FieldId, ValueKind)> {
    TAG_MAPPING.get(name).copied()
}
