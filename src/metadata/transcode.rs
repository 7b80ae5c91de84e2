//! Destination-taxonomy metadata: typed values, the five-group block,
//! and the transcoder itself.
//!
//! The transcoder is a data-driven table walk, not branching dispatch:
//! look the source name up in the [mapping table](super::mapping), route
//! by prefix, convert the atoms per the entry's [`ValueKind`], and store
//! into the keyed destination slot. Input order never affects the result;
//! the last tag written to a given slot wins.

use super::MetadataError;
use super::mapping::{self, FieldId, IfdGroup, ValueKind};
use super::reader::{Atom, RawTag};
use exif::experimental::Writer;
use exif::{Context, Field, In, Tag, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Cursor;

/// A converted destination value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IfdValue {
    Ascii(Vec<u8>),
    Byte(Vec<u8>),
    Long(u32),
    SLong(i32),
    Rational(u32, u32),
    SRational(i32, i32),
    RationalList(Vec<(u32, u32)>),
}

impl fmt::Display for IfdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IfdValue::Ascii(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            IfdValue::Byte(bytes) => {
                let parts: Vec<String> = bytes.iter().map(|b| b.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            IfdValue::Long(n) => write!(f, "{n}"),
            IfdValue::SLong(n) => write!(f, "{n}"),
            IfdValue::Rational(num, denom) => write!(f, "{num}/{denom}"),
            IfdValue::SRational(num, denom) => write!(f, "{num}/{denom}"),
            IfdValue::RationalList(pairs) => {
                let parts: Vec<String> =
                    pairs.iter().map(|(n, d)| format!("{n}/{d}")).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// The five destination groups together. Serializes to the EXIF blob the
/// output encoder embeds; an all-empty block means "attach nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataBlock {
    image: BTreeMap<FieldId, IfdValue>,
    exif: BTreeMap<FieldId, IfdValue>,
    gps: BTreeMap<FieldId, IfdValue>,
    interop: BTreeMap<FieldId, IfdValue>,
    thumbnail: BTreeMap<FieldId, IfdValue>,
}

impl MetadataBlock {
    /// True when no group holds any entry — the caller must then omit
    /// metadata attachment entirely rather than embed an empty blob.
    pub fn is_empty(&self) -> bool {
        self.groups().iter().all(|(_, entries)| entries.is_empty())
    }

    /// Total number of carried fields across all groups.
    pub fn field_count(&self) -> usize {
        self.groups().iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn group(&self, group: IfdGroup) -> &BTreeMap<FieldId, IfdValue> {
        match group {
            IfdGroup::Image => &self.image,
            IfdGroup::Exif => &self.exif,
            IfdGroup::Gps => &self.gps,
            IfdGroup::Interop => &self.interop,
            IfdGroup::Thumbnail => &self.thumbnail,
        }
    }

    fn group_mut(&mut self, group: IfdGroup) -> &mut BTreeMap<FieldId, IfdValue> {
        match group {
            IfdGroup::Image => &mut self.image,
            IfdGroup::Exif => &mut self.exif,
            IfdGroup::Gps => &mut self.gps,
            IfdGroup::Interop => &mut self.interop,
            IfdGroup::Thumbnail => &mut self.thumbnail,
        }
    }

    /// All groups in serialization order.
    pub fn groups(&self) -> [(IfdGroup, &BTreeMap<FieldId, IfdValue>); 5] {
        [
            (IfdGroup::Image, &self.image),
            (IfdGroup::Exif, &self.exif),
            (IfdGroup::Gps, &self.gps),
            (IfdGroup::Interop, &self.interop),
            (IfdGroup::Thumbnail, &self.thumbnail),
        ]
    }

    /// Serialize to the TIFF-structured blob the output encoder embeds.
    /// Only meaningful for non-empty blocks.
    pub fn to_exif_bytes(&self) -> Result<Vec<u8>, MetadataError> {
        let fields = self.to_fields();
        let mut writer = Writer::new();
        for field in &fields {
            writer.push_field(field);
        }
        let mut cursor = Cursor::new(Vec::new());
        writer.write(&mut cursor, false)?;
        Ok(cursor.into_inner())
    }

    fn to_fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        for (group, entries) in self.groups() {
            let context = match group {
                IfdGroup::Image | IfdGroup::Thumbnail => Context::Tiff,
                IfdGroup::Exif => Context::Exif,
                IfdGroup::Gps => Context::Gps,
                IfdGroup::Interop => Context::Interop,
            };
            let ifd_num = if group == IfdGroup::Thumbnail {
                In::THUMBNAIL
            } else {
                In::PRIMARY
            };
            for (&id, value) in entries {
                fields.push(Field {
                    tag: Tag(context, id),
                    ifd_num,
                    value: exif_value(value),
                });
            }
        }
        fields
    }
}

fn exif_value(value: &IfdValue) -> Value {
    match value {
        IfdValue::Ascii(bytes) => Value::Ascii(vec![bytes.clone()]),
        IfdValue::Byte(bytes) => Value::Byte(bytes.clone()),
        IfdValue::Long(n) => Value::Long(vec![*n]),
        IfdValue::SLong(n) => Value::SLong(vec![*n]),
        IfdValue::Rational(num, denom) => Value::Rational(vec![exif::Rational {
            num: *num,
            denom: *denom,
        }]),
        IfdValue::SRational(num, denom) => Value::SRational(vec![exif::SRational {
            num: *num,
            denom: *denom,
        }]),
        IfdValue::RationalList(pairs) => Value::Rational(
            pairs
                .iter()
                .map(|&(num, denom)| exif::Rational { num, denom })
                .collect(),
        ),
    }
}

/// Map recognized source tags into a destination block.
///
/// Unmapped names, unroutable names, and unconvertible values are all
/// skipped silently; partial carry-over is the contract.
pub fn transcode(raw_tags: &[RawTag]) -> MetadataBlock {
    let mut block = MetadataBlock::default();
    for tag in raw_tags {
        let Some((field_id, kind)) = mapping::lookup(&tag.name) else {
            continue;
        };
        let Some(group) = IfdGroup::for_tag_name(&tag.name) else {
            continue;
        };
        let Some(value) = convert(tag, kind) else {
            continue;
        };
        block.group_mut(group).insert(field_id, value);
    }
    block
}

fn convert(tag: &RawTag, kind: ValueKind) -> Option<IfdValue> {
    match kind {
        ValueKind::ByteString => {
            if tag.printable.is_empty() {
                None
            } else {
                Some(IfdValue::Ascii(tag.printable.clone().into_bytes()))
            }
        }
        ValueKind::SignedInteger => {
            let n = int_atom(tag.values.first()?)?;
            i32::try_from(n).ok().map(IfdValue::SLong)
        }
        ValueKind::UnsignedLong => {
            let n = int_atom(tag.values.first()?)?;
            u32::try_from(n).ok().map(IfdValue::Long)
        }
        ValueKind::Rational => {
            let (num, denom) = rational_atom(tag.values.first()?)?;
            unsigned_pair(num, denom).map(|(n, d)| IfdValue::Rational(n, d))
        }
        ValueKind::SignedRational => {
            let (num, denom) = rational_atom(tag.values.first()?)?;
            signed_pair(num, denom).map(|(n, d)| IfdValue::SRational(n, d))
        }
        ValueKind::RationalList => tag
            .values
            .iter()
            .map(|atom| {
                let (num, denom) = rational_atom(atom)?;
                unsigned_pair(num, denom)
            })
            .collect::<Option<Vec<_>>>()
            .map(IfdValue::RationalList),
        ValueKind::ByteList => tag
            .values
            .iter()
            .map(|atom| u8::try_from(int_atom(atom)?).ok())
            .collect::<Option<Vec<_>>>()
            .map(IfdValue::Byte),
    }
}

fn int_atom(atom: &Atom) -> Option<i64> {
    match atom {
        Atom::Int(n) => Some(*n),
        _ => None,
    }
}

/// An integer atom `n` is accepted as the rational `n/1`.
fn rational_atom(atom: &Atom) -> Option<(i64, i64)> {
    match atom {
        Atom::Rational(num, denom) => Some((*num, *denom)),
        Atom::Int(n) => Some((*n, 1)),
        Atom::Text(_) => None,
    }
}

fn unsigned_pair(num: i64, denom: i64) -> Option<(u32, u32)> {
    Some((u32::try_from(num).ok()?, u32::try_from(denom).ok()?))
}

fn signed_pair(num: i64, denom: i64) -> Option<(i32, i32)> {
    Some((i32::try_from(num).ok()?, i32::try_from(denom).ok()?))
}
