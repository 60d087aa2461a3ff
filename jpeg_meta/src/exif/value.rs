use jpeg_meta_types::exif::{
    Endianness,
    ifd::IfdGroup,
    primitives::{PrimitiveTy, Rational},
    tags::{EXIF_IFD_POINTER, GPS_IFD_POINTER, KnownTag},
};

use super::ifd::IfdWalker;
use crate::{
    Value,
    cursor::{ByteCursor, latin1},
    error::MetadataResult,
};

/// One raw 12-byte IFD entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) struct DirectoryEntry {
    pub tag_id: u16,
    pub format_code: u16,
    pub component_count: u32,

    /// The value itself when it fits in four bytes. Otherwise, the offset of
    /// the value from the start of the TIFF header.
    pub inline_or_offset: u32,
}

impl DirectoryEntry {
    /// Reads the entry starting at `offset`.
    pub(super) fn read(tiff: &ByteCursor<'_>, offset: usize) -> Option<Self> {
        Some(Self {
            tag_id: tiff.short_at(offset)?,
            format_code: tiff.short_at(offset + 2)?,
            component_count: tiff.long_at(offset + 4)?,
            inline_or_offset: tiff.long_at(offset + 8)?,
        })
    }
}

impl IfdWalker<'_, '_> {
    /// Decodes the entry at `entry_offset`, storing it if it's a known tag.
    ///
    /// Sub-IFD pointers are followed instead of stored.
    pub(super) fn decode_entry(
        &mut self,
        entry_offset: usize,
        group: IfdGroup,
    ) -> MetadataResult<()> {
        let Some(entry) = DirectoryEntry::read(&self.tiff, entry_offset) else {
            log::warn!("Couldn't read IFD entry at `{entry_offset}`. Skipping...");
            return Ok(());
        };

        log::trace!(
            "(field info...
    tag: {:#06x},
    format: {},
    count: {},
    value or offset: {}
)",
            entry.tag_id,
            entry.format_code,
            entry.component_count,
            entry.inline_or_offset
        );

        match entry.tag_id {
            EXIF_IFD_POINTER => return self.follow_pointer(&entry, IfdGroup::Exif),
            GPS_IFD_POINTER => return self.follow_pointer(&entry, IfdGroup::Gps),
            _ => (),
        }

        let Ok(tag) = KnownTag::try_from((group, entry.tag_id)) else {
            log::trace!("Tag `{:#06x}` isn't in the `{group:?}` dictionary.", entry.tag_id);
            return Ok(());
        };

        let Some(value) = decode_value(&self.tiff, &entry) else {
            log::trace!("Field `{tag:?}` had no value we could decode. Skipping...");
            return Ok(());
        };

        // a later IFD overwrites an earlier one's value
        self.values_for(group).insert(tag.tag_name().to_owned(), value);
        Ok(())
    }

    /// Walks the sub-IFD that a pointer entry points at.
    fn follow_pointer(&mut self, entry: &DirectoryEntry, group: IfdGroup) -> MetadataResult<()> {
        let Some(offset) = decode_value(&self.tiff, entry).and_then(|v| v.as_integer()) else {
            log::warn!("Pointer to `{group:?}` IFD had no usable offset. Skipping...");
            return Ok(());
        };
        let offset = offset as usize;

        if !self.can_descend_into(offset) {
            return Ok(());
        }

        log::trace!("Following pointer to `{group:?}` IFD at `{offset}`...");

        // sub-IFDs don't chain, so their next pointer means nothing
        self.walk(offset, group).map(|_| ())
    }
}

/// Decodes an entry's value.
///
/// Returns `None` for formats we don't decode, and for values that don't fit
/// in the TIFF structure.
pub(super) fn decode_value(tiff: &ByteCursor<'_>, entry: &DirectoryEntry) -> Option<Value> {
    let ty: PrimitiveTy = match PrimitiveTy::try_from(entry.format_code) {
        Ok(ty) if ty.is_decoded() => ty,
        Ok(ty) => {
            log::trace!("Not decoding `{ty:?}` values.");
            return None;
        }
        Err(()) => {
            log::warn!("Encountered unknown field type: `{}`", entry.format_code);
            return None;
        }
    };

    let count = entry.component_count as usize;

    // the four value bytes, in file order
    let endianness = tiff.endianness().unwrap_or(Endianness::Big);
    let inline_bytes: [u8; 4] = match endianness {
        Endianness::Big => entry.inline_or_offset.to_be_bytes(),
        Endianness::Little => entry.inline_or_offset.to_le_bytes(),
    };
    let inline = ByteCursor::new(&inline_bytes).with_endianness(endianness);

    match ty {
        PrimitiveTy::Ascii => {
            let text: &[u8] = if count <= 4 {
                // short strings take all four bytes, whatever the count says
                &inline_bytes
            } else {
                out_of_line(tiff, entry, count)?.as_slice()
            };

            Some(Value::Text(latin1(text)))
        }

        PrimitiveTy::Short => match count {
            1 => Some(Value::Integer(inline.short_at(0)?.into())),
            2 => Some(Value::IntegerList(vec![
                inline.short_at(0)?.into(),
                inline.short_at(2)?.into(),
            ])),
            _ => {
                log::trace!("Not decoding a list of `{count}` shorts.");
                None
            }
        },

        PrimitiveTy::Long => {
            let longs: Vec<u32> = match count {
                0 => return None,
                1 => vec![entry.inline_or_offset],
                _ => {
                    let data = out_of_line(tiff, entry, count.checked_mul(4)?)?;
                    (0..count)
                        .map(|i| data.long_at(i * 4))
                        .collect::<Option<Vec<u32>>>()?
                }
            };

            Some(Value::Text(join(longs)))
        }

        PrimitiveTy::Rational => {
            if count == 0 {
                return None;
            }

            // never inline, they're eight bytes each
            let data = out_of_line(tiff, entry, count.checked_mul(8)?)?;
            let rationals: Vec<Rational> = (0..count)
                .map(|i| {
                    Some(Rational {
                        numerator: data.long_at(i * 8)?,
                        denominator: data.long_at(i * 8 + 4)?,
                    })
                })
                .collect::<Option<Vec<Rational>>>()?;

            Some(Value::Rational(join(rationals)))
        }

        _ => None,
    }
}

/// Grabs `len` bytes at the entry's offset.
fn out_of_line<'a>(
    tiff: &ByteCursor<'a>,
    entry: &DirectoryEntry,
    len: usize,
) -> Option<ByteCursor<'a>> {
    let start = entry.inline_or_offset as usize;
    let data = start.checked_add(len).and_then(|end| tiff.slice(start, end));

    if data.is_none() {
        log::warn!(
            "Field said its data is stored outside the blob! \
            tag: `{:#06x}`, offset: `{start}`, len: `{len}`, blob len: `{}`",
            entry.tag_id,
            tiff.len()
        );
    }

    data
}

fn join<T: ToString>(items: Vec<T>) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
