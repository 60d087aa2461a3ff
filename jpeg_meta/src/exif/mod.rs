//! Exif is a media metadata format primarily used by cameras.
//!
//! In JPEG, it's stored in an APP1 segment: a six-byte `Exif\0\0` signature,
//! then a little TIFF structure. That structure starts with a header (byte
//! order, magic number, and the offset of IFD 0), followed by IFDs (Image
//! File Directories).
//!
//! Every offset inside the TIFF structure is relative to the start of its
//! header - not to the start of the file or the APP1 segment.

use jpeg_meta_types::exif::{Endianness, ifd::IfdGroup, tags::ExifIfdTag};

use crate::{
    Metadata, Value,
    cursor::ByteCursor,
    error::{MetadataError, MetadataResult},
};

use self::ifd::IfdWalker;

mod ifd;
mod value;

/// The signature at the start of an APP1 segment holding Exif.
const EXIF_SIG: &[u8] = b"Exif\0\0";

/// The TIFF magic number, `42`.
const TIFF_MAGIC_NUMBER: u16 = 0x002A;

/// `Compression` value saying the thumbnail is a JPEG.
const JPEG_COMPRESSION: u32 = 6;

/// Parses an APP1 payload, adding any Exif it holds to `metadata`.
///
/// APP1 is also used for other things (like XMP). Those payloads don't have
/// the Exif signature and are skipped.
pub(crate) fn parse_exif_segment(
    payload: ByteCursor<'_>,
    metadata: &mut Metadata,
) -> MetadataResult<()> {
    if payload.len() < 8 {
        log::error!("APP1 payload too short for Exif. len: `{}`", payload.len());
        return Err(MetadataError::ExifTooShort { len: payload.len() });
    }

    if !payload.as_slice().starts_with(EXIF_SIG) {
        log::trace!("APP1 payload isn't Exif. Skipping...");
        return Ok(());
    }
    log::trace!("Found Exif in JPEG!");

    // offsets are relative to the TIFF header, so cut the signature off
    let tiff = ByteCursor::new(payload.as_slice().get(EXIF_SIG.len()..).unwrap_or_default());
    if tiff.len() < 12 {
        log::error!("TIFF structure too short for an IFD. len: `{}`", tiff.len());
        return Err(MetadataError::IfdTooShort { len: tiff.len() });
    }

    // from here on out, we've got to account for the endianness of
    // everything
    let tiff = tiff.with_endianness(parse_blob_endianness(&tiff)?);

    // ensure we've got a TIFF marker (magic number)
    parse_tiff_magic_number(&tiff)?;

    // grab the offset where IFD 0 starts
    let ifd0_offset: u32 = parse_tiff_header_offset(&tiff)?;

    // IFD 0 tells us where the next one (the thumbnail's) is
    let mut walker = IfdWalker::new(tiff, metadata);
    let next_ifd_ptr = walker.walk(ifd0_offset as usize, IfdGroup::Exif)?;
    log::trace!("Completed first IFD! ptr: `{next_ifd_ptr}`");

    if next_ifd_ptr != 0 {
        log::trace!("At next IFD! index: `{next_ifd_ptr}`");
        walker.walk(next_ifd_ptr as usize, IfdGroup::Exif)?;
    }

    extract_thumbnail(&tiff, metadata);
    Ok(())
}

/// Finds the endianness of the TIFF structure.
fn parse_blob_endianness(tiff: &ByteCursor<'_>) -> MetadataResult<Endianness> {
    log::trace!("Grabbing BOM...");
    let found: [u8; 2] = [tiff.byte_at(0).unwrap_or(0), tiff.byte_at(1).unwrap_or(0)];

    match Endianness::from_marker(found) {
        Some(e) => {
            log::trace!("Found BOM: {e:?}");
            Ok(e)
        }

        // found a weird bom!
        None => {
            let e = MetadataError::InvalidByteOrder { found };
            log::error!("Couldn't parse out Exif! err: {e}");
            Err(e)
        }
    }
}

/// Ensures we're working with the correct kind of structure.
///
/// The cursor must already have its endianness set.
fn parse_tiff_magic_number(tiff: &ByteCursor<'_>) -> MetadataResult<()> {
    log::trace!("Checking magic number...");
    let magic_number: u16 = tiff.short_at(2).unwrap_or(0);

    if magic_number != TIFF_MAGIC_NUMBER {
        log::error!("Magic number wasn't for TIFF. got: `{magic_number}`");
        return Err(MetadataError::InvalidByteOrderMarker {
            found: magic_number,
        });
    }

    log::trace!("Magic number was good!");
    Ok(())
}

/// Grabs the offset of IFD 0 from the TIFF header.
fn parse_tiff_header_offset(tiff: &ByteCursor<'_>) -> MetadataResult<u32> {
    let offset: u32 = tiff.long_at(4).unwrap_or(u32::MAX);
    log::trace!("found offset: `{offset}`");

    // a JPEG segment can't be longer than this
    if offset > 0xFFFF {
        log::error!("Exif blob placed IFD 0 out of range! Can't continue parsing.");
        return Err(MetadataError::InvalidIfd0Offset { offset });
    }

    Ok(offset)
}

/// Copies out the thumbnail, if the Exif says there's a JPEG one.
fn extract_thumbnail(tiff: &ByteCursor<'_>, metadata: &mut Metadata) {
    let get = |tag: ExifIfdTag| metadata.exif.get(tag.tag_name()).and_then(Value::as_integer);

    if get(ExifIfdTag::Compression) != Some(JPEG_COMPRESSION) {
        return;
    }

    let (Some(offset), Some(size)) = (
        get(ExifIfdTag::ThumbnailOffset),
        get(ExifIfdTag::ThumbnailSize),
    ) else {
        log::trace!("JPEG thumbnail is missing its offset or size.");
        return;
    };

    let start = offset as usize;
    let thumbnail = start
        .checked_add(size as usize)
        .and_then(|end| tiff.slice(start, end));

    match thumbnail {
        Some(t) => {
            log::trace!("Found thumbnail! offset: `{offset}`, size: `{size}`");
            metadata.thumbnail = Some(t.as_slice().to_vec());
        }
        None => log::warn!(
            "Thumbnail lies outside the Exif blob. offset: `{offset}`, size: `{size}`, \
            blob len: `{}`",
            tiff.len()
        ),
    }
}
