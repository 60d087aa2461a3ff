use crate::{
    Metadata,
    cursor::ByteCursor,
    error::{MetadataError, MetadataResult},
    exif, iptc,
};

use super::frame;

/// The first marker code, `SOI` (start of image).
pub(super) const SOI_MARKER_CODE: u8 = 0xD8;

/// A marker code indicating that an APP1 marker is present.
const APP1_MARKER_CODE: u8 = 0xE1;

/// A marker code indicating that an APP13 marker is present.
const APP13_MARKER_CODE: u8 = 0xED;

/// Application segments use any marker code in here.
const APPN_MARKER_CODES: core::ops::RangeInclusive<u8> = 0xE0..=0xFE;

/// Checks whether the input starts with the JPEG `SOI` marker.
pub fn magic_number(input: &[u8]) -> bool {
    input.starts_with(&[0xFF, SOI_MARKER_CODE])
}

/// Attempts to parse a JPEG file.
pub fn parse(input: &[u8]) -> MetadataResult<Metadata> {
    // take first marker, which should be `SOI`
    if !magic_number(input) {
        log::error!(
            "The first marker of a JPEG file should be `SOI`, but it wasn't! got: `{:x?}`",
            input.get(..2)
        );
        return Err(MetadataError::InvalidFormat);
    }

    let mut metadata = Metadata::default();

    // dimensions live in the frame header, which may be anywhere. that's its
    // own pass over the file
    frame::locate_frame_header(ByteCursor::new(input), &mut metadata);

    let mut cursor = ByteCursor::new(input);
    cursor.seek(2);

    // loop over the application segments.
    //
    // they come right after `SOI`, so we stop at the first other marker
    while let Some((marker_code, payload)) = app_segment(&mut cursor) {
        match marker_code {
            APP1_MARKER_CODE => {
                log::trace!("Found APP1 segment. len: `{}`", payload.len());
                exif::parse_exif_segment(payload, &mut metadata)?;
            }

            APP13_MARKER_CODE => {
                log::trace!("Found APP13 segment. len: `{}`", payload.len());
                iptc::parse_iptc_segment(payload, &mut metadata);
            }

            other => {
                log::trace!("Skipping application segment with code `{other:x?}`.");
            }
        }
    }

    Ok(metadata)
}

/// Tries to take one application segment, returning its marker code and
/// payload.
///
/// Returns `None` when the next four bytes aren't an application segment
/// header, or when the segment doesn't fit in the input.
fn app_segment<'a>(cursor: &mut ByteCursor<'a>) -> Option<(u8, ByteCursor<'a>)> {
    let start = cursor.position();

    if cursor.byte_at(start)? != 0xFF {
        log::trace!("No marker at `{start}`. Done with application segments.");
        return None;
    }

    let marker_code = cursor.byte_at(start + 1)?;
    if !APPN_MARKER_CODES.contains(&marker_code) {
        log::trace!("Marker `{marker_code:x?}` isn't APPn. Done with application segments.");
        return None;
    }

    // the length includes its own two bytes
    let original_len: u16 = cursor.short_at(start + 2)?;
    let Some(len) = original_len.checked_sub(2) else {
        log::warn!(
            "Segment `{marker_code:x?}` had a length that becomes negative after \
            removing 2: `{original_len}`. Stopping."
        );
        return None;
    };

    let payload_start = start + 4;
    let payload_end = payload_start + len as usize;
    let Some(payload) = cursor.slice(payload_start, payload_end) else {
        log::warn!(
            "Not enough data left in input for payload. \
            marker code: `{marker_code:x?}`, payload len: `{len}` bytes, \
            remaining input len: `{}` bytes. Stopping.",
            cursor.len().saturating_sub(payload_start)
        );
        return None;
    };

    cursor.seek(payload_end);
    Some((marker_code, payload))
}

#[cfg(test)]
mod tests {
    use super::{app_segment, magic_number, parse};
    use crate::{cursor::ByteCursor, error::MetadataError, util::logger};

    #[test]
    fn rejects_missing_soi() {
        logger();

        assert_eq!(parse(&[]), Err(MetadataError::InvalidFormat));
        assert_eq!(parse(&[0xFF]), Err(MetadataError::InvalidFormat));
        assert_eq!(
            parse(&[0xFF, 0xD9, 0xFF, 0xD8]),
            Err(MetadataError::InvalidFormat)
        );
        assert!(magic_number(&[0xFF, 0xD8]));
    }

    #[test]
    fn bare_soi_is_empty_metadata() {
        logger();

        let parsed = parse(&[0xFF, 0xD8]).unwrap();
        assert_eq!(parsed, crate::Metadata::default());
    }

    #[test]
    fn takes_app_segments_until_another_marker() {
        logger();

        let bytes = [
            0xFF, 0xE0, 0x00, 0x04, b'J', b'F', // APP0, 2 payload bytes
            0xFF, 0xFE, 0x00, 0x03, b'!', // COM counts as APPn here
            0xFF, 0xDB, 0x00, 0x02, // DQT ends it
        ];
        let mut cursor = ByteCursor::new(&bytes);

        let (code, payload) = app_segment(&mut cursor).unwrap();
        assert_eq!(code, 0xE0);
        assert_eq!(payload.as_slice(), b"JF");

        let (code, payload) = app_segment(&mut cursor).unwrap();
        assert_eq!(code, 0xFE);
        assert_eq!(payload.as_slice(), b"!");

        assert_eq!(app_segment(&mut cursor), None);
        assert_eq!(cursor.position(), 11, "should stay on the DQT marker");
    }

    #[test]
    fn truncated_or_short_segments_stop_the_scan() {
        logger();

        // declares 16 payload bytes, but has 1
        let mut c = ByteCursor::new(&[0xFF, 0xE1, 0x00, 0x12, 0x00]);
        assert_eq!(app_segment(&mut c), None);

        // declared length can't be below 2
        let mut c = ByteCursor::new(&[0xFF, 0xE1, 0x00, 0x01]);
        assert_eq!(app_segment(&mut c), None);

        // and the whole parse still succeeds
        let parsed = parse(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x12, 0x00]);
        assert_eq!(parsed, Ok(crate::Metadata::default()));
    }

    #[test]
    fn app1_without_exif_signature_is_skipped() {
        logger();

        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
        let payload = b"http://ns.adobe.com/xap/1.0/\0<x/>";
        bytes.extend_from_slice(&(payload.len() as u16 + 2).to_be_bytes());
        bytes.extend_from_slice(payload);

        let parsed = parse(&bytes).unwrap();
        assert!(parsed.exif.is_empty());
    }
}
