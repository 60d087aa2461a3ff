//! Finds the image's dimensions.
//!
//! These live in the start-of-frame (`SOF`) header, which usually comes after
//! the metadata segments and tables. This pass walks every marker in the file
//! from the very start until it finds one.

use crate::{Metadata, cursor::ByteCursor};

/// Start-of-frame marker codes we recognize.
///
/// `0xC4` (DHT), `0xC8` (JPG), and `0xCC` (DAC) sit in the same range but
/// aren't frame headers.
const SOF_MARKER_CODES: [u8; 12] = [
    0xC0, 0xC1, 0xC2, 0xC3, // huffman
    0xC5, 0xC6, 0xC7, // differential huffman
    0xC9, 0xCA, 0xCB, // arithmetic
    0xCD, 0xCE, // differential arithmetic
];

/// Markers without a length or payload.
const STANDALONE_MARKERS: &[u8] = &[
    0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0x01,
];

/// Scans for the first frame header, storing its height and width.
///
/// Leaves the dimensions alone if there's no frame header.
pub(super) fn locate_frame_header(mut cursor: ByteCursor<'_>, metadata: &mut Metadata) {
    loop {
        // skip ahead to the next marker
        let Some(b) = cursor.next_byte() else {
            log::trace!("Reached the end without finding a frame header.");
            return;
        };
        if b != 0xFF {
            continue;
        }

        // a marker may have any number of `0xFF` fill bytes before its code
        let marker_code: u8 = loop {
            match cursor.next_byte() {
                Some(0xFF) => continue,
                Some(k) => break k,
                None => {
                    log::trace!("Input ended inside a marker.");
                    return;
                }
            }
        };

        // `FF 00` is a stuffed byte inside entropy-coded data, not a marker
        if marker_code == 0x00 || STANDALONE_MARKERS.contains(&marker_code) {
            continue;
        }

        let len_start = cursor.position();
        let Some(len) = cursor.short_at(len_start) else {
            log::trace!("Marker `{marker_code:x?}` had no length. Stopping.");
            return;
        };

        if SOF_MARKER_CODES.contains(&marker_code) {
            let precision = cursor.byte_at(len_start + 2);
            let height = cursor.short_at(len_start + 3);
            let width = cursor.short_at(len_start + 5);

            match (height, width) {
                (Some(height), Some(width)) => {
                    log::trace!(
                        "Found frame header `{marker_code:x?}`! \
                        precision: `{precision:?}`, height: `{height}`, width: `{width}`"
                    );
                    metadata.image_height = Some(u32::from(height));
                    metadata.image_width = Some(u32::from(width));
                }
                _ => log::warn!("Frame header `{marker_code:x?}` was cut short."),
            }

            return;
        }

        // the length includes its own two bytes, so this lands on the byte
        // right after the payload
        cursor.seek(len_start + len as usize);
    }
}

#[cfg(test)]
mod tests {
    use super::locate_frame_header;
    use crate::{Metadata, cursor::ByteCursor, util::logger};

    fn sof(code: u8, height: u16, width: u16) -> Vec<u8> {
        let mut v = vec![0xFF, code, 0x00, 0x11, 0x08];
        v.extend_from_slice(&height.to_be_bytes());
        v.extend_from_slice(&width.to_be_bytes());
        v.extend_from_slice(&[0x03; 10]); // components
        v
    }

    #[test]
    fn finds_sof_after_other_segments() {
        logger();

        let mut bytes = vec![0xFF, 0xD8]; // SOI
        bytes.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x04, 0xFF, 0xC0]); // APP0 with a fake marker inside
        bytes.extend_from_slice(&[0xFF, 0xFF, 0xDB, 0x00, 0x03, 0x00]); // fill byte + DQT
        bytes.extend(sof(0xC2, 480, 640));

        let mut metadata = Metadata::default();
        locate_frame_header(ByteCursor::new(&bytes), &mut metadata);

        assert_eq!(metadata.image_height, Some(480));
        assert_eq!(metadata.image_width, Some(640));
    }

    #[test]
    fn first_frame_header_wins() {
        logger();

        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend(sof(0xC0, 10, 20));
        bytes.extend(sof(0xC1, 30, 40));

        let mut metadata = Metadata::default();
        locate_frame_header(ByteCursor::new(&bytes), &mut metadata);

        assert_eq!(
            (metadata.image_width, metadata.image_height),
            (Some(20), Some(10))
        );
    }

    #[test]
    fn huffman_tables_are_not_frames() {
        logger();

        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend(sof(0xC4, 10, 20)); // DHT, same shape as a frame header

        let mut metadata = Metadata::default();
        locate_frame_header(ByteCursor::new(&bytes), &mut metadata);

        assert_eq!(metadata.image_width, None);
        assert_eq!(metadata.image_height, None);
    }

    #[test]
    fn truncated_frame_header_leaves_dimensions_absent() {
        logger();

        let bytes = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x01];

        let mut metadata = Metadata::default();
        locate_frame_header(ByteCursor::new(&bytes), &mut metadata);

        assert_eq!(metadata, Metadata::default());
    }
}
