//! IPTC IIM, stored in JPEG's APP13 segment.
//!
//! The segment is usually a Photoshop resource block wrapping the IIM
//! datasets. We don't read the resource block at all: we just look for the
//! first thing that looks like a dataset and go from there.
//!
//! Each dataset is laid out as:
//!
//! - `0x1C` tag marker
//! - record number
//! - dataset number
//! - data length: either two bytes, or (when the high bit is set) an
//!   "extended" length, where the two bytes say how many bytes the real
//!   length takes up
//! - data

use std::collections::btree_map::Entry;

use jpeg_meta_types::iptc::IptcKey;

use crate::{
    IptcValue, Metadata,
    cursor::{ByteCursor, latin1},
};

/// Starts each dataset.
const TAG_MARKER: u8 = 0x1C;

/// Record numbers are always below this.
const MAX_RECORD: u8 = 0x0F;

/// The widest extended length we can hold.
const MAX_LENGTH_OF_LENGTH: usize = 8;

/// Parses an APP13 payload, adding any IPTC datasets we know to `metadata`.
///
/// Nothing here is fatal. Malformed data just stops parsing, keeping
/// whatever was already found.
pub(crate) fn parse_iptc_segment(payload: ByteCursor<'_>, metadata: &mut Metadata) {
    let Some(start) = find_first_dataset(&payload) else {
        log::trace!("APP13 segment had no IPTC datasets.");
        return;
    };
    log::trace!("Found IPTC in JPEG! first dataset at: `{start}`");

    let mut pos = start;
    while let Some((key, data, next)) = dataset(&payload, pos) {
        pos = next;

        let Some(name) = key.tag_name() else {
            log::trace!("Skipping unknown IPTC dataset `{key}`.");
            continue;
        };

        let value: String = latin1(data);
        log::trace!("Found IPTC dataset `{key}` ({name}): `{value}`");

        match metadata.iptc.entry(name.to_owned()) {
            Entry::Vacant(v) => {
                v.insert(IptcValue::Single(value));
            }
            Entry::Occupied(mut o) => o.get_mut().push(value),
        }
    }

    log::trace!("Done parsing IPTC.");
}

/// Finds the first tag marker followed by a valid record number.
fn find_first_dataset(payload: &ByteCursor<'_>) -> Option<usize> {
    payload
        .as_slice()
        .windows(2)
        .position(|w| w[0] == TAG_MARKER && w[1] < MAX_RECORD)
}

/// Reads the dataset at `pos`, returning its key, its data, and where the
/// next dataset starts.
///
/// Returns `None` when there isn't a well-formed dataset there.
fn dataset<'a>(payload: &ByteCursor<'a>, pos: usize) -> Option<(IptcKey, &'a [u8], usize)> {
    if payload.byte_at(pos)? != TAG_MARKER {
        log::trace!("No IPTC tag marker at `{pos}`. Stopping.");
        return None;
    }

    // record, dataset, and two length bytes
    if payload.len() < pos + 5 {
        log::warn!("IPTC dataset at `{pos}` was cut short. Stopping.");
        return None;
    }

    let key = IptcKey {
        record: payload.byte_at(pos + 1)?,
        dataset: payload.byte_at(pos + 2)?,
    };
    let raw_len: u16 = payload.short_at(pos + 3)?;
    let mut data_start = pos + 5;

    let data_len: usize = if raw_len & 0x8000 != 0 {
        let length_of_length = usize::from(raw_len & 0x7FFF);

        if length_of_length > MAX_LENGTH_OF_LENGTH {
            log::warn!(
                "IPTC dataset `{key}` has a `{length_of_length}`-byte length. \
                That's too large to use. Stopping."
            );
            return None;
        }

        let Some(len_bytes) = payload.slice(data_start, data_start + length_of_length) else {
            log::warn!("IPTC dataset `{key}`'s extended length runs past the segment. Stopping.");
            return None;
        };
        data_start += length_of_length;

        // big-endian
        let len: u64 = len_bytes
            .as_slice()
            .iter()
            .fold(0_u64, |acc, b| (acc << 8) | u64::from(*b));
        usize::try_from(len).ok()?
    } else {
        usize::from(raw_len)
    };

    let data_end = data_start.checked_add(data_len)?;
    let Some(data) = payload.slice(data_start, data_end) else {
        log::warn!(
            "IPTC dataset `{key}`'s data runs past the segment. \
            len: `{data_len}`, remaining: `{}`. Stopping.",
            payload.len().saturating_sub(data_start)
        );
        return None;
    };

    Some((key, data.as_slice(), data_end))
}

#[cfg(test)]
mod tests {
    use super::parse_iptc_segment;
    use crate::{IptcValue, Metadata, cursor::ByteCursor, util::logger};

    fn dataset(record: u8, dataset: u8, data: &[u8]) -> Vec<u8> {
        let mut v = vec![0x1C, record, dataset];
        v.extend_from_slice(&(data.len() as u16).to_be_bytes());
        v.extend_from_slice(data);
        v
    }

    fn parse(payload: &[u8]) -> Metadata {
        let mut metadata = Metadata::default();
        parse_iptc_segment(ByteCursor::new(payload), &mut metadata);
        metadata
    }

    #[test]
    fn keywords_accumulate() {
        logger();

        let mut payload = b"Photoshop 3.0\08BIM\x04\x04\0\0\0\0\0\x20".to_vec();
        payload.extend(dataset(2, 25, b"a"));
        payload.extend(dataset(2, 25, b"b"));
        payload.extend(dataset(2, 120, b"A caption\0"));

        let metadata = parse(&payload);
        assert_eq!(
            metadata.iptc.get("Keywords"),
            Some(&IptcValue::List(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            metadata.iptc.get("Caption"),
            Some(&IptcValue::Single("A caption".into()))
        );
    }

    #[test]
    fn unknown_datasets_are_skipped() {
        logger();

        let mut payload = dataset(1, 90, b"\x1b%G");
        payload.extend(dataset(2, 0, &[0, 4]));
        payload.extend(dataset(2, 5, b"Title"));

        let metadata = parse(&payload);
        assert_eq!(metadata.iptc.len(), 1);
        assert_eq!(
            metadata.iptc.get("ObjectName"),
            Some(&IptcValue::Single("Title".into()))
        );
    }

    #[test]
    fn extended_lengths() {
        logger();

        // 0x8002: the length takes up the next two bytes
        let mut payload = vec![0x1C, 2, 120, 0x80, 0x02, 0x00, 0x03];
        payload.extend_from_slice(b"abc");
        payload.extend(dataset(2, 5, b"next"));

        let metadata = parse(&payload);
        assert_eq!(
            metadata.iptc.get("Caption"),
            Some(&IptcValue::Single("abc".into()))
        );
        assert_eq!(
            metadata.iptc.get("ObjectName"),
            Some(&IptcValue::Single("next".into()))
        );

        // the length bytes themselves run past the segment
        let mut payload = dataset(2, 25, b"kept");
        payload.extend_from_slice(&[0x1C, 2, 120, 0x80, 0x04, 0x00]);

        let metadata = parse(&payload);
        assert_eq!(metadata.iptc.len(), 1);
        assert_eq!(
            metadata.iptc.get("Keywords"),
            Some(&IptcValue::Single("kept".into()))
        );

        // 9 length bytes is too many
        let payload = [0x1C, 2, 120, 0x80, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 1, b'x'];
        assert!(parse(&payload).iptc.is_empty());
    }

    #[test]
    fn overruns_keep_earlier_datasets() {
        logger();

        let mut payload = dataset(2, 25, b"kept");
        payload.extend_from_slice(&[0x1C, 2, 25, 0x00, 0x10, b'x']);

        let metadata = parse(&payload);
        assert_eq!(
            metadata.iptc.get("Keywords"),
            Some(&IptcValue::Single("kept".into()))
        );

        // cut off inside the length
        let mut payload = dataset(2, 5, b"kept");
        payload.extend_from_slice(&[0x1C, 2, 25, 0x00]);
        assert_eq!(parse(&payload).iptc.len(), 1);
    }

    #[test]
    fn stops_at_junk() {
        logger();

        let mut payload = dataset(2, 5, b"one");
        payload.push(0x00);
        payload.extend(dataset(2, 120, b"never read"));

        let metadata = parse(&payload);
        assert_eq!(metadata.iptc.len(), 1);
        assert!(metadata.iptc.contains_key("ObjectName"));
    }

    #[test]
    fn no_datasets() {
        logger();

        assert!(parse(b"Photoshop 3.0\0").iptc.is_empty());
        assert!(parse(&[0x1C, 0x0F, 0x1C]).iptc.is_empty(), "0x0F isn't a record");
        assert!(parse(&[]).iptc.is_empty());
    }
}
