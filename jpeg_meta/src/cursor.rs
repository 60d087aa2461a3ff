//! A read-only view over a range of bytes.
//!
//! JPEG segments and the TIFF structure inside Exif are both addressed by
//! offsets, so most reads here are random-access. Sequential reads (which
//! advance the cursor's position) are only used while scanning.

use jpeg_meta_types::exif::Endianness;
use winnow::{
    Parser as _,
    binary::{Endianness as WinnowEndianness, u16, u32},
    error::EmptyError,
};

/// An immutable, endian-aware view of some bytes.
///
/// Endianness is decided once per TIFF structure and applies to every
/// multi-byte read against it. When it's undetermined (`None`), reads are
/// big-endian, like the JPEG format itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    endianness: Option<Endianness>,
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor over `data` with an undetermined endianness.
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            endianness: None,
            position: 0,
        }
    }

    /// Fixes the endianness used by multi-byte reads.
    pub const fn with_endianness(self, endianness: Endianness) -> Self {
        Self {
            endianness: Some(endianness),
            ..self
        }
    }

    /// The endianness of this cursor, if it's been decided.
    pub const fn endianness(&self) -> Option<Endianness> {
        self.endianness
    }

    /// The number of bytes in view.
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no bytes in view at all.
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The bytes in view.
    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Where the next sequential read will happen.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Moves the sequential read position.
    ///
    /// Moving past the end is allowed; reads from there return `None`.
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Bytes left between the position and the end.
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Consumes one byte, or returns `None` at the end of the data.
    pub fn next_byte(&mut self) -> Option<u8> {
        let b = self.data.get(self.position).copied()?;
        self.position += 1;
        Some(b)
    }

    /// Reads the byte at `offset`.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Reads the 16-bit unsigned integer at `offset`.
    pub fn short_at(&self, offset: usize) -> Option<u16> {
        let mut input: &[u8] = self.data.get(offset..)?;
        u16(self.winnow_endianness())
            .parse_next(&mut input)
            .map_err(|_: EmptyError| ())
            .ok()
    }

    /// Reads the 32-bit unsigned integer at `offset`.
    pub fn long_at(&self, offset: usize) -> Option<u32> {
        let mut input: &[u8] = self.data.get(offset..)?;
        u32(self.winnow_endianness())
            .parse_next(&mut input)
            .map_err(|_: EmptyError| ())
            .ok()
    }

    /// Creates a new cursor over `[start, end)`, keeping this endianness.
    ///
    /// The new cursor's offsets are relative to `start`. Returns `None` if
    /// the range isn't inside this cursor.
    pub fn slice(&self, start: usize, end: usize) -> Option<ByteCursor<'a>> {
        Some(ByteCursor {
            data: self.data.get(start..end)?,
            endianness: self.endianness,
            position: 0,
        })
    }

    fn winnow_endianness(&self) -> WinnowEndianness {
        match self.endianness {
            Some(Endianness::Little) => WinnowEndianness::Little,
            Some(Endianness::Big) | None => WinnowEndianness::Big,
        }
    }
}

/// Maps each byte to the character with the same code point, dropping NULs.
///
/// Both Exif and IPTC text go through this.
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|b| **b != 0)
        .map(|b| char::from(*b))
        .collect()
}

#[cfg(test)]
mod tests {
    use jpeg_meta_types::exif::Endianness;

    use super::{ByteCursor, latin1};

    #[test]
    fn reads_honor_endianness() {
        let bytes = [0x12_u8, 0x34, 0x56, 0x78];

        let be = ByteCursor::new(&bytes).with_endianness(Endianness::Big);
        let le = ByteCursor::new(&bytes).with_endianness(Endianness::Little);
        let undetermined = ByteCursor::new(&bytes);

        assert_eq!(be.short_at(0), Some(0x1234));
        assert_eq!(le.short_at(0), Some(0x3412));
        assert_eq!(undetermined.short_at(2), Some(0x5678));

        assert_eq!(be.long_at(0), Some(0x1234_5678));
        assert_eq!(le.long_at(0), Some(0x7856_3412));
    }

    #[test]
    fn reads_past_the_end_are_none() {
        let bytes = [0xFF_u8, 0xFF, 0xFF];
        let c = ByteCursor::new(&bytes);

        assert_eq!(c.byte_at(2), Some(0xFF));
        assert_eq!(c.byte_at(3), None);
        assert_eq!(c.short_at(2), None);
        assert_eq!(c.long_at(0), None);
        assert_eq!(c.long_at(usize::MAX), None);

        // values are unsigned, even with the high bit set
        assert_eq!(c.short_at(0), Some(u16::MAX));
    }

    #[test]
    fn sequential_reads_advance_but_random_reads_dont() {
        let bytes = [1_u8, 2, 3];
        let mut c = ByteCursor::new(&bytes);

        assert_eq!(c.byte_at(1), Some(2));
        assert_eq!(c.position(), 0);

        assert_eq!(c.next_byte(), Some(1));
        assert_eq!(c.next_byte(), Some(2));
        assert_eq!(c.remaining(), 1);
        assert_eq!(c.next_byte(), Some(3));
        assert_eq!(c.next_byte(), None);
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn slices_are_relative_and_keep_endianness() {
        let bytes = [0_u8, 0, 0x01, 0x00, 0xAA];
        let c = ByteCursor::new(&bytes).with_endianness(Endianness::Little);

        let sub = c.slice(2, 4).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.endianness(), Some(Endianness::Little));
        assert_eq!(sub.short_at(0), Some(1));
        assert_eq!(sub.byte_at(2), None, "slice must not see past its end");

        assert!(c.slice(3, 6).is_none());
        assert!(c.slice(4, 2).is_none());
        assert_eq!(c.slice(5, 5).map(|s| s.len()), Some(0));
    }

    #[test]
    fn latin1_drops_nuls() {
        assert_eq!(latin1(b"A\0B\0\0"), "AB");
        assert_eq!(latin1(&[0x43, 0x61, 0x66, 0xE9]), "Caf\u{e9}");
        assert_eq!(latin1(&[0, 0, 0, 0]), "");
    }
}
