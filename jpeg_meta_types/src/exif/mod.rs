//! Types describing Exif directories and the values stored inside them.

pub mod ifd;
pub mod primitives;
pub mod tags;

/// Each blob of Exif will start with a byte order marker - its endianness.
///
/// It's either `II` (Intel, for little-endian) or `MM` (Motorola, for
/// big-endian).
///
/// The marker applies to every multi-byte read inside the TIFF structure
/// that follows it, so it's decided once and kept around.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Endianness {
    /// `II` for Intel, little-endian.
    Little,

    /// `MM` for Motorola. Big-endian.
    Big,
}

impl Endianness {
    /// Maps the two byte order marker bytes to an endianness.
    ///
    /// ```
    /// use jpeg_meta_types::exif::Endianness;
    ///
    /// assert_eq!(Endianness::from_marker(*b"II"), Some(Endianness::Little));
    /// assert_eq!(Endianness::from_marker(*b"MM"), Some(Endianness::Big));
    /// assert_eq!(Endianness::from_marker(*b"XX"), None);
    /// ```
    pub const fn from_marker(marker: [u8; 2]) -> Option<Self> {
        match marker {
            [b'I', b'I'] => Some(Self::Little),
            [b'M', b'M'] => Some(Self::Big),
            _ => None,
        }
    }
}
