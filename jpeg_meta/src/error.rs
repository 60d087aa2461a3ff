/// This type describes the parsing result.
///
/// If it's the `Err` variant, the parsing failed completely, and you aren't
/// getting any metadata at all.
///
/// `Ok` means that parsing succeeded, though units of metadata that were
/// malformed may have been skipped along the way.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// A fatal error. When one of these happens, the whole parse is abandoned.
///
/// Anything that isn't listed here (unknown tags, odd value formats,
/// truncated IPTC records, ...) is skipped instead.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum MetadataError {
    /// The first two bytes weren't the JPEG start-of-image marker, `FF D8`.
    InvalidFormat,

    /// An APP1 payload was too short to hold an Exif signature and header.
    ExifTooShort {
        /// Length of the APP1 payload.
        len: usize,
    },

    /// The TIFF structure inside an Exif payload was too short to hold a
    /// header and a directory.
    IfdTooShort {
        /// Length of the TIFF structure.
        len: usize,
    },

    /// The byte order marker was weird - it's not one of the two expected
    /// values (in ASCII, should be either `II` or `MM`).
    InvalidByteOrder {
        /// The two bytes found instead.
        found: [u8; 2],
    },

    /// The TIFF magic number (`42`) wasn't where the byte order said it'd be.
    InvalidByteOrderMarker {
        /// The value read instead.
        found: u16,
    },

    /// The offset to the first IFD is larger than any JPEG segment could be.
    InvalidIfd0Offset {
        /// The offset we were given.
        offset: u32,
    },

    /// An IFD said it had zero entries, or its entry count couldn't be read.
    CorruptIfd {
        /// Where the IFD was supposed to start, relative to the TIFF header.
        offset: usize,
    },
}

impl core::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidFormat => f.write_str(
                "Not a JPEG file: the first marker should be SOI (`FF D8`).",
            ),
            Self::ExifTooShort { len } => write!(
                f,
                "APP1 payload is too short to contain Exif. len: `{len}` bytes"
            ),
            Self::IfdTooShort { len } => write!(
                f,
                "TIFF structure is too short to contain an IFD. len: `{len}` bytes"
            ),
            Self::InvalidByteOrder { found } => match core::str::from_utf8(found.as_slice()) {
                Ok(found_utf8_bom) => {
                    write!(f, "Got a weird byte-order marker: `{found_utf8_bom}`")
                }
                Err(_) => write!(f, "Got a weird byte-order marker - wasn't ASCII: {found:?}"),
            },
            Self::InvalidByteOrderMarker { found } => {
                write!(f, "Magic number was not TIFF! got: `{found}`")
            }
            Self::InvalidIfd0Offset { offset } => {
                write!(f, "Offset to IFD 0 is out of range. got: `{offset}`")
            }
            Self::CorruptIfd { offset } => write!(
                f,
                "The IFD at offset `{offset}` had zero fields (or none could be read), \
                which is invalid."
            ),
        }
    }
}

impl core::error::Error for MetadataError {}
