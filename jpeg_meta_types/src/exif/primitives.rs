/// An enumeration of the possible primitive types in an IFD entry.
///
/// Used in each IFD descriptor as its "format code".
#[repr(u16)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PrimitiveTy {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SByte = 6,
    Undefined = 7,
    SShort = 8,
    SLong = 9,
    SRational = 10,
    Float = 11,
    Double = 12,
    Utf8 = 129,
}

impl PrimitiveTy {
    /// Grabs the primitive type's size in bytes.
    ///
    /// ```
    /// use jpeg_meta_types::exif::primitives::PrimitiveTy;
    ///
    /// let slong: PrimitiveTy = PrimitiveTy::SLong;
    /// assert_eq!(slong.size_bytes(), 4_u8);
    /// ```
    pub const fn size_bytes(&self) -> u8 {
        match self {
            PrimitiveTy::Byte
            | PrimitiveTy::Ascii
            | PrimitiveTy::SByte
            | PrimitiveTy::Utf8
            | PrimitiveTy::Undefined => 1_u8,
            PrimitiveTy::Short | PrimitiveTy::SShort => 2_u8,
            PrimitiveTy::Long | PrimitiveTy::SLong | PrimitiveTy::Float => 4_u8,
            PrimitiveTy::Rational | PrimitiveTy::SRational | PrimitiveTy::Double => 8_u8,
        }
    }

    /// Whether values of this type are decoded at all.
    ///
    /// Only text, unsigned shorts, unsigned longs, and unsigned rationals
    /// are. Everything else is skipped without complaint.
    ///
    /// ```
    /// use jpeg_meta_types::exif::primitives::PrimitiveTy;
    ///
    /// assert!(PrimitiveTy::Rational.is_decoded());
    /// assert!(!PrimitiveTy::SRational.is_decoded());
    /// ```
    pub const fn is_decoded(&self) -> bool {
        matches!(
            self,
            PrimitiveTy::Ascii | PrimitiveTy::Short | PrimitiveTy::Long | PrimitiveTy::Rational
        )
    }
}

impl TryFrom<u16> for PrimitiveTy {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ascii),
            3 => Ok(Self::Short),
            4 => Ok(Self::Long),
            5 => Ok(Self::Rational),
            6 => Ok(Self::SByte),
            7 => Ok(Self::Undefined),
            8 => Ok(Self::SShort),
            9 => Ok(Self::SLong),
            10 => Ok(Self::SRational),
            11 => Ok(Self::Float),
            12 => Ok(Self::Double),
            129 => Ok(Self::Utf8),

            _ => Err(()),
        }
    }
}

/// A fraction that can't be negative.
///
/// Both the numerator (top number) and denominator (bottom number) are always
/// positive numbers.
///
/// Displays as `numerator/denominator`:
///
/// ```
/// use jpeg_meta_types::exif::primitives::Rational;
///
/// let r = Rational { numerator: 72, denominator: 1 };
/// assert_eq!(r.to_string(), "72/1");
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl core::fmt::Display for Rational {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
