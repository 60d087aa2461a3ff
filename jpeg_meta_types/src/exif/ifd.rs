//! Contains stuff related to IFDs.
//!
//! For more info, see the [`IfdGroup`] enumeration.

/// An IFD group decides which dictionary a directory's tags are named from,
/// and which output map they end up in.
///
/// IFDs aren't self-describing in their group. IFD 0 (and the thumbnail
/// directory chained after it) hold TIFF-level tags, and IFD 0 contains
/// pointer tags giving the locations of the Exif and GPS sub-IFDs. Those
/// pointers are like links, not embeds.
///
/// TIFF-level tags and Exif sub-IFD tags share one namespace, so IFD 0 is
/// walked as [`IfdGroup::Exif`], too.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum IfdGroup {
    /// IFD 0, the thumbnail IFD, and the Exif sub-IFD.
    ///
    /// These provide camera-based metadata, like exposure information, plus
    /// the TIFF basics (orientation, resolution, thumbnail location).
    #[doc(alias = "IFD0")]
    #[doc(alias = "ExifIFD")]
    Exif,

    /// The GPS IFD contains location metadata.
    #[doc(alias = "GPSIFD")]
    Gps,
}

impl IfdGroup {
    /// The name of this group's namespace.
    ///
    /// ```
    /// use jpeg_meta_types::exif::ifd::IfdGroup;
    ///
    /// assert_eq!(IfdGroup::Exif.namespace(), "exif");
    /// assert_eq!(IfdGroup::Gps.namespace(), "gps");
    /// ```
    pub const fn namespace(&self) -> &'static str {
        match self {
            Self::Exif => "exif",
            Self::Gps => "gps",
        }
    }
}
