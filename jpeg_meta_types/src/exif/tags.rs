//! Definitions for tags in an IFD group.
//!
//! # `tags`
//!
//! Contains the tag dictionary for each [`IfdGroup`]: a mapping from a tag's
//! numeric ID to its canonical name.
//!
//! Tags missing from a dictionary aren't reported by the decoder at all, so
//! adding a tag here is all it takes to surface it.
//!
//! ## Adding new tags
//!
//! Let's say we want to add a new tag to `IfdGroup::Gps`. Let's call it
//! `YourNewKey`, with a tag ID of `0x0099`.
//!
//! Under the `make_key_list_for_group` macro for `IfdGroup::Gps`, add a new
//! listing:
//!
//! ```no_compile
//! make_key_list_for_group!(enum GpsIfdTag => IfdGroup::Gps,
//!     // ...snip!
//!     YourNewKey = 0x0099 => "YourNewKey",
//! );
//! ```

use crate::exif::ifd::IfdGroup;

/// Tag ID of the pointer to the Exif sub-IFD.
///
/// It's never stored as a value. Instead, the directory it points at is
/// walked in [`IfdGroup::Exif`].
pub const EXIF_IFD_POINTER: u16 = 0x8769;

/// Tag ID of the pointer to the GPS sub-IFD.
///
/// It's never stored as a value. Instead, the directory it points at is
/// walked in [`IfdGroup::Gps`].
pub const GPS_IFD_POINTER: u16 = 0x8825;

/// Creates a "key list" for an IFD group.
macro_rules! make_key_list_for_group {
    (enum $enum_name:ident => $ifd_group:expr,
        $( $key_ident:ident = $key_tag:literal => $tag_name:literal, )+
    ) => {
        #[doc = "A list of all keys present in the matching `IfdGroup` variant."]
        #[repr(u16)]
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
        pub enum $enum_name {
            $(
              $key_ident = $key_tag,
            )+
        }

        impl $enum_name {
            /// Returns the `IfdGroup` that this enum represents.
            pub const fn ifd_group() -> IfdGroup {
                $ifd_group
            }

            /// Returns this key's tag ID.
            pub const fn tag_id(&self) -> u16 {
                *self as u16
            }

            /// Grabs a key's canonical tag name.
            pub const fn tag_name(&self) -> &'static str {
                match self {
                    $( Self::$key_ident => $tag_name, )+
                }
            }
        }

        impl core::convert::TryFrom<u16> for $enum_name {
            type Error = ();

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $( $key_tag => Ok($enum_name::$key_ident), )+
                    _ => Err(()),
                }
            }
        }
    }
}

/// A set of all known tags and their IFD groups.
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum KnownTag {
    ExifIfdTag(ExifIfdTag),
    GpsIfdTag(GpsIfdTag),
}

impl KnownTag {
    /// Returns the `IfdGroup` that this tag belongs to.
    ///
    /// ```
    /// use jpeg_meta_types::exif::{tags::{KnownTag, GpsIfdTag}, ifd::IfdGroup};
    ///
    /// let lat: KnownTag = KnownTag::GpsIfdTag(GpsIfdTag::GpsLatitude);
    /// assert_eq!(lat.ifd_group(), IfdGroup::Gps);
    /// ```
    pub const fn ifd_group(self) -> IfdGroup {
        match self {
            KnownTag::ExifIfdTag(_) => ExifIfdTag::ifd_group(),
            KnownTag::GpsIfdTag(_) => GpsIfdTag::ifd_group(),
        }
    }

    /// Returns this tag's tag ID.
    ///
    /// ```
    /// use jpeg_meta_types::exif::tags::{KnownTag, ExifIfdTag};
    ///
    /// let orientation: KnownTag = KnownTag::ExifIfdTag(ExifIfdTag::Orientation);
    /// assert_eq!(orientation.tag_id(), 0x0112_u16);
    /// ```
    pub const fn tag_id(&self) -> u16 {
        match self {
            KnownTag::ExifIfdTag(k) => *k as u16,
            KnownTag::GpsIfdTag(k) => *k as u16,
        }
    }

    /// Grabs a tag's canonical name.
    ///
    /// ```
    /// use jpeg_meta_types::exif::tags::{KnownTag, ExifIfdTag};
    ///
    /// let orientation: KnownTag = KnownTag::ExifIfdTag(ExifIfdTag::Orientation);
    /// assert_eq!(orientation.tag_name(), "Orientation");
    /// ```
    pub const fn tag_name(&self) -> &'static str {
        match self {
            KnownTag::ExifIfdTag(k) => k.tag_name(),
            KnownTag::GpsIfdTag(k) => k.tag_name(),
        }
    }
}

impl TryFrom<(IfdGroup, u16)> for KnownTag {
    type Error = ();

    /// Looks up a tag ID in the dictionary of the given group.
    ///
    /// ```
    /// use jpeg_meta_types::exif::{ifd::IfdGroup, tags::KnownTag};
    ///
    /// let found = KnownTag::try_from((IfdGroup::Gps, 0x0002_u16)).unwrap();
    /// assert_eq!(found.tag_name(), "GPSLatitude");
    ///
    /// // unknown in this group
    /// assert!(KnownTag::try_from((IfdGroup::Gps, 0x0112_u16)).is_err());
    /// ```
    fn try_from(value: (IfdGroup, u16)) -> Result<Self, Self::Error> {
        let (ifd_group, tag_id): (IfdGroup, u16) = value;

        match ifd_group {
            IfdGroup::Exif => ExifIfdTag::try_from(tag_id).map(KnownTag::ExifIfdTag),
            IfdGroup::Gps => GpsIfdTag::try_from(tag_id).map(KnownTag::GpsIfdTag),
        }
    }
}

/*
 *
 *
 *
 *  TIFF Rev. 6.0 + Exif attribute list
 *
 *  IFD 0, the thumbnail IFD, and the Exif sub-IFD all share this namespace.
 *
 *
 *
 */
make_key_list_for_group!(enum ExifIfdTag => IfdGroup::Exif,
    //
    // image data structure
    ImageWidth = 0x0100 => "ImageWidth",
    ImageHeight = 0x0101 => "ImageHeight",
    BitsPerSample = 0x0102 => "BitsPerSample",
    Compression = 0x0103 => "Compression",
    PhotometricInterpretation = 0x0106 => "PhotometricInterpretation",
    Orientation = 0x0112 => "Orientation",
    SamplesPerPixel = 0x0115 => "SamplesPerPixel",
    PlanarConfiguration = 0x011C => "PlanarConfiguration",
    YCbCrSubSampling = 0x0212 => "YCbCrSubSampling",
    YCbCrPositioning = 0x0213 => "YCbCrPositioning",
    XResolution = 0x011A => "XResolution",
    YResolution = 0x011B => "YResolution",
    ResolutionUnit = 0x0128 => "ResolutionUnit",

    //
    // recording offset
    StripOffsets = 0x0111 => "StripOffsets",
    RowsPerStrip = 0x0116 => "RowsPerStrip",
    StripByteCounts = 0x0117 => "StripByteCounts",
    ThumbnailOffset = 0x0201 => "ThumbnailOffset",
    ThumbnailSize = 0x0202 => "ThumbnailSize",

    //
    // image data characteristics
    TransferFunction = 0x012D => "TransferFunction",
    WhitePoint = 0x013E => "WhitePoint",
    PrimaryChromaticities = 0x013F => "PrimaryChromaticities",
    YCbCrCoefficients = 0x0211 => "YCbCrCoefficients",
    ReferenceBlackWhite = 0x0214 => "ReferenceBlackWhite",

    //
    // other tags
    DateTime = 0x0132 => "DateTime",
    ImageDescription = 0x010E => "ImageDescription",
    Make = 0x010F => "Make",
    Model = 0x0110 => "Model",
    Software = 0x0131 => "Software",
    Artist = 0x013B => "Artist",
    Copyright = 0x8298 => "Copyright",

    //
    // exif sub-ifd: version
    ExifVersion = 0x9000 => "ExifVersion",
    FlashpixVersion = 0xA000 => "FlashpixVersion",

    //
    // exif sub-ifd: image data characteristics
    ColorSpace = 0xA001 => "ColorSpace",
    ComponentsConfiguration = 0x9101 => "ComponentsConfiguration",
    CompressedBitsPerPixel = 0x9102 => "CompressedBitsPerPixel",
    PixelXDimension = 0xA002 => "PixelXDimension",
    PixelYDimension = 0xA003 => "PixelYDimension",

    //
    // exif sub-ifd: user information
    MakerNote = 0x927C => "MakerNote",
    UserComment = 0x9286 => "UserComment",
    RelatedSoundFile = 0xA004 => "RelatedSoundFile",

    //
    // exif sub-ifd: date and time
    DateTimeOriginal = 0x9003 => "DateTimeOriginal",
    DateTimeDigitized = 0x9004 => "DateTimeDigitized",
    SubsecTime = 0x9290 => "SubsecTime",
    SubsecTimeOriginal = 0x9291 => "SubsecTimeOriginal",
    SubsecTimeDigitized = 0x9292 => "SubsecTimeDigitized",

    //
    // exif sub-ifd: picture-taking conditions
    ExposureTime = 0x829A => "ExposureTime",
    FNumber = 0x829D => "FNumber",
    ExposureProgram = 0x8822 => "ExposureProgram",
    SpectralSensitivity = 0x8824 => "SpectralSensitivity",
    IsoSpeedRatings = 0x8827 => "ISOSpeedRatings",
    Oecf = 0x8828 => "OECF",
    ShutterSpeedValue = 0x9201 => "ShutterSpeedValue",
    ApertureValue = 0x9202 => "ApertureValue",
    BrightnessValue = 0x9203 => "BrightnessValue",
    ExposureBias = 0x9204 => "ExposureBias",
    MaxApertureValue = 0x9205 => "MaxApertureValue",
    SubjectDistance = 0x9206 => "SubjectDistance",
    MeteringMode = 0x9207 => "MeteringMode",
    LightSource = 0x9208 => "LightSource",
    Flash = 0x9209 => "Flash",
    FocalLength = 0x920A => "FocalLength",
    SubjectArea = 0x9214 => "SubjectArea",
    FlashEnergy = 0xA20B => "FlashEnergy",
    SpatialFrequencyResponse = 0xA20C => "SpatialFrequencyResponse",
    FocalPlaneXResolution = 0xA20E => "FocalPlaneXResolution",
    FocalPlaneYResolution = 0xA20F => "FocalPlaneYResolution",
    FocalPlaneResolutionUnit = 0xA210 => "FocalPlaneResolutionUnit",
    SubjectLocation = 0xA214 => "SubjectLocation",
    ExposureIndex = 0xA215 => "ExposureIndex",
    SensingMethod = 0xA217 => "SensingMethod",
    FileSource = 0xA300 => "FileSource",
    SceneType = 0xA301 => "SceneType",
    CfaPattern = 0xA302 => "CFAPattern",
    CustomRendered = 0xA401 => "CustomRendered",
    ExposureMode = 0xA402 => "ExposureMode",
    WhiteBalance = 0xA403 => "WhiteBalance",
    DigitalZoomRatio = 0xA404 => "DigitalZoomRatio",
    FocalLengthIn35mmFilm = 0xA405 => "FocalLengthIn35mmFilm",
    SceneCaptureType = 0xA406 => "SceneCaptureType",
    GainControl = 0xA407 => "GainControl",
    Contrast = 0xA408 => "Contrast",
    Saturation = 0xA409 => "Saturation",
    Sharpness = 0xA40A => "Sharpness",
    DeviceSettingDescription = 0xA40B => "DeviceSettingDescription",
    SubjectDistanceRange = 0xA40C => "SubjectDistanceRange",

    //
    // exif sub-ifd: other tags
    ImageUniqueId = 0xA420 => "ImageUniqueID",
    CameraOwnerName = 0xA430 => "CameraOwnerName",
    BodySerialNumber = 0xA431 => "BodySerialNumber",
    LensSpecification = 0xA432 => "LensSpecification",
    LensMake = 0xA433 => "LensMake",
    LensModel = 0xA434 => "LensModel",
    LensSerialNumber = 0xA435 => "LensSerialNumber",
);

/*
 *
 *
 *
 *  GPS attribute list
 *
 *
 *
 */
make_key_list_for_group!(enum GpsIfdTag => IfdGroup::Gps,
    GpsVersionId = 0x0000 => "GPSVersionID",
    GpsLatitudeRef = 0x0001 => "GPSLatitudeRef",
    GpsLatitude = 0x0002 => "GPSLatitude",
    GpsLongitudeRef = 0x0003 => "GPSLongitudeRef",
    GpsLongitude = 0x0004 => "GPSLongitude",
    GpsAltitudeRef = 0x0005 => "GPSAltitudeRef",
    GpsAltitude = 0x0006 => "GPSAltitude",
    GpsTimeStamp = 0x0007 => "GPSTimeStamp",
    GpsSatellites = 0x0008 => "GPSSatellites",
    GpsStatus = 0x0009 => "GPSStatus",
    GpsMeasureMode = 0x000A => "GPSMeasureMode",
    GpsDop = 0x000B => "GPSDOP",
    GpsSpeedRef = 0x000C => "GPSSpeedRef",
    GpsSpeed = 0x000D => "GPSSpeed",
    GpsTrackRef = 0x000E => "GPSTrackRef",
    GpsTrack = 0x000F => "GPSTrack",
    GpsImgDirectionRef = 0x0010 => "GPSImgDirectionRef",
    GpsImgDirection = 0x0011 => "GPSImgDirection",
    GpsMapDatum = 0x0012 => "GPSMapDatum",
    GpsDestLatitudeRef = 0x0013 => "GPSDestLatitudeRef",
    GpsDestLatitude = 0x0014 => "GPSDestLatitude",
    GpsDestLongitudeRef = 0x0015 => "GPSDestLongitudeRef",
    GpsDestLongitude = 0x0016 => "GPSDestLongitude",
    GpsDestBearingRef = 0x0017 => "GPSDestBearingRef",
    GpsDestBearing = 0x0018 => "GPSDestBearing",
    GpsDestDistanceRef = 0x0019 => "GPSDestDistanceRef",
    GpsDestDistance = 0x001A => "GPSDestDistance",
    GpsProcessingMethod = 0x001B => "GPSProcessingMethod",
    GpsAreaInformation = 0x001C => "GPSAreaInformation",
    GpsDateStamp = 0x001D => "GPSDateStamp",
    GpsDifferential = 0x001E => "GPSDifferential",
);

#[cfg(test)]
mod tests {
    use super::{EXIF_IFD_POINTER, ExifIfdTag, GPS_IFD_POINTER, GpsIfdTag, KnownTag};
    use crate::exif::ifd::IfdGroup;

    /// Pointer tags are handled before lookup, so they must never be named.
    #[test]
    fn pointer_tags_are_not_in_any_dictionary() {
        for group in [IfdGroup::Exif, IfdGroup::Gps] {
            assert!(KnownTag::try_from((group, EXIF_IFD_POINTER)).is_err());
            assert!(KnownTag::try_from((group, GPS_IFD_POINTER)).is_err());
        }
    }

    #[test]
    fn ids_round_trip_through_lookup() {
        for tag in [
            ExifIfdTag::Orientation,
            ExifIfdTag::Compression,
            ExifIfdTag::ThumbnailOffset,
            ExifIfdTag::ThumbnailSize,
            ExifIfdTag::DateTimeOriginal,
        ] {
            assert_eq!(ExifIfdTag::try_from(tag.tag_id()), Ok(tag));
        }

        assert_eq!(
            GpsIfdTag::try_from(0x0004_u16).map(|t| t.tag_name()),
            Ok("GPSLongitude")
        );
    }

    #[test]
    fn groups_do_not_leak_into_each_other() {
        // 0x0001 is a GPS tag, but not a TIFF/Exif one
        assert!(KnownTag::try_from((IfdGroup::Exif, 0x0001_u16)).is_err());
        assert_eq!(
            KnownTag::try_from((IfdGroup::Gps, 0x0001_u16)),
            Ok(KnownTag::GpsIfdTag(GpsIfdTag::GpsLatitudeRef))
        );
    }
}
