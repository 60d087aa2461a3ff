//! # `jpeg_meta`
//!
//! A library to decode metadata from JPEG files that are already in memory.
//!
//! It finds:
//!
//! - the image dimensions, from the start-of-frame header
//! - Exif tags, including the Exif sub-IFD and the thumbnail IFD
//! - GPS tags
//! - IPTC captions, keywords, and object names
//! - the embedded JPEG thumbnail, as raw bytes
//!
//! ## Usage
//!
//! ```
//! // pretend you load your media somehow
//! let not_a_jpeg: &[u8] = b"GIF89a";
//!
//! let report = jpeg_meta::parse(&not_a_jpeg);
//! assert!(!report.success);
//! assert_eq!(report.error, Some(jpeg_meta::error::MetadataError::InvalidFormat));
//! ```
//!
//! Prefer [`Metadata::new`] if you'd like a `Result` instead, or
//! [`providers::jpeg::Jpeg`] to share one parsed file between threads.
//!
//! ## Malformed files
//!
//! Real files are messy. Only a few problems stop parsing entirely (see
//! [`error::MetadataError`]); anything else just skips the broken piece and
//! keeps going, so you get whatever could be read.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use crate::error::{MetadataError, MetadataResult};

pub mod convert;
pub mod cursor;
pub mod error;
mod exif;
mod iptc;
pub mod providers;

/// Everything decoded from a JPEG file.
///
/// Built up as the file is read. If a fatal error happens partway through,
/// none of it is returned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Metadata {
    /// Width in pixels, from the first start-of-frame header.
    pub image_width: Option<u32>,

    /// Height in pixels, from the first start-of-frame header.
    pub image_height: Option<u32>,

    /// Tags from IFD 0, the thumbnail IFD, and the Exif sub-IFD, by name.
    pub exif: BTreeMap<String, Value>,

    /// Tags from the GPS sub-IFD, by name.
    pub gps: BTreeMap<String, Value>,

    /// IPTC datasets, by name.
    pub iptc: BTreeMap<String, IptcValue>,

    /// The raw bytes of the embedded JPEG thumbnail.
    pub thumbnail: Option<Vec<u8>>,
}

impl Metadata {
    /// Parses the given JPEG file for its metadata.
    pub fn new(input: &impl AsRef<[u8]>) -> MetadataResult<Self> {
        providers::jpeg::parse::parse(input.as_ref())
    }
}

/// A decoded Exif or GPS value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// One unsigned short.
    Integer(u32),

    /// Text, or a comma-joined list of unsigned longs.
    Text(String),

    /// A pair of unsigned shorts.
    IntegerList(Vec<u32>),

    /// One `n/d` rational, or several joined by commas.
    Rational(String),
}

impl Value {
    /// Grabs this value as a single integer.
    ///
    /// Unsigned longs are stored as text, so text holding exactly one
    /// decimal number counts, too.
    ///
    /// ```
    /// use jpeg_meta::Value;
    ///
    /// assert_eq!(Value::Integer(6).as_integer(), Some(6));
    /// assert_eq!(Value::Text("1024".into()).as_integer(), Some(1024));
    /// assert_eq!(Value::Text("1,2".into()).as_integer(), None);
    /// ```
    pub fn as_integer(&self) -> Option<u32> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Text(t) => t.parse::<u32>().ok(),
            Value::IntegerList(_) | Value::Rational(_) => None,
        }
    }

    /// Grabs the textual form of text and rational values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(t) | Value::Rational(t) => Some(t.as_str()),
            Value::Integer(_) | Value::IntegerList(_) => None,
        }
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Text(t) | Value::Rational(t) => f.write_str(t),
            Value::IntegerList(list) => {
                let joined: Vec<String> = list.iter().map(u32::to_string).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

/// A decoded IPTC value.
///
/// Most datasets appear once, but some (like keywords) may repeat. The
/// second time a dataset shows up, it becomes a list.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IptcValue {
    /// The dataset was seen once.
    Single(String),

    /// The dataset was seen more than once, in file order.
    List(Vec<String>),
}

impl IptcValue {
    /// Adds another occurrence of the dataset, turning this into a list.
    pub fn push(&mut self, value: String) {
        match self {
            IptcValue::Single(first) => {
                *self = IptcValue::List(vec![core::mem::take(first), value]);
            }
            IptcValue::List(list) => list.push(value),
        }
    }

    /// All occurrences, in file order.
    ///
    /// ```
    /// use jpeg_meta::IptcValue;
    ///
    /// let mut v = IptcValue::Single("a".into());
    /// assert_eq!(v.values(), ["a"]);
    ///
    /// v.push("b".into());
    /// assert_eq!(v, IptcValue::List(vec!["a".into(), "b".into()]));
    /// assert_eq!(v.values(), ["a", "b"]);
    /// ```
    pub fn values(&self) -> &[String] {
        match self {
            IptcValue::Single(s) => core::slice::from_ref(s),
            IptcValue::List(list) => list.as_slice(),
        }
    }
}

/// The outcome of [`parse`].
///
/// `success` is `false` exactly when `error` holds the fatal error; the
/// metadata is empty in that case.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct ParseReport {
    /// Whether parsing finished.
    pub success: bool,

    /// The fatal error that stopped parsing, if any.
    pub error: Option<MetadataError>,

    /// Whatever was decoded.
    pub metadata: Metadata,
}

impl From<MetadataResult<Metadata>> for ParseReport {
    fn from(value: MetadataResult<Metadata>) -> Self {
        match value {
            Ok(metadata) => Self {
                success: true,
                error: None,
                metadata,
            },
            Err(e) => Self {
                success: false,
                error: Some(e),
                metadata: Metadata::default(),
            },
        }
    }
}

/// Parses a JPEG file for its metadata.
///
/// This never panics and never returns an error directly. Check
/// [`ParseReport::success`] instead.
pub fn parse(input: &impl AsRef<[u8]>) -> ParseReport {
    let report = ParseReport::from(Metadata::new(input));

    match report.error {
        Some(ref e) => log::error!("Failed to parse JPEG metadata! err: {e}"),
        None => log::trace!("Finished parsing JPEG metadata."),
    }

    report
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
