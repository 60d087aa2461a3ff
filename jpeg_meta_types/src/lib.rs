//! # `jpeg_meta_types`
//!
//! Static tables and small primitive types used by `jpeg_meta` when decoding
//! metadata from JPEG files.
//!
//! Everything here is immutable and shared: the tag dictionaries map numeric
//! (or composite) keys to their canonical names, one dictionary per metadata
//! namespace.

#![forbid(unsafe_code)]

pub mod exif;
pub mod iptc;
