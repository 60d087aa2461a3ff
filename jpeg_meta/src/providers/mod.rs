//! # Providers
//!
//! Providers represent a source of metadata. Here, that's just JPEG files.
//!
//! A provider holds onto its file and caches the parsed result, so it's cheap
//! to share one between threads and ask for its metadata repeatedly.

pub mod jpeg;
