//! JPEG is an older image format designed with old-school compression in mind.
//!
//! It uses an unfortunate internal structure that's difficult to parse and
//! edit, so this crate treads lightly.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
    Metadata,
    error::{MetadataError, MetadataResult},
};

mod frame;
pub(crate) mod parse;

type Cached = Option<MetadataResult<Arc<Metadata>>>;

/// A JPEG file.
///
/// Parsing happens the first time [`Jpeg::metadata`] is called. After that,
/// the result is cached, and clones of this `Jpeg` share it.
#[derive(Clone, Debug)]
pub struct Jpeg {
    raw: Arc<[u8]>,
    parsed: Arc<RwLock<Cached>>,
}

impl Jpeg {
    /// Checks whether the input looks like a JPEG file.
    ///
    /// ```
    /// use jpeg_meta::providers::jpeg::Jpeg;
    ///
    /// assert!(Jpeg::magic_number(&[0xFF, 0xD8, 0xFF, 0xE0]));
    /// assert!(!Jpeg::magic_number(b"\x89PNG"));
    /// ```
    pub fn magic_number(input: &[u8]) -> bool {
        parse::magic_number(input)
    }

    /// Creates a provider from a JPEG file's bytes.
    ///
    /// Only the start-of-image marker is checked here. Everything else is
    /// checked when parsing.
    pub fn new(input: &impl AsRef<[u8]>) -> MetadataResult<Self> {
        let input: &[u8] = input.as_ref();

        if !Self::magic_number(input) {
            log::error!("Given input isn't a JPEG file!");
            return Err(MetadataError::InvalidFormat);
        }

        Ok(Self {
            raw: Arc::from(input),
            parsed: Arc::new(const { RwLock::new(None) }),
        })
    }

    /// The file's bytes.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Grabs the file's metadata, parsing it if that hasn't happened yet.
    pub fn metadata(&self) -> MetadataResult<Arc<Metadata>> {
        // check the cache first
        if let Some(cached) = &*self.parsed.read() {
            log::trace!("Cached metadata found! Returning...");
            return cached.clone();
        }

        // someone else may have parsed it while we waited on the lock
        let locked = &mut *self.parsed.write();
        if let Some(cached) = locked {
            log::trace!("Metadata was parsed while waiting for the lock.");
            return cached.clone();
        }

        log::trace!("Parsing JPEG metadata...");
        let result = parse::parse(&self.raw).map(Arc::new);
        *locked = Some(result.clone());
        log::trace!("Completed parsing! Cached internally.");

        result
    }
}
