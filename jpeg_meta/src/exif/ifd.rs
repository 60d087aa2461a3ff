use std::collections::BTreeMap;

use jpeg_meta_types::exif::ifd::IfdGroup;
use rustc_hash::FxHashSet;

use crate::{
    Metadata, Value,
    cursor::ByteCursor,
    error::{MetadataError, MetadataResult},
};

/// Size of one IFD entry: tag, format, count, and value/offset.
pub(super) const ENTRY_LEN: usize = 12;

/// How many sub-IFDs deep we'll follow pointers.
pub(super) const MAX_RECURSION_DEPTH: usize = 8;

/// Walks IFDs in a TIFF structure, storing each recognized field in the
/// metadata.
///
/// Sub-IFD pointers make this recursive. Every IFD walked is remembered, and
/// a sub-IFD pointer to any of them is skipped, so each sub-IFD is walked at
/// most once.
pub(super) struct IfdWalker<'a, 'm> {
    /// The whole TIFF structure. Every offset is relative to its start.
    pub(super) tiff: ByteCursor<'a>,
    pub(super) metadata: &'m mut Metadata,

    /// Offsets of the IFDs currently being walked, outermost first.
    pub(super) recursion_stack: Vec<usize>,

    /// Offsets of every IFD walked so far.
    pub(super) visited: FxHashSet<usize>,
}

impl<'a, 'm> IfdWalker<'a, 'm> {
    pub(super) fn new(tiff: ByteCursor<'a>, metadata: &'m mut Metadata) -> Self {
        Self {
            tiff,
            metadata,
            recursion_stack: Vec::new(),
            visited: FxHashSet::default(),
        }
    }

    /// Walks the IFD at `offset`, returning the offset of the next IFD.
    ///
    /// A next offset of `0` means there isn't one. An IFD without a readable
    /// count, or with zero entries, is corrupt.
    pub(super) fn walk(&mut self, offset: usize, group: IfdGroup) -> MetadataResult<u32> {
        let entry_count: u16 = match self.tiff.short_at(offset) {
            Some(0) => {
                log::error!(
                    "IFD reported itself as having zero fields! This is fatal to parsing. \
                    offset: `{offset}`"
                );
                return Err(MetadataError::CorruptIfd { offset });
            }
            Some(ct) => ct,
            None => {
                log::error!("Couldn't find count on IFD - ran out of data! offset: `{offset}`");
                return Err(MetadataError::CorruptIfd { offset });
            }
        };

        log::trace!("Parsing `{entry_count}` fields in `{group:?}` IFD at `{offset}`...");
        self.recursion_stack.push(offset);
        self.visited.insert(offset);

        let entries_start = offset + 2;
        for i in 0..usize::from(entry_count) {
            let entry_offset = entries_start + i * ENTRY_LEN;

            if entry_offset + ENTRY_LEN > self.tiff.len() {
                log::warn!(
                    "Field #{i} of IFD at `{offset}` runs past the end of the Exif blob. \
                    Skipping..."
                );
                continue;
            }

            self.decode_entry(entry_offset, group)?;
        }

        self.recursion_stack.pop();
        log::trace!("Completed field parsing!");

        // a missing pointer is the same as no next IFD
        let next_ifd_location: u32 = self
            .tiff
            .long_at(entries_start + usize::from(entry_count) * ENTRY_LEN)
            .unwrap_or_else(|| {
                log::warn!("IFD didn't contain a pointer to the next IFD! Assuming there's none.");
                0
            });

        Ok(next_ifd_location)
    }

    /// Whether the IFD at `offset` can be walked from here.
    pub(super) fn can_descend_into(&self, offset: usize) -> bool {
        if self.visited.contains(&offset) {
            log::warn!("Sub-IFD at `{offset}` was already walked. Skipping...");
            return false;
        }

        if self.recursion_stack.len() >= MAX_RECURSION_DEPTH {
            log::warn!(
                "Sub-IFDs are nested too deeply. Not following pointer to `{offset}`. \
                depth: `{}`",
                self.recursion_stack.len()
            );
            return false;
        }

        true
    }

    /// Where values for the given group are stored.
    pub(super) fn values_for(&mut self, group: IfdGroup) -> &mut BTreeMap<String, Value> {
        match group {
            IfdGroup::Exif => &mut self.metadata.exif,
            IfdGroup::Gps => &mut self.metadata.gps,
        }
    }
}
