//! The IPTC IIM dataset dictionary.
//!
//! IPTC IIM datasets are addressed by a record number and a dataset number.
//! Only a handful of them are worth naming here - the rest are skipped by the
//! parser.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// A composite IPTC key: `(record, dataset)`.
///
/// Displays as `<record>x<dataset>`, like `2x25` for keywords.
///
/// ```
/// use jpeg_meta_types::iptc::IptcKey;
///
/// let keywords = IptcKey { record: 2, dataset: 25 };
/// assert_eq!(keywords.to_string(), "2x25");
/// assert_eq!(keywords.tag_name(), Some("Keywords"));
///
/// let unknown = IptcKey { record: 1, dataset: 90 };
/// assert_eq!(unknown.tag_name(), None);
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct IptcKey {
    /// The record number (`2` is the application record).
    pub record: u8,

    /// The dataset number within the record.
    pub dataset: u8,
}

impl IptcKey {
    /// Grabs this key's canonical name, if it's in the dictionary.
    pub fn tag_name(&self) -> Option<&'static str> {
        IPTC_TAGS.get(self).copied()
    }
}

impl core::fmt::Display for IptcKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.record, self.dataset)
    }
}

/// A map, (key, value), where:
///
/// - `key` is the record + dataset pair
/// - `value` is the dataset's canonical name
pub static IPTC_TAGS: LazyLock<FxHashMap<IptcKey, &'static str>> = LazyLock::new(|| {
    let mut m: FxHashMap<IptcKey, &'static str> = FxHashMap::default();
    map(&mut m);
    m
});

/// Adds all (key, value) pairs to the currently empty map.
fn map(m: &mut FxHashMap<IptcKey, &'static str>) {
    let mut i = |record: u8, dataset: u8, name: &'static str| {
        m.insert(IptcKey { record, dataset }, name)
    };

    // application record
    i(2, 5, "ObjectName");
    i(2, 25, "Keywords"); // repeatable
    i(2, 120, "Caption");
}
