//! String interner for labels and module names.

use super::ids::StrId;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Deduplicating string interner.
///
/// All strings live in one concatenated buffer; `offsets[i]..offsets[i + 1]`
/// is string `i`. Labels repeat heavily across modules (`enterprises`,
/// `mib-2`), so every string is deduplicated.
#[derive(Clone, Debug)]
pub struct StringInterner {
    data: String,
    offsets: Vec<u32>,
    lookup: BTreeMap<String, StrId>,
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl StringInterner {
    /// Create a new string interner.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: String::new(),
            offsets: alloc::vec![0],
            lookup: BTreeMap::new(),
        }
    }

    /// Intern a string, returning its identifier.
    ///
    /// Returns `None` when the buffer or the id space is exhausted.
    pub fn intern(&mut self, s: &str) -> Option<StrId> {
        if let Some(&id) = self.lookup.get(s) {
            return Some(id);
        }

        let end = u32::try_from(self.data.len() + s.len()).ok()?;
        let id = StrId::from_index(self.offsets.len() - 1)?;
        self.data.push_str(s);
        self.offsets.push(end);
        self.lookup.insert(String::from(s), id);
        Some(id)
    }

    /// Get a string by its identifier.
    ///
    /// Unknown identifiers yield the empty string.
    #[must_use]
    pub fn get(&self, id: StrId) -> &str {
        let idx = id.to_index();
        match (self.offsets.get(idx), self.offsets.get(idx + 1)) {
            (Some(&start), Some(&end)) => self
                .data
                .get(start as usize..end as usize)
                .unwrap_or_default(),
            _ => "",
        }
    }

    /// Find a string's ID if it has been interned.
    #[must_use]
    pub fn find(&self, s: &str) -> Option<StrId> {
        self.lookup.get(s).copied()
    }

    /// Get the total number of interned strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Check if the interner is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decompose the interner into `(data, offsets)` for serialization.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<u32>) {
        (self.data, self.offsets)
    }

    /// Reconstruct an interner from raw parts, rebuilding the lookup table.
    #[must_use]
    pub fn from_parts(data: String, mut offsets: Vec<u32>) -> Self {
        if offsets.is_empty() {
            offsets.push(0);
        }
        let mut interner = Self {
            data,
            offsets,
            lookup: BTreeMap::new(),
        };
        for idx in 0..interner.len() {
            if let Some(id) = StrId::from_index(idx) {
                let s = String::from(interner.get(id));
                interner.lookup.entry(s).or_insert(id);
            }
        }
        interner
    }
}
