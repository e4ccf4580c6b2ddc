//! Alias tracking for iterated merges.

use mesh_types::KeyMask;
use std::collections::{HashMap, HashSet};

/// Maps a key/mask currently present in the table to the set of original
/// key/masks that have been folded into it by earlier merges.
///
/// The down-check consults this so that it protects the original match
/// semantics rather than the geometry of the current table: a synthesised
/// entry must not cover any key/mask an entry below it stands in for.
///
/// Every key in the map is the key/mask of some current table entry and
/// every value set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    map: HashMap<KeyMask, HashSet<KeyMask>>,
}

impl AliasTable {
    pub fn new() -> Self {
        AliasTable::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, keymask: &KeyMask) -> bool {
        self.map.contains_key(keymask)
    }

    /// The original key/masks folded into `keymask`, if any merges have
    /// absorbed entries into it.
    pub fn aliases_of(&self, keymask: &KeyMask) -> Option<&HashSet<KeyMask>> {
        self.map.get(keymask)
    }

    /// Records `original` as an alias of `keymask`.
    pub fn insert(&mut self, keymask: KeyMask, original: KeyMask) {
        self.map.entry(keymask).or_default().insert(original);
    }

    /// Folds the table entry `old` into the synthesised entry `new`.
    ///
    /// If `old` already stands in for earlier originals, those migrate to
    /// `new` and `old`'s entry is erased; otherwise `old` itself becomes
    /// an alias of `new`.
    pub fn absorb(&mut self, new: KeyMask, old: KeyMask) {
        match self.map.remove(&old) {
            Some(originals) => {
                self.map.entry(new).or_default().extend(originals);
            }
            None => {
                self.insert(new, old);
            }
        }
    }

    /// Iterates over `(keymask, alias set)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyMask, &HashSet<KeyMask>)> {
        self.map.iter()
    }
}
