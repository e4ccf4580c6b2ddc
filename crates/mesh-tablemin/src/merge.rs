//! Merges: selections of table entries combined into one entry.

use crate::aliases::AliasTable;
use crate::bitset::EntrySet;
use mesh_types::{KeyMask, RouteEntry, RoutingTable};

/// A set of routing table entries that may be combined into a single, more
/// general entry.
///
/// Applying a merge removes the selected entries and inserts the
/// synthesised entry at the position its generality demands, shrinking the
/// table by the merge's goodness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    entries: EntrySet,
}

impl Merge {
    /// Creates an empty merge over a table of `table_len` entries.
    pub fn new(table_len: usize) -> Self {
        Merge {
            entries: EntrySet::with_capacity(table_len),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains(index)
    }

    pub fn insert(&mut self, index: usize) {
        self.entries.insert(index);
    }

    pub fn remove(&mut self, index: usize) {
        self.entries.remove(index);
    }

    /// Empties the merge entirely.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The number of selected entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the selected table indices in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.ones()
    }

    /// The net reduction in table length this merge would yield: the
    /// selected entries collapse into one slot. A merge of fewer than two
    /// entries has goodness 0 and is never applied.
    pub fn goodness(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// The single entry that is semantically the union of the selected
    /// entries.
    ///
    /// Bits on which the selected keys disagree become new wildcards;
    /// existing wildcards are kept; sources and routes are ORed. Callers
    /// must only merge entries sharing one route value for the result to
    /// route identically (the merge search enforces this).
    pub fn synthesized_entry(&self, table: &[RouteEntry]) -> RouteEntry {
        let mut any_ones = 0u32;
        let mut all_ones = u32::MAX;
        let mut all_sels = u32::MAX;
        let mut source = 0u32;
        let mut route = 0u32;

        for index in self.entries.ones() {
            let entry = &table[index];
            any_ones |= entry.keymask.key();
            all_ones &= entry.keymask.key();
            all_sels &= entry.keymask.mask();
            source |= entry.source;
            route |= entry.route;
        }

        // A bit stays selective only where every mask selects it and every
        // key agrees on its value.
        let agreed = !(any_ones ^ all_ones);
        let mask = all_sels & agreed;

        RouteEntry {
            keymask: KeyMask::new(all_ones & mask, mask),
            source,
            route,
        }
    }

    /// Where the synthesised entry would be inserted in the table.
    pub fn insertion_index(&self, table: &[RouteEntry]) -> usize {
        insertion_index_for(table, &self.synthesized_entry(table))
    }

    /// Applies the merge, mutating the table and the alias map.
    ///
    /// The table is rebuilt in one pass: unselected entries keep their
    /// order, the synthesised entry lands at its insertion index, and each
    /// removed entry's key/mask (or its existing alias set) is folded into
    /// the synthesised entry's aliases. The result is one entry shorter
    /// per removed entry, plus the insertion.
    pub fn apply(&self, table: &mut RoutingTable, aliases: &mut AliasTable) {
        let merged = self.synthesized_entry(table);
        let insertion = insertion_index_for(table, &merged);

        let mut result = Vec::with_capacity(table.len() + 1 - self.len());
        for (index, entry) in table.iter().enumerate() {
            if index == insertion {
                result.push(merged);
            }
            if self.contains(index) {
                aliases.absorb(merged.keymask, entry.keymask);
            } else {
                result.push(*entry);
            }
        }
        if insertion == table.len() {
            result.push(merged);
        }

        *table = result;
    }
}

/// The first index at which an entry of the given generality may be
/// inserted without breaking the generality ordering: just past the last
/// entry whose generality does not exceed it.
pub fn insertion_index(table: &[RouteEntry], generality: u32) -> usize {
    table.partition_point(|entry| entry.keymask.generality() <= generality)
}

/// Insertion index for a concrete entry.
pub fn insertion_index_for(table: &[RouteEntry], entry: &RouteEntry) -> usize {
    insertion_index(table, entry.keymask.generality())
}
