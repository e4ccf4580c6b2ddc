//! The Ordered Covering greedy search and driver loop.

use crate::aliases::AliasTable;
use crate::bitset::EntrySet;
use crate::merge::Merge;
use crate::refine::{refine_merge_downcheck, refine_merge_upcheck};
use mesh_types::{RouteEntry, RoutingTable};
use tracing::debug;

/// Finds the best valid merge in the table.
///
/// Candidates are groups of same-route entries, visited in table order;
/// each group that could beat the best goodness so far is validated by
/// the down-check, the up-check, and (if the up-check pruned anything,
/// changing the synthesised entry) a second down-check. Refinements stop
/// early once a candidate can no longer win.
///
/// Returns an empty merge when no merge of positive goodness exists.
pub fn get_best_merge(table: &[RouteEntry], aliases: &AliasTable) -> Merge {
    let mut best_merge = Merge::new(table.len());
    let mut best_goodness: i32 = 0;

    // Entries already swept into some candidate need not seed another:
    // route grouping would rebuild the same selection.
    let mut considered = EntrySet::with_capacity(table.len());

    for (index, entry) in table.iter().enumerate() {
        if considered.contains(index) {
            continue;
        }
        considered.insert(index);

        let mut current = Merge::new(table.len());
        current.insert(index);
        let mut current_goodness: i32 = 0;

        for (other_index, other) in table.iter().enumerate().skip(index + 1) {
            if other.route == entry.route {
                current.insert(other_index);
                considered.insert(other_index);
                current_goodness += 1;
            }
        }

        if current_goodness <= best_goodness {
            continue;
        }

        current_goodness -= refine_merge_downcheck(table, aliases, &mut current, best_goodness);
        if current_goodness <= best_goodness {
            continue;
        }

        let removed = refine_merge_upcheck(table, &mut current, best_goodness);
        current_goodness -= removed;

        // The up-check shrank the synthesised entry, which may expose new
        // covers of lower entries.
        if removed > 0 && current_goodness > best_goodness {
            current_goodness -= refine_merge_downcheck(table, aliases, &mut current, best_goodness);
        }

        if current_goodness > best_goodness {
            best_goodness = current_goodness;
            best_merge = current;
        }
    }

    best_merge
}

/// Minimises `table` as far as possible towards `target_length`.
///
/// Aliases accumulated along the way are discarded; use
/// [`minimise_with_aliases`] to keep them.
pub fn minimise(table: &mut RoutingTable, target_length: usize) {
    let mut aliases = AliasTable::new();
    minimise_with_aliases(table, target_length, &mut aliases);
}

/// Minimises `table` towards `target_length`, recording in `aliases`
/// which original key/masks each surviving entry stands in for.
///
/// Repeatedly applies the best merge until the table is short enough or
/// no merge of positive goodness remains. A table that cannot reach the
/// target is left as small as the greedy search could make it.
pub fn minimise_with_aliases(
    table: &mut RoutingTable,
    target_length: usize,
    aliases: &mut AliasTable,
) {
    while table.len() > target_length {
        let merge = get_best_merge(table, aliases);
        if merge.goodness() < 1 {
            break;
        }

        debug!(
            "Merging {} entries; table shrinks to {}",
            merge.len(),
            table.len() - merge.goodness()
        );
        merge.apply(table, aliases);
    }
}
