//! Default-route elimination.
//!
//! A router forwards packets with no matching table entry "straight
//! through": out by the link opposite the one they arrived on. Any entry
//! that does exactly that, and whose traffic no lower entry would
//! otherwise catch, is dead weight and can be dropped before the
//! Ordered Covering search runs.

use mesh_types::{has_core_bits, link_count, opposite_links, RouteEntry, RoutingTable};
use tracing::debug;

/// True if the entry at `index` may be replaced by default routing.
fn eliminable(table: &[RouteEntry], index: usize) -> bool {
    let entry = &table[index];

    // Core traffic can never be default-routed.
    if has_core_bits(entry.source) || has_core_bits(entry.route) {
        return false;
    }

    // Packets must go straight through: one way in, the opposite way out.
    if opposite_links(entry.source) != entry.route {
        return false;
    }
    if link_count(entry.source) != 1 || link_count(entry.route) != 1 {
        return false;
    }

    // A lower entry sharing any keys would start matching this entry's
    // traffic once the entry is gone.
    !table[index + 1..]
        .iter()
        .any(|other| other.keymask.intersects(&entry.keymask))
}

/// Removes every entry default routing would handle, preserving order.
pub fn remove_default_entries(table: &mut RoutingTable) {
    let original = std::mem::take(table);
    for index in 0..original.len() {
        if !eliminable(&original, index) {
            table.push(original[index]);
        }
    }

    if table.len() < original.len() {
        debug!(
            "Removed {} default-routable entries",
            original.len() - table.len()
        );
    }
}
