//! Merge refinements: the down-check and up-check.
//!
//! A candidate merge found by route grouping is not necessarily valid:
//! the synthesised entry may steal traffic from entries that end up below
//! it (down-check), and entries moved down to the insertion point may
//! slip underneath existing entries that cover them (up-check). Each
//! refinement prunes the merge until it is safe, abandoning it outright
//! once it can no longer beat `min_goodness`.

use crate::aliases::AliasTable;
use crate::merge::{insertion_index_for, Merge};
use mesh_types::{KeyMask, RouteEntry};

/// Covering state discovered by scanning below the insertion point.
///
/// If `covers` is set but both bit sets are empty, the cover cannot be
/// avoided by fixing any single bit of the synthesised entry.
#[derive(Debug, Default)]
struct CoverInfo {
    covers: bool,
    set_to_zero: u32,
    set_to_one: u32,
}

/// Accumulates the bits that could be fixed to stop `merge_km` covering
/// the protected key/mask `covered`.
///
/// Only collisions of minimal stringency (fewest settable bits, i.e.
/// fewest ways out) contribute; seeing a strictly tighter collision
/// resets the accumulators.
fn accumulate_settables(
    merge_km: &KeyMask,
    covered: &KeyMask,
    stringency: &mut u32,
    info: &mut CoverInfo,
) {
    // Bits where the merged entry has an X but the covered entry does not
    // may be fixed either way to break the intersection.
    let settable = merge_km.xs() & !covered.xs();
    let this_stringency = settable.count_ones();

    if this_stringency < *stringency {
        *stringency = this_stringency;
        info.set_to_one = settable & !covered.key();
        info.set_to_zero = settable & covered.key();
    } else if this_stringency == *stringency {
        info.set_to_one |= settable & !covered.key();
        info.set_to_zero |= settable & covered.key();
    }
}

/// Scans every entry below the merge's insertion point for key/masks the
/// synthesised entry would cover, consulting the alias map so that
/// previously-merged originals stay protected.
fn cover_info(table: &[RouteEntry], aliases: &AliasTable, merge: &Merge) -> CoverInfo {
    let merged = merge.synthesized_entry(table);
    let merge_km = merged.keymask;

    let mut info = CoverInfo::default();
    let mut stringency = u32::BITS + 1;

    for entry in &table[insertion_index_for(table, &merged)..] {
        let entry_km = entry.keymask;
        if !merge_km.intersects(&entry_km) {
            continue;
        }

        match aliases.aliases_of(&entry_km) {
            None => {
                // No aliases: the entry's own key/mask is what must not
                // be covered.
                info.covers = true;
                accumulate_settables(&merge_km, &entry_km, &mut stringency, &mut info);
            }
            Some(originals) => {
                for alias in originals {
                    if alias.intersects(&merge_km) {
                        info.covers = true;
                        accumulate_settables(&merge_km, alias, &mut stringency, &mut info);
                    }
                }
            }
        }
    }

    info
}

/// Selected entries whose key/masks block fixing a bit of the synthesised
/// entry, per `blocks`.
fn find_removes(
    table: &[RouteEntry],
    merge: &Merge,
    blocks: impl Fn(&KeyMask) -> bool,
) -> Vec<usize> {
    merge.ones().filter(|&i| blocks(&table[i].keymask)).collect()
}

/// Prunes `merge` until the entry it synthesises covers nothing at or
/// below its insertion point. Returns the goodness lost.
///
/// Each pass either finds no cover (done), abandons the merge (cover
/// unavoidable, or goodness no longer beats `min_goodness`), or removes
/// the smallest set of selected entries that lets one colliding bit be
/// fixed, so the loop terminates.
pub fn refine_merge_downcheck(
    table: &[RouteEntry],
    aliases: &AliasTable,
    merge: &mut Merge,
    min_goodness: i32,
) -> i32 {
    let mut removed = 0;
    let mut goodness = merge.len() as i32 - 1;

    loop {
        if goodness <= min_goodness {
            merge.clear();
            return removed;
        }

        let info = cover_info(table, aliases, merge);
        if !info.covers {
            return removed;
        }

        if info.set_to_zero == 0 && info.set_to_one == 0 {
            // Nothing can be fixed to avoid covering the lower entries;
            // abandon the merge entirely.
            merge.clear();
            return removed + goodness + 1;
        }

        // Find the smallest set of selected entries whose removal lets
        // one of the candidate bits be fixed. MSB first; a single-entry
        // set cannot be beaten, so stop looking once one is found.
        let mut best_removes: Vec<usize> = Vec::new();
        for bit in (0..u32::BITS).rev().map(|b| 1u32 << b) {
            if best_removes.len() == 1 {
                break;
            }

            if bit & info.set_to_zero != 0 {
                // An X or a 1 at this bit in any selected entry stops the
                // synthesised bit being forced to 0.
                let removes = find_removes(table, merge, |km| {
                    (!km.mask() & bit) != 0 || (km.key() & bit) != 0
                });
                if !removes.is_empty()
                    && (best_removes.is_empty() || removes.len() < best_removes.len())
                {
                    best_removes = removes;
                }
            }

            if bit & info.set_to_one != 0 {
                // A 0 at this bit (wild or fixed) stops it being forced
                // to 1.
                let removes = find_removes(table, merge, |km| (!km.key() & bit) != 0);
                if !removes.is_empty()
                    && (best_removes.is_empty() || removes.len() < best_removes.len())
                {
                    best_removes = removes;
                }
            }
        }

        if best_removes.is_empty() {
            // A fixable bit exists but no selected entry pins it, so no
            // removal can make progress; abandon rather than spin.
            merge.clear();
            return removed + goodness + 1;
        }

        for &index in &best_removes {
            merge.remove(index);
        }
        removed += best_removes.len() as i32;
        goodness -= best_removes.len() as i32;

        if goodness == 0 {
            merge.clear();
            removed += 1;
        }
    }
}

/// Prunes from `merge` any selected entry that an existing entry between
/// its current position and the merge's insertion point would cover once
/// the merge moved it down there. Returns the goodness lost.
///
/// Walks the selected entries bottom-up (nearest the insertion point
/// first); every removal shrinks the synthesised entry, so the insertion
/// point is recomputed after each one.
pub fn refine_merge_upcheck(table: &[RouteEntry], merge: &mut Merge, min_goodness: i32) -> i32 {
    let mut removed = 0;
    let mut goodness = merge.len() as i32 - 1;
    let mut insertion = merge.insertion_index(table);

    for index in (0..table.len()).rev() {
        if goodness <= min_goodness {
            break;
        }
        if !merge.contains(index) {
            continue;
        }

        let entry_km = table[index].keymask;
        let covered = table
            .iter()
            .take(insertion)
            .skip(index + 1)
            .any(|other| entry_km.intersects(&other.keymask));

        if covered {
            merge.remove(index);
            removed += 1;
            goodness -= 1;
            insertion = merge.insertion_index(table);
        }
    }

    if goodness <= min_goodness {
        merge.clear();
        removed += goodness;
    }

    removed
}
