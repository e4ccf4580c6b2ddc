//! Routing tables and the first-match rule.

use crate::RouteEntry;

/// An ordered routing table.
///
/// Tables are kept sorted by non-decreasing generality (wildcard count);
/// within one generality band the order is insertion order. The router
/// matches top-down, so an entry only fires for keys no earlier entry
/// matches.
pub type RoutingTable = Vec<RouteEntry>;

/// Looks up the entry a concrete key would be routed by (first match wins).
pub fn lookup(table: &[RouteEntry], key: u32) -> Option<&RouteEntry> {
    table.iter().find(|entry| entry.keymask.matches(key))
}

/// True if generalities are non-decreasing along the table.
pub fn is_generality_sorted(table: &[RouteEntry]) -> bool {
    table
        .windows(2)
        .all(|pair| pair[0].keymask.generality() <= pair[1].keymask.generality())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_first_match_wins() {
        let table = vec![
            RouteEntry::new(0b1001, 0b1111, 0b010, 0b001),
            RouteEntry::new(0b1000, 0b1000, 0b001, 0b100),
        ];

        // 1001 is matched by both entries; the higher one fires.
        assert_eq!(lookup(&table, 0b1001), Some(&table[0]));

        // 1010 is only matched by 1XXX.
        assert_eq!(lookup(&table, 0b1010), Some(&table[1]));

        // 0110 is matched by nothing.
        assert_eq!(lookup(&table, 0b0110), None);
    }

    #[test]
    fn test_is_generality_sorted() {
        let sorted = vec![
            RouteEntry::new(0b1001, 0xffff_ffff, 0b010, 0b001),
            RouteEntry::new(0b1000, 0xffff_fff8, 0b001, 0b100),
            RouteEntry::new(0b0000, 0x0000_0000, 0b001, 0b100),
        ];
        assert!(is_generality_sorted(&sorted));
        assert!(is_generality_sorted(&[]));
        assert!(is_generality_sorted(&sorted[..1]));

        let mut unsorted = sorted.clone();
        unsorted.swap(0, 2);
        assert!(!is_generality_sorted(&unsorted));
    }
}
