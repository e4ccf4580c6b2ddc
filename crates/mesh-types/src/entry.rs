//! Routing table entries.

use crate::KeyMask;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single routing table entry.
///
/// `source` is the set of links and cores by which matching packets may
/// arrive at the router; `route` is the set by which they leave. In both
/// fields the low six bits are inter-chip links (see [`crate::Link`]) and
/// the remaining bits address on-chip cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEntry {
    pub keymask: KeyMask,
    pub source: u32,
    pub route: u32,
}

impl RouteEntry {
    pub const fn new(key: u32, mask: u32, source: u32, route: u32) -> Self {
        RouteEntry {
            keymask: KeyMask::new(key, mask),
            source,
            route,
        }
    }
}

impl fmt::Display for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} source={:#x} route={:#x}",
            self.keymask, self.source, self.route
        )
    }
}
