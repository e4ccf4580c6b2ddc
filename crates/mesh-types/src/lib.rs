//! Common types for mesh router routing tables.
//!
//! This crate provides type-safe representations of the primitives shared
//! between the routing-table minimiser and other consumers of the binary
//! table format:
//!
//! - [`KeyMask`]: ternary key/mask pairs matching sets of 32-bit keys
//! - [`RouteEntry`]: a routing table entry (key/mask plus link bitfields)
//! - [`RoutingTable`]: an ordered table with first-match semantics
//! - [`Link`]: the six inter-chip link directions

mod entry;
mod keymask;
mod link;
mod table;

pub use entry::RouteEntry;
pub use keymask::KeyMask;
pub use link::{has_core_bits, link_count, opposite_links, Link, LINK_MASK};
pub use table::{is_generality_sorted, lookup, RoutingTable};

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid link direction: {0}")]
    InvalidLink(String),
}
