//! Ordered Covering routing table minimiser.
//!
//! Compresses ternary routing tables for a six-link mesh router so that
//! each table fits under a target capacity. The minimiser greedily merges
//! groups of same-route entries into single, more general entries while
//! preserving the router's ordered, most-specific-first match semantics.
//!
//! Key pieces:
//! - Greedy best-merge search over same-route entry groups
//! - Down-check and up-check refinements that keep merges semantics-safe
//! - Alias tracking so iterated merges still protect the original entries
//! - Default-route elimination pre-pass
//! - Binary routing table stream reader/writer

pub mod aliases;
pub mod bitset;
pub mod covering;
pub mod default_routes;
pub mod error;
pub mod merge;
pub mod refine;
pub mod stream;

pub use aliases::AliasTable;
pub use bitset::EntrySet;
pub use covering::{get_best_merge, minimise, minimise_with_aliases};
pub use error::StreamError;
pub use merge::{insertion_index, insertion_index_for, Merge};
pub use stream::{read_record, write_record, TableRecord};
