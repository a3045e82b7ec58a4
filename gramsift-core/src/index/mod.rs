//! Multi-pattern substring matching over a fixed gram set.
//!
//! The index is a byte-level Aho-Corasick automaton: a trie of every
//! pattern plus failure links (longest proper suffix that is also a trie
//! path) and dictionary-suffix links (nearest suffix state that ends a
//! pattern). A query walks the haystack once and reports every pattern
//! occurrence, overlapping and nested ones included, in
//! O(haystack length + number of matches).
//!
//! Memory Layout:
//! - States, edges and outputs are three contiguous arrays
//! - Each state addresses its edges and outputs by `(offset, len)`
//! - Edges inside a block are sorted by byte for binary search; the root
//!   additionally has a dense 256-entry table
//!
//! Threading:
//! - [`Automaton`] and [`GramDict`] are immutable after construction and
//!   `Send + Sync`. Query cursors live in the returned iterators, never in
//!   the automaton, so concurrent queries need no locking.

mod api;
mod builder;
mod search;
mod stats;
mod types;

pub use api::GramMatches;
pub use search::FindIter;
pub use stats::IndexStats;
pub use types::{Automaton, GramDict, Match};
