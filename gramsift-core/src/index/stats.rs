//! Statistics and IndexStats.

use crate::index::types::{Automaton, Edge, State};
use gramsift_types::PatternId;

/// A snapshot of automaton statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of pattern ids, including skipped empty patterns.
    pub num_patterns: usize,
    /// Number of states, root included.
    pub num_states: usize,
    /// Number of trie edges.
    pub num_transitions: usize,
    /// Number of (state, pattern) output entries.
    pub num_outputs: usize,
}

impl Automaton {
    /// Returns automaton statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_patterns: self.pattern_lens.len(),
            num_states: self.states.len(),
            num_transitions: self.edges.len(),
            num_outputs: self.outputs.len(),
        }
    }
}

impl IndexStats {
    /// Returns approximate heap usage in bytes.
    pub fn memory_usage_bytes(&self) -> usize {
        let states = self.num_states * std::mem::size_of::<State>();
        let edges = self.num_transitions * std::mem::size_of::<Edge>();
        let outputs = self.num_outputs * std::mem::size_of::<PatternId>();
        let lens = self.num_patterns * std::mem::size_of::<u32>();
        let root = 256 * std::mem::size_of::<u32>();
        states + edges + outputs + lens + root
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} patterns, {} states, {} transitions, ~{} bytes",
            self.num_patterns,
            self.num_states,
            self.num_transitions,
            self.memory_usage_bytes()
        )
    }
}
