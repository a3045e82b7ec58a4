//! Automaton types and constants.

use gramsift_types::{GramCount, PatternId};

pub type StateId = u32;

/// The start state. Always present, even for an empty pattern set.
pub const ROOT: StateId = 0;

/// Sentinel for "no state" in failure-output chains.
pub const NO_STATE: StateId = StateId::MAX;

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub byte: u8,
    pub target: StateId,
}

/// Compiled state. Edges and outputs live in shared flat arrays and are
/// addressed by `(offset, len)` so the whole automaton is three `Vec`s.
#[derive(Clone, Copy, Debug)]
pub struct State {
    pub edge_offset: u32,
    pub edge_len: u32,
    pub out_offset: u32,
    pub out_len: u32,
    /// Longest proper suffix of this state's path that is also a path.
    pub fail: StateId,
    /// Nearest state along the failure chain that has outputs.
    pub dict_link: StateId,
}

/// A single pattern occurrence inside a haystack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub pattern: PatternId,
    pub start: usize,
    pub end: usize,
}

impl Match {
    /// Length of the match in bytes.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Always `false`: empty patterns are never indexed.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Immutable multi-pattern substring matcher.
///
/// A byte trie of every pattern, augmented with failure links and
/// dictionary-suffix links. Built once, then shared freely: every query
/// keeps its cursor on the caller's stack, so `&Automaton` can serve any
/// number of threads without locking.
#[derive(Debug, Clone)]
pub struct Automaton {
    pub(crate) states: Vec<State>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) outputs: Vec<PatternId>,
    pub(crate) pattern_lens: Vec<u32>,
    /// Dense transition table for the root, which every mismatch
    /// eventually falls back to.
    pub(crate) root_delta: Box<[StateId; 256]>,
}

/// The automaton bound to the grams it was built from.
///
/// Pattern `i` is `grams[i].text`, so every match resolves to its
/// originating [`GramCount`] without a lookup table.
#[derive(Debug, Clone)]
pub struct GramDict {
    pub(crate) automaton: Automaton,
    pub(crate) grams: Vec<GramCount>,
}
