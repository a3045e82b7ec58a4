//! Matching over a compiled automaton.

use crate::index::types::{Automaton, Match, StateId, NO_STATE, ROOT};

impl Automaton {
    /// Returns every occurrence of every pattern in `haystack`, including
    /// overlapping and nested ones.
    ///
    /// Matches are yielded in order of their end offset; matches sharing
    /// an end offset come longest first. Runs in
    /// O(haystack length + number of matches).
    #[inline]
    pub fn find_iter<'a, 'h>(&'a self, haystack: &'h [u8]) -> FindIter<'a, 'h> {
        FindIter {
            automaton: self,
            haystack,
            pos: 0,
            state: ROOT,
            out_state: NO_STATE,
            out_idx: 0,
        }
    }

    /// Length of the longest pattern that is a prefix of `haystack`.
    ///
    /// Walks trie edges only, never failure links, so the answer is
    /// anchored at the first byte.
    pub fn longest_prefix(&self, haystack: &[u8]) -> Option<usize> {
        let mut state = ROOT;
        let mut longest = None;

        for (i, &byte) in haystack.iter().enumerate() {
            match self.goto(state, byte) {
                Some(next) => state = next,
                None => break,
            }
            if self.states[state as usize].out_len > 0 {
                longest = Some(i + 1);
            }
        }

        longest
    }

    /// Trie edge lookup without failure fallback.
    #[inline(always)]
    pub(crate) fn goto(&self, state: StateId, byte: u8) -> Option<StateId> {
        if state == ROOT {
            let next = self.root_delta[byte as usize];
            return (next != ROOT).then_some(next);
        }
        let s = &self.states[state as usize];
        let block = &self.edges[s.edge_offset as usize..(s.edge_offset + s.edge_len) as usize];
        block
            .binary_search_by_key(&byte, |e| e.byte)
            .ok()
            .map(|i| block[i].target)
    }

    /// Full transition: follows failure links until an edge exists.
    #[inline(always)]
    pub(crate) fn next_state(&self, mut state: StateId, byte: u8) -> StateId {
        loop {
            if let Some(next) = self.goto(state, byte) {
                return next;
            }
            if state == ROOT {
                return ROOT;
            }
            state = self.states[state as usize].fail;
        }
    }
}

/// Streaming iterator over overlapping matches.
///
/// The cursor is the only per-query state and lives inside the iterator,
/// so dropping the iterator releases everything the query used.
pub struct FindIter<'a, 'h> {
    automaton: &'a Automaton,
    haystack: &'h [u8],
    pos: usize,
    state: StateId,
    /// State whose outputs are being reported, or `NO_STATE`.
    out_state: StateId,
    out_idx: u32,
}

impl Iterator for FindIter<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let ac = self.automaton;
        loop {
            if self.out_state != NO_STATE {
                let s = &ac.states[self.out_state as usize];
                if self.out_idx < s.out_len {
                    let pattern = ac.outputs[(s.out_offset + self.out_idx) as usize];
                    self.out_idx += 1;
                    let len = ac.pattern_lens[pattern as usize] as usize;
                    return Some(Match {
                        pattern,
                        start: self.pos - len,
                        end: self.pos,
                    });
                }
                self.out_state = s.dict_link;
                self.out_idx = 0;
                continue;
            }

            let &byte = self.haystack.get(self.pos)?;
            self.pos += 1;
            self.state = ac.next_state(self.state, byte);

            let s = &ac.states[self.state as usize];
            self.out_state = if s.out_len > 0 {
                self.state
            } else {
                s.dict_link
            };
            self.out_idx = 0;
        }
    }
}
