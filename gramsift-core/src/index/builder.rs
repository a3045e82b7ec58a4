//! Automaton construction.

use std::collections::VecDeque;

use crate::index::types::{Automaton, Edge, State, StateId, NO_STATE, ROOT};
use gramsift_types::PatternId;
use smallvec::SmallVec;

/// Trie node used only while building. Children are kept sorted by byte
/// so the compiled edge blocks can be binary searched.
#[derive(Default)]
struct TrieNode {
    children: SmallVec<[(u8, StateId); 4]>,
    outputs: SmallVec<[PatternId; 1]>,
}

impl TrieNode {
    #[inline]
    fn child(&self, byte: u8) -> Option<StateId> {
        self.children
            .binary_search_by_key(&byte, |&(b, _)| b)
            .ok()
            .map(|i| self.children[i].1)
    }
}

impl Automaton {
    /// Builds an automaton over `patterns`.
    ///
    /// Pattern ids follow input order. Empty patterns are skipped (they
    /// would match at every position) but still consume an id so ids stay
    /// aligned with the caller's slice. An empty input yields an automaton
    /// that matches nothing.
    pub fn build<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut trie: Vec<TrieNode> = vec![TrieNode::default()];
        let mut pattern_lens = Vec::new();

        for (id, pattern) in patterns.into_iter().enumerate() {
            let bytes = pattern.as_ref();
            pattern_lens.push(bytes.len() as u32);
            if bytes.is_empty() {
                continue;
            }

            let mut node = ROOT;
            for &byte in bytes {
                node = match trie[node as usize].child(byte) {
                    Some(next) => next,
                    None => {
                        let next = trie.len() as StateId;
                        trie.push(TrieNode::default());
                        let children = &mut trie[node as usize].children;
                        let at = children.partition_point(|&(b, _)| b < byte);
                        children.insert(at, (byte, next));
                        next
                    }
                };
            }
            trie[node as usize].outputs.push(id as PatternId);
        }

        let (fail, dict_link) = Self::link(&trie);
        Self::compile(&trie, &fail, &dict_link, pattern_lens)
    }

    /// Breadth-first pass computing failure and dictionary-suffix links.
    ///
    /// BFS order guarantees that when a node is visited, the failure link
    /// of every shallower node is already final.
    fn link(trie: &[TrieNode]) -> (Vec<StateId>, Vec<StateId>) {
        let mut fail = vec![ROOT; trie.len()];
        let mut dict_link = vec![NO_STATE; trie.len()];
        let mut queue: VecDeque<StateId> = VecDeque::with_capacity(trie.len());

        for &(_, child) in &trie[ROOT as usize].children {
            queue.push_back(child);
        }

        while let Some(node) = queue.pop_front() {
            for &(byte, child) in &trie[node as usize].children {
                let mut f = fail[node as usize];
                let target = loop {
                    if let Some(next) = trie[f as usize].child(byte) {
                        break next;
                    }
                    if f == ROOT {
                        break ROOT;
                    }
                    f = fail[f as usize];
                };

                fail[child as usize] = target;
                dict_link[child as usize] = if !trie[target as usize].outputs.is_empty() {
                    target
                } else {
                    dict_link[target as usize]
                };
                queue.push_back(child);
            }
        }

        (fail, dict_link)
    }

    /// Flattens the trie into contiguous edge and output arrays.
    fn compile(
        trie: &[TrieNode],
        fail: &[StateId],
        dict_link: &[StateId],
        pattern_lens: Vec<u32>,
    ) -> Self {
        let edge_total: usize = trie.iter().map(|n| n.children.len()).sum();
        let out_total: usize = trie.iter().map(|n| n.outputs.len()).sum();

        let mut states = Vec::with_capacity(trie.len());
        let mut edges = Vec::with_capacity(edge_total);
        let mut outputs = Vec::with_capacity(out_total);

        for (id, node) in trie.iter().enumerate() {
            let edge_offset = edges.len() as u32;
            edges.extend(
                node.children
                    .iter()
                    .map(|&(byte, target)| Edge { byte, target }),
            );
            let out_offset = outputs.len() as u32;
            outputs.extend_from_slice(&node.outputs);

            states.push(State {
                edge_offset,
                edge_len: node.children.len() as u32,
                out_offset,
                out_len: node.outputs.len() as u32,
                fail: fail[id],
                dict_link: dict_link[id],
            });
        }

        let mut root_delta = Box::new([ROOT; 256]);
        for &(byte, target) in &trie[ROOT as usize].children {
            root_delta[byte as usize] = target;
        }

        Self {
            states,
            edges,
            outputs,
            pattern_lens,
            root_delta,
        }
    }
}
