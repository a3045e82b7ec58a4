//! Redundant-substring detection.
//!
//! A gram `h` that occurs inside a longer gram `g` with a nearly equal
//! count almost always appears as part of `g`, so the shorter phrase adds
//! no information and is marked for deletion.

use dashmap::DashSet;
use rayon::prelude::*;
use rustc_hash::FxBuildHasher;
use tracing::debug;

use crate::index::GramDict;
use gramsift_types::GramCount;

/// `|a - b| / max(a, b)`, or `None` when both counts are zero.
#[inline]
pub fn relative_diff(a: u64, b: u64) -> Option<f64> {
    let max = a.max(b);
    if max == 0 {
        return None;
    }
    Some(a.abs_diff(b) as f64 / max as f64)
}

/// Gram texts marked for removal.
///
/// Safe to share between threads: inserts from concurrent subset-detection
/// calls are synchronized per shard.
#[derive(Debug, Default)]
pub struct DeletionSet {
    inner: DashSet<String, FxBuildHasher>,
}

impl DeletionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `text` for deletion. Returns `true` if it was not yet marked.
    #[inline]
    pub fn insert(&self, text: &str) -> bool {
        if self.inner.contains(text) {
            return false;
        }
        self.inner.insert(text.to_string())
    }

    /// Returns `true` if `text` is marked.
    #[inline]
    pub fn contains(&self, text: &str) -> bool {
        self.inner.contains(text)
    }

    /// Number of marked texts.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing is marked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Keeps only the grams whose text is not marked, preserving order.
    pub fn retain_survivors(&self, grams: Vec<GramCount>) -> Vec<GramCount> {
        grams
            .into_iter()
            .filter(|g| !self.contains(&g.text))
            .collect()
    }
}

/// Subset detection for a single gram.
pub trait FindSubset {
    /// Marks every indexed gram that is a substring of `self` with a
    /// relative count difference below `diff_ratio`.
    ///
    /// Does nothing if `self` is already marked.
    fn find_subset(&self, dict: &GramDict, deleted: &DeletionSet, diff_ratio: f64);
}

impl FindSubset for GramCount {
    fn find_subset(&self, dict: &GramDict, deleted: &DeletionSet, diff_ratio: f64) {
        if deleted.contains(&self.text) {
            return;
        }
        for (_, found) in dict.find_iter(&self.text) {
            if found.text == self.text {
                continue;
            }
            if relative_diff(self.count, found.count).is_some_and(|d| d < diff_ratio) {
                deleted.insert(&found.text);
            }
        }
    }
}

/// Runs subset detection for every gram of `dict`.
///
/// With `parallel` set the grams are processed on the rayon pool. The
/// early exit for already-marked grams makes the result depend on
/// processing order when chains of redundant grams exist, so only the
/// sequential mode is reproducible run to run.
pub fn find_redundant(dict: &GramDict, diff_ratio: f64, parallel: bool) -> DeletionSet {
    let deleted = DeletionSet::new();
    if parallel {
        dict.grams()
            .par_iter()
            .for_each(|g| g.find_subset(dict, &deleted, diff_ratio));
    } else {
        for g in dict.grams() {
            g.find_subset(dict, &deleted, diff_ratio);
        }
    }
    deleted
}

/// Removes redundant substrings from `grams`, preserving order.
pub fn dedup(grams: Vec<GramCount>, diff_ratio: f64, parallel: bool) -> Vec<GramCount> {
    let candidates = grams.len();
    let dict = GramDict::from_grams(grams);
    let deleted = find_redundant(&dict, diff_ratio, parallel);
    let survivors = deleted.retain_survivors(dict.into_grams());
    debug!(
        candidates,
        deleted = deleted.len(),
        survivors = survivors.len(),
        "subset dedup finished"
    );
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thai_grams() -> Vec<GramCount> {
        vec![
            GramCount::new("ทำไม", 170),
            GramCount::new("เป็นแบบนี้", 200),
            GramCount::new("เป็น", 20),
            GramCount::new("ทำไมถึงเป็นแบบนี้", 180),
            GramCount::new("ยากจัง ทำไมนะ", 20),
        ]
    }

    #[test]
    fn relative_diff_basic() {
        assert_eq!(relative_diff(180, 170), Some(10.0 / 180.0));
        assert_eq!(relative_diff(20, 180), Some(160.0 / 180.0));
        assert_eq!(relative_diff(5, 5), Some(0.0));
        assert_eq!(relative_diff(0, 0), None);
        assert_eq!(relative_diff(0, 4), Some(1.0));
    }

    #[test]
    fn marks_exactly_the_indistinguishable_substrings() {
        let dict = GramDict::build(&thai_grams());
        let deleted = DeletionSet::new();
        GramCount::new("ทำไมถึงเป็นแบบนี้", 180).find_subset(&dict, &deleted, 0.80);

        assert_eq!(deleted.len(), 2, "{:?}", deleted);
        assert!(deleted.contains("ทำไม"));
        assert!(deleted.contains("เป็นแบบนี้"));
        assert!(!deleted.contains("เป็น"));
    }

    #[test]
    fn already_marked_gram_is_a_no_op() {
        let dict = GramDict::build(&thai_grams());
        let deleted = DeletionSet::new();
        deleted.insert("ทำไมถึงเป็นแบบนี้");
        GramCount::new("ทำไมถึงเป็นแบบนี้", 180).find_subset(&dict, &deleted, 0.80);
        assert_eq!(deleted.len(), 1);
    }

    #[test]
    fn identical_text_is_never_marked() {
        let grams = vec![GramCount::new("ab", 10), GramCount::new("ab", 10)];
        let dict = GramDict::build(&grams);
        let deleted = find_redundant(&dict, 1.0, false);
        assert!(deleted.is_empty());
    }

    #[test]
    fn zero_counts_are_never_redundant() {
        let grams = vec![GramCount::new("abc", 0), GramCount::new("ab", 0)];
        assert_eq!(dedup(grams.clone(), 1.0, false), grams);
    }

    #[test]
    fn zero_ratio_marks_nothing() {
        let grams = vec![GramCount::new("abc", 5), GramCount::new("ab", 5)];
        assert_eq!(dedup(grams.clone(), 0.0, false), grams);
    }

    #[test]
    fn dedup_keeps_order_of_survivors() {
        let survivors = dedup(thai_grams(), 0.80, false);
        let texts: Vec<&str> = survivors.iter().map(|g| g.text.as_str()).collect();
        assert_eq!(texts, vec!["เป็น", "ทำไมถึงเป็นแบบนี้", "ยากจัง ทำไมนะ"]);
    }

    #[test]
    fn parallel_and_sequential_agree_without_chains() {
        let sequential = dedup(thai_grams(), 0.80, false);
        let parallel = dedup(thai_grams(), 0.80, true);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn empty_candidate_set() {
        assert!(dedup(Vec::new(), 0.8, true).is_empty());
    }

    #[test]
    fn deletion_set_insert_reports_novelty() {
        let set = DeletionSet::new();
        assert!(set.insert("x"));
        assert!(!set.insert("x"));
        assert_eq!(set.len(), 1);
    }
}
