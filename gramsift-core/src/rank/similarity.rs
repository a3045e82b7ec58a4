//! Near-duplicate filtering by bigram overlap.
//!
//! The coefficient is Sørensen–Dice over the multiset of codepoint
//! bigrams, with whitespace ignored:
//!
//! ```text
//! dice(a, b) = 2 * |bigrams(a) ∩ bigrams(b)| / (|bigrams(a)| + |bigrams(b)|)
//! ```
//!
//! Codepoints rather than bytes keep multi-byte scripts comparable: a Thai
//! character counts once, not three times.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use gramsift_types::GramCount;

type Bigram = (char, char);

/// Precomputed bigram multiset of one string.
#[derive(Debug, Clone)]
pub struct BigramProfile {
    chars: SmallVec<[char; 32]>,
    counts: FxHashMap<Bigram, u32>,
}

impl BigramProfile {
    /// Builds the profile of `text`, skipping whitespace.
    pub fn new(text: &str) -> Self {
        let chars: SmallVec<[char; 32]> = text.chars().filter(|c| !c.is_whitespace()).collect();
        let mut counts = FxHashMap::default();
        for w in chars.windows(2) {
            *counts.entry((w[0], w[1])).or_insert(0) += 1;
        }
        Self { chars, counts }
    }

    /// Number of bigrams, counting repeats.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len().saturating_sub(1)
    }

    /// Returns `true` if the text has fewer than two non-space codepoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dice coefficient against another profile, in `[0, 1]`.
    ///
    /// Identical texts score 1. If either side has no bigram and the texts
    /// differ, the score is 0.
    pub fn similarity(&self, other: &Self) -> f64 {
        if self.chars == other.chars {
            return 1.0;
        }
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }

        let (small, large) = if self.counts.len() <= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        let shared: u32 = small
            .counts
            .iter()
            .map(|(bigram, &n)| n.min(large.counts.get(bigram).copied().unwrap_or(0)))
            .sum();

        2.0 * shared as f64 / (self.len() + other.len()) as f64
    }
}

/// Dice coefficient of two strings.
#[inline]
pub fn dice_coefficient(a: &str, b: &str) -> f64 {
    BigramProfile::new(a).similarity(&BigramProfile::new(b))
}

/// Drops every gram that is more than `ratio` similar to a later gram.
///
/// The later occurrence is the one that survives. Order of the kept grams
/// is preserved. Quadratic in the number of grams; meant for an already
/// deduplicated set.
pub fn filter_similarity(grams: &[GramCount], ratio: f64) -> Vec<GramCount> {
    let profiles: Vec<BigramProfile> = grams.iter().map(|g| BigramProfile::new(&g.text)).collect();

    let kept: Vec<GramCount> = grams
        .iter()
        .enumerate()
        .filter(|&(i, _)| {
            !profiles[i + 1..]
                .iter()
                .any(|later| profiles[i].similarity(later) > ratio)
        })
        .map(|(_, g)| g.clone())
        .collect();

    debug!(
        input = grams.len(),
        kept = kept.len(),
        ratio,
        "similarity filter finished"
    );
    kept
}
