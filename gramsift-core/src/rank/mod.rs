//! Reduction of counted grams to a ranked summary.
//!
//! A run goes through three stages:
//! - **Subset dedup**: drops grams contained in a longer gram with a nearly
//!   equal count
//! - **Similarity filter**: drops grams whose bigram profile is close to a
//!   later gram
//! - **Summary**: stable sort by count, top K
//!
//! Every run builds its own index and deletion set, so independent runs
//! never share state.

pub mod similarity;
pub mod subset;
pub mod summary;

pub use similarity::{dice_coefficient, filter_similarity, BigramProfile};
pub use subset::{dedup, find_redundant, relative_diff, DeletionSet, FindSubset};
pub use summary::{group_by_count, summarize, Summary};

use std::time::Instant;

use tracing::{debug, info};

use gramsift_types::{ConfigError, GramCount, SimilarityScope, SummaryConfig};

/// Runs the full reduction with one validated [`SummaryConfig`].
#[derive(Debug, Clone)]
pub struct Summarizer {
    config: SummaryConfig,
}

impl Summarizer {
    /// Validates `config` and wraps it.
    pub fn new(config: SummaryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Dedup, similarity filter and ranking over one candidate set.
    pub fn run(&self, grams: Vec<GramCount>) -> Summary {
        let started = Instant::now();
        let candidates = grams.len();

        let survivors = dedup(grams, self.config.diff_ratio, self.config.parallel);
        let after_dedup = survivors.len();
        let distinct = self.filter(survivors);
        debug!(after_dedup, after_similarity = distinct.len(), "reduction stages done");

        let summary = summary::rank(distinct, self.config.size);

        info!(
            candidates,
            kept = summary.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "summarized"
        );
        summary
    }

    fn filter(&self, grams: Vec<GramCount>) -> Vec<GramCount> {
        let ratio = self.config.similarity_ratio;
        match self.config.scope {
            SimilarityScope::All => filter_similarity(&grams, ratio),
            SimilarityScope::SameCount => group_by_count(grams)
                .into_values()
                .flat_map(|group| filter_similarity(&group, ratio))
                .collect(),
        }
    }
}
