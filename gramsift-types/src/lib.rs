//! Core types and configuration for the Gramsift phrase summarizer.
//!
//! This crate provides the plain data that is shared between the
//! analysis pipeline, the ranking engine and whatever counting backend
//! sits between them. Keeping types separate ensures:
//!
//! - **Clean boundaries**: a counting backend only needs [`GramCount`]
//! - **Validated configuration**: every precondition is checked once, at
//!   construction, never mid-stream
//! - **No algorithms**: nothing here allocates beyond the values themselves

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a pattern inside a multi-pattern matcher.
///
/// Pattern ids are dense: pattern `i` is the `i`-th text handed to the
/// builder, which lets callers map a match straight back to its source.
pub type PatternId = u32;

/// A gram text together with the number of times it was observed.
///
/// `text` is the concatenation of consecutive token forms with no
/// separator. Values are produced by an external counting backend and are
/// treated as immutable for the duration of one summarization run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GramCount {
    /// The gram text.
    pub text: String,
    /// Number of occurrences.
    pub count: u64,
}

impl GramCount {
    /// Creates a new gram count.
    #[inline]
    pub fn new(text: impl Into<String>, count: u64) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}

impl<S: Into<String>> From<(S, u64)> for GramCount {
    #[inline]
    fn from((text, count): (S, u64)) -> Self {
        Self::new(text, count)
    }
}

impl fmt::Display for GramCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.text, self.count)
    }
}

/// Errors raised when a caller supplies an invalid configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Gram bounds must satisfy `1 <= min <= max`.
    #[error("invalid gram range: min={min} max={max} (need 1 <= min <= max)")]
    InvalidGramRange {
        /// Requested minimum gram length.
        min: usize,
        /// Requested maximum gram length.
        max: usize,
    },

    /// A ratio was outside `[0, 1]` or not a number.
    #[error("{name} must be within [0, 1], got {value}")]
    RatioOutOfRange {
        /// Name of the offending setting.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A summary must hold at least one gram.
    #[error("summary size must be at least 1")]
    ZeroSummarySize,

    /// The splitter pattern could not be compiled.
    #[error("invalid split pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Checks that `value` lies within `[0, 1]`.
///
/// # Errors
/// Returns `ConfigError::RatioOutOfRange` for values outside the range and
/// for NaN.
pub fn check_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

/// Inclusive bounds on the number of tokens joined into one gram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GramRange {
    /// Shortest gram, in tokens. Must be at least 1.
    pub min_gram: usize,
    /// Longest gram, in tokens. Must be at least `min_gram`.
    pub max_gram: usize,
}

impl Default for GramRange {
    fn default() -> Self {
        Self {
            min_gram: 1,
            max_gram: 4,
        }
    }
}

impl GramRange {
    /// Creates a validated range.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGramRange` unless `1 <= min <= max`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self, ConfigError> {
        let range = Self { min_gram, max_gram };
        range.validate()?;
        Ok(range)
    }

    /// Grams of every length from a single token up to `max_gram`.
    pub fn unigrams_to(max_gram: usize) -> Result<Self, ConfigError> {
        Self::new(1, max_gram)
    }

    /// Re-checks the bounds, e.g. after deserialization.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGramRange` unless `1 <= min <= max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_gram < 1 || self.min_gram > self.max_gram {
            return Err(ConfigError::InvalidGramRange {
                min: self.min_gram,
                max: self.max_gram,
            });
        }
        Ok(())
    }

    /// Returns `true` if a gram of `len` tokens is within bounds.
    #[inline(always)]
    pub const fn contains(&self, len: usize) -> bool {
        len >= self.min_gram && len <= self.max_gram
    }
}

/// Which grams the near-duplicate filter compares against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityScope {
    /// Every survivor is compared with every later survivor.
    #[default]
    All,
    /// Only grams sharing the same count are compared.
    SameCount,
}

/// Settings for one summarization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Relative count difference below which a contained gram is
    /// considered redundant. Default: 0.8
    pub diff_ratio: f64,
    /// Similarity coefficient above which an earlier gram is dropped in
    /// favour of a later one. Default: 0.7
    pub similarity_ratio: f64,
    /// Maximum number of grams in the summary. Default: 10
    pub size: usize,
    /// Scope of the similarity filter.
    pub scope: SimilarityScope,
    /// Run subset detection on the rayon pool.
    pub parallel: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            diff_ratio: 0.8,
            similarity_ratio: 0.7,
            size: 10,
            scope: SimilarityScope::All,
            parallel: true,
        }
    }
}

impl SummaryConfig {
    /// Creates a configuration producing a summary of `size` grams.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Single-threaded configuration, useful for reproducible runs.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Checks every setting.
    ///
    /// # Errors
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("diff_ratio", self.diff_ratio)?;
        check_ratio("similarity_ratio", self.similarity_ratio)?;
        if self.size == 0 {
            return Err(ConfigError::ZeroSummarySize);
        }
        Ok(())
    }
}
