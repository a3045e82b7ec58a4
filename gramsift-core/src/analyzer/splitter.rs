//! Fragment splitting.
//!
//! Two strategies with deliberately different empty-fragment semantics:
//!
//! - [`Splitter::pattern`] splits at every regex match and passes empty
//!   fragments through (at the edges and between adjacent delimiters).
//! - [`Splitter::boundaries`] splits on runs of boundary characters and
//!   never yields an empty fragment.
//!
//! Downstream token counts depend on which one is picked, so the two are
//! kept separate rather than unified.

use regex::Regex;
use smallvec::SmallVec;

use crate::analyzer::Segmenter;
use gramsift_types::ConfigError;

/// Breaks text into an ordered sequence of fragments.
#[derive(Clone, Debug, Default)]
pub enum Splitter {
    /// No splitting: the whole input is one fragment.
    #[default]
    Whole,
    /// Split at every non-overlapping regex match, keeping empty pieces.
    Pattern(Regex),
    /// Split on runs of these characters, dropping empty pieces.
    Boundaries(SmallVec<[char; 8]>),
}

impl Splitter {
    /// Compiles `pattern` into a pattern-based splitter.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidPattern` if the regex does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        Regex::new(pattern)
            .map(Splitter::Pattern)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
    }

    /// Builds a boundary-character splitter. An empty set yields
    /// [`Splitter::Whole`].
    pub fn boundaries<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let set: SmallVec<[char; 8]> = chars.into_iter().collect();
        if set.is_empty() {
            Splitter::Whole
        } else {
            Splitter::Boundaries(set)
        }
    }

    /// Splits on ASCII space, tab and newline.
    pub fn whitespace() -> Self {
        Self::boundaries([' ', '\t', '\n'])
    }

    /// Splits `text` into fragments borrowed from it.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Splitter::Whole => vec![text],
            Splitter::Pattern(re) => re.split(text).collect(),
            Splitter::Boundaries(set) => text
                .split(|c: char| set.contains(&c))
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl Segmenter for Splitter {
    #[inline]
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.split(text)
    }
}
