//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Removes configured substrings from raw text
//! - **Splitter**: Breaks text into fragments by regex or boundary characters
//! - **Tokenizer**: Filters and stem-normalizes fragments into tokens
//! - **NGram**: Joins consecutive tokens into gram candidates, inline or on a
//!   dedicated worker thread

pub mod ngram;
pub mod normalizer;
pub mod splitter;
pub mod tokenizer;

pub use ngram::{NGramGenerator, NGramWorker};
pub use normalizer::TextNormalizer;
pub use splitter::Splitter;
pub use tokenizer::Tokenizer;

/// Trait for anything that turns a fragment into raw tokens.
///
/// This allows custom word segmentation (dictionary-based segmenters for
/// scripts without spaces, for instance) while reusing the same
/// filtering and stemming. Implemented for [`Splitter`] and for any
/// function or closure `Fn(&str) -> Vec<&str>`.
pub trait Segmenter {
    /// Splits `text` into tokens borrowed from it.
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

impl<F> Segmenter for F
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str>,
{
    #[inline(always)]
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self(text)
    }
}
