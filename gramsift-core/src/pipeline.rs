//! Normalizer → Splitter → Tokenizer composition.

use crate::analyzer::{Segmenter, Splitter, TextNormalizer, Tokenizer};

/// Turns raw text into token batches ready for the n-gram stage.
///
/// Each non-empty fragment produced by the splitter becomes one batch, so
/// grams never span a fragment boundary. Every stage is a pure function of
/// its input; one pipeline can be shared by any number of threads.
///
/// ```
/// use gramsift_core::analyzer::{Splitter, TextNormalizer, Tokenizer};
/// use gramsift_core::pipeline::TextPipeline;
///
/// let pipeline = TextPipeline::new(
///     TextNormalizer::new(["!"]),
///     Splitter::pattern(r"[.,]").unwrap(),
///     Tokenizer::new(Splitter::whitespace(), [("dogs", "dog")], |t: &str| t != "the"),
/// );
///
/// assert_eq!(
///     pipeline.batches("the dogs bark!, the cat sleeps."),
///     vec![vec!["dog", "bark"], vec!["cat", "sleeps"]]
/// );
/// ```
pub struct TextPipeline<S, P> {
    normalizer: TextNormalizer,
    splitter: Splitter,
    tokenizer: Tokenizer<S, P>,
}

impl<S, P> TextPipeline<S, P>
where
    S: Segmenter,
    P: Fn(&str) -> bool,
{
    /// Creates a pipeline from its three stages.
    pub fn new(normalizer: TextNormalizer, splitter: Splitter, tokenizer: Tokenizer<S, P>) -> Self {
        Self {
            normalizer,
            splitter,
            tokenizer,
        }
    }

    /// One token batch per fragment; fragments yielding no tokens are
    /// skipped.
    pub fn batches(&self, text: &str) -> Vec<Vec<String>> {
        let normalized = self.normalizer.normalize(text);
        self.splitter
            .split(&normalized)
            .into_iter()
            .map(|fragment| self.tokenizer.tokenize(fragment))
            .filter(|batch| !batch.is_empty())
            .collect()
    }

    /// All tokens of `text` as one flat sequence.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(text);
        self.tokenizer.tokenize_all(self.splitter.split(&normalized))
    }

    /// The normalizer stage.
    #[inline]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// The splitter stage.
    #[inline]
    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    /// The tokenizer stage.
    #[inline]
    pub fn tokenizer(&self) -> &Tokenizer<S, P> {
        &self.tokenizer
    }
}
