//! Token filtering and stem normalization.
//!
//! The tokenizer sits after the splitter. For each fragment it asks its
//! [`Segmenter`] for raw tokens, drops the ones the predicate rejects and
//! maps the rest through a caller-supplied stem table:
//!
//! ```text
//! "ร๊ากและThailand"  --segment-->  ["ร๊าก", "Thailand"]
//!                    --stem------>  ["รัก", "ไทย"]
//! ```
//!
//! Stemming is a lookup, not a linguistic engine: the table maps a
//! lower-cased surface form to its canonical form. Tokens without an
//! entry are emitted unchanged, original casing preserved.

use rustc_hash::FxHashMap;

use crate::analyzer::Segmenter;

/// Filters and stem-normalizes fragments into tokens.
///
/// ## Example
///
/// ```
/// use gramsift_core::analyzer::Tokenizer;
///
/// let tokenizer = Tokenizer::from_fn(
///     |s: &str| s.split("และ").collect(),
///     [("ร๊าก", "รัก"), ("thailand", "ไทย")],
///     |t: &str| t != "skip",
/// );
///
/// assert_eq!(tokenizer.tokenize("ร๊ากและThailand"), vec!["รัก", "ไทย"]);
/// ```
#[derive(Clone)]
pub struct Tokenizer<S, P> {
    segmenter: S,
    stems: FxHashMap<String, String>,
    keep: P,
}

impl<F, P> Tokenizer<F, P> {
    /// Creates a tokenizer whose segmenter is a plain function or closure.
    pub fn from_fn<I, K, V>(segment: F, stems: I, keep: P) -> Self
    where
        F: for<'a> Fn(&'a str) -> Vec<&'a str>,
        P: Fn(&str) -> bool,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Tokenizer::new(segment, stems, keep)
    }
}

impl<S, P> Tokenizer<S, P>
where
    S: Segmenter,
    P: Fn(&str) -> bool,
{
    /// Creates a tokenizer.
    ///
    /// Stem keys are lower-cased here so lookups are case-insensitive.
    /// Entries with an empty canonical form are dropped, which leaves the
    /// surface form untouched.
    pub fn new<I, K, V>(segmenter: S, stems: I, keep: P) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let stems = stems
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();
        Self {
            segmenter,
            stems,
            keep,
        }
    }

    /// Number of stem entries.
    #[inline]
    pub fn stem_count(&self) -> usize {
        self.stems.len()
    }

    /// Canonical form of `token`, or `token` itself when it has no stem.
    #[inline]
    pub fn stem<'t>(&'t self, token: &'t str) -> &'t str {
        if self.stems.is_empty() {
            return token;
        }
        self.stems
            .get(token.to_lowercase().as_str())
            .map_or(token, String::as_str)
    }

    /// Tokenizes one fragment, appending to `out`.
    pub fn tokenize_into(&self, fragment: &str, out: &mut Vec<String>) {
        for token in self.segmenter.segment(fragment) {
            if !(self.keep)(token) {
                continue;
            }
            out.push(self.stem(token).to_string());
        }
    }

    /// Tokenizes one fragment.
    #[inline]
    pub fn tokenize(&self, fragment: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.tokenize_into(fragment, &mut out);
        out
    }

    /// Tokenizes a sequence of fragments into one token stream.
    pub fn tokenize_all<'a, I>(&self, fragments: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut out = Vec::new();
        for fragment in fragments {
            self.tokenize_into(fragment, &mut out);
        }
        out
    }
}
