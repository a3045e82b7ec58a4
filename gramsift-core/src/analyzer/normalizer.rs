//! Exclude-substring normalizer.
//!
//! Removes every occurrence of every configured substring in one
//! left-to-right pass. At each position the longest exclude starting
//! there is consumed, so the order of the exclude list never changes the
//! result.

use memchr::{memchr, memchr2, memchr3};

use crate::index::Automaton;

/// Strategy for jumping to the next position where an exclude may start.
#[derive(Clone, Debug)]
enum Skip {
    One(u8),
    Two(u8, u8),
    Three(u8, u8, u8),
    Table(Box<[bool; 256]>),
}

impl Skip {
    fn new(first_bytes: &[u8]) -> Self {
        match *first_bytes {
            [a] => Skip::One(a),
            [a, b] => Skip::Two(a, b),
            [a, b, c] => Skip::Three(a, b, c),
            _ => {
                let mut table = Box::new([false; 256]);
                for &b in first_bytes {
                    table[b as usize] = true;
                }
                Skip::Table(table)
            }
        }
    }

    #[inline(always)]
    fn find(&self, haystack: &[u8]) -> Option<usize> {
        match self {
            Skip::One(a) => memchr(*a, haystack),
            Skip::Two(a, b) => memchr2(*a, *b, haystack),
            Skip::Three(a, b, c) => memchr3(*a, *b, *c, haystack),
            Skip::Table(table) => haystack.iter().position(|&b| table[b as usize]),
        }
    }
}

/// Removes configured substrings from text.
///
/// Excludes may be arbitrary UTF-8, including multi-codepoint sequences
/// such as ZWJ emoji. Matching happens on bytes; since every exclude is
/// itself valid UTF-8 a match can only begin on a character boundary, so
/// removal never splits a character.
///
/// # Examples
///
/// ```
/// use gramsift_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new(["ไม่", "⌘"]);
/// assert_eq!(normalizer.normalize("ไม่มี"), "มี");
/// assert_eq!(normalizer.normalize("book⌘"), "book");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TextNormalizer {
    excludes: Option<(Automaton, Skip)>,
}

impl TextNormalizer {
    /// Creates a normalizer removing every string in `excludes`.
    ///
    /// Empty strings are ignored; an empty list yields the identity.
    pub fn new<I, S>(excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns: Vec<S> = excludes
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .collect();
        if patterns.is_empty() {
            return Self::default();
        }

        let mut first_bytes: Vec<u8> = patterns.iter().map(|s| s.as_ref().as_bytes()[0]).collect();
        first_bytes.sort_unstable();
        first_bytes.dedup();

        let automaton = Automaton::build(patterns.iter().map(|s| s.as_ref().as_bytes()));
        Self {
            excludes: Some((automaton, Skip::new(&first_bytes))),
        }
    }

    /// Returns `true` if this normalizer never changes its input.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.excludes.is_none()
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    /// Removed text is not rescanned, so removing `ab` from `aabb` leaves
    /// `ab`.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        let Some((automaton, skip)) = &self.excludes else {
            out.push_str(input);
            return;
        };

        out.reserve(input.len());
        let bytes = input.as_bytes();
        let mut copied = 0usize;
        let mut i = 0usize;

        while let Some(offset) = skip.find(&bytes[i..]) {
            let at = i + offset;
            match automaton.longest_prefix(&bytes[at..]) {
                Some(len) => {
                    out.push_str(&input[copied..at]);
                    i = at + len;
                    copied = i;
                }
                None => i = at + 1,
            }
            if i >= bytes.len() {
                break;
            }
        }

        out.push_str(&input[copied..]);
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}
