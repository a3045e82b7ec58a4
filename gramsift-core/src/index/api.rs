//! Public API for building a gram dictionary and querying it.

use crate::index::search::FindIter;
use crate::index::types::{Automaton, GramDict, Match};
use gramsift_types::{GramCount, PatternId};

impl GramDict {
    /// Indexes every gram text of `grams`.
    ///
    /// Building over an empty slice is not an error; the result simply
    /// matches nothing.
    pub fn build(grams: &[GramCount]) -> Self {
        Self::from_grams(grams.to_vec())
    }

    /// Like [`build`](Self::build) but takes ownership of the grams.
    pub fn from_grams(grams: Vec<GramCount>) -> Self {
        let automaton = Automaton::build(grams.iter().map(|g| g.text.as_bytes()));
        tracing::trace!(stats = %automaton.stats(), "gram dictionary built");
        Self { automaton, grams }
    }

    /// Every indexed gram occurring as a substring of `text`, with the
    /// match location.
    #[inline]
    pub fn find_iter<'a, 'h>(&'a self, text: &'h str) -> GramMatches<'a, 'h> {
        GramMatches {
            grams: &self.grams,
            inner: self.automaton.find_iter(text.as_bytes()),
        }
    }

    /// Retrieves a gram by its pattern id.
    #[inline(always)]
    pub fn get(&self, id: PatternId) -> Option<&GramCount> {
        self.grams.get(id as usize)
    }

    /// The grams in pattern-id order.
    #[inline(always)]
    pub fn grams(&self) -> &[GramCount] {
        &self.grams
    }

    /// The underlying automaton.
    #[inline(always)]
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns the number of grams.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    /// Returns `true` if no grams were indexed.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// Gives the grams back, dropping the automaton.
    pub fn into_grams(self) -> Vec<GramCount> {
        self.grams
    }
}

/// Iterator over `(match, gram)` pairs produced by [`GramDict::find_iter`].
pub struct GramMatches<'a, 'h> {
    grams: &'a [GramCount],
    inner: FindIter<'a, 'h>,
}

impl<'a> Iterator for GramMatches<'a, '_> {
    type Item = (Match, &'a GramCount);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let m = self.inner.next()?;
        Some((m, &self.grams[m.pattern as usize]))
    }
}
