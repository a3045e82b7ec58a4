//! Ranking and serialization logic.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};
use tracing::debug;

use gramsift_types::{ConfigError, GramCount};

/// Top grams of one run, sorted by count descending.
///
/// Serializes as an array of `[text, count]` pairs in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    grams: Vec<GramCount>,
}

impl Summary {
    /// Ranked grams.
    #[inline]
    pub fn grams(&self) -> &[GramCount] {
        &self.grams
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    pub fn into_grams(self) -> Vec<GramCount> {
        self.grams
    }

    /// Compact JSON form, e.g. `[["CCC",39],["EEE",39]]`.
    ///
    /// # Panics
    ///
    /// Serializing strings and integers into memory cannot fail; a failure
    /// here is a bug.
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => panic!("summary serialization failed: {e}"),
        }
    }
}

impl Serialize for Summary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.grams.len()))?;
        for g in &self.grams {
            seq.serialize_element(&(g.text.as_str(), g.count))?;
        }
        seq.end()
    }
}

/// Ranks `grams` by count and keeps the top `size`.
///
/// The sort is stable: grams with equal counts keep their input order.
pub fn summarize(grams: Vec<GramCount>, size: usize) -> Result<Summary, ConfigError> {
    if size == 0 {
        return Err(ConfigError::ZeroSummarySize);
    }
    Ok(rank(grams, size))
}

pub(crate) fn rank(mut grams: Vec<GramCount>, size: usize) -> Summary {
    let candidates = grams.len();
    grams.sort_by(|a, b| b.count.cmp(&a.count));
    grams.truncate(size);
    debug!(candidates, size, kept = grams.len(), "summary built");
    Summary { grams }
}

/// Groups grams by count, ascending; input order is kept within a group.
pub fn group_by_count(grams: impl IntoIterator<Item = GramCount>) -> BTreeMap<u64, Vec<GramCount>> {
    let mut groups: BTreeMap<u64, Vec<GramCount>> = BTreeMap::new();
    for g in grams {
        groups.entry(g.count).or_default().push(g);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<GramCount> {
        vec![
            GramCount::new("AAA", 1),
            GramCount::new("BBB", 30),
            GramCount::new("CCC", 39),
            GramCount::new("DDD", 38),
            GramCount::new("EEE", 39),
            GramCount::new("FFF", 30),
        ]
    }

    #[test]
    fn top_three() {
        let summary = summarize(letters(), 3).unwrap();
        let counts: Vec<u64> = summary.grams().iter().map(|g| g.count).collect();
        assert_eq!(counts, vec![39, 39, 38]);
        assert_eq!(summary.to_json(), r#"[["CCC",39],["EEE",39],["DDD",38]]"#);
    }

    #[test]
    fn fewer_survivors_than_size() {
        let summary = summarize(letters(), 100).unwrap();
        assert_eq!(summary.len(), 6);
        assert_eq!(summary.grams().last().map(|g| g.count), Some(1));
        // ties keep input order
        assert_eq!(summary.grams()[3].text, "BBB");
        assert_eq!(summary.grams()[4].text, "FFF");
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(summarize(letters(), 0), Err(ConfigError::ZeroSummarySize));
    }

    #[test]
    fn empty_summary_serializes_to_empty_array() {
        let summary = summarize(Vec::new(), 5).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.to_json(), "[]");
    }

    #[test]
    fn json_escapes_text() {
        let summary = summarize(vec![GramCount::new("say \"hi\"", 2)], 1).unwrap();
        assert_eq!(summary.to_json(), r#"[["say \"hi\"",2]]"#);
    }

    #[test]
    fn groups_ascending_with_input_order() {
        let groups = group_by_count(letters());
        let keys: Vec<u64> = groups.keys().copied().collect();
        assert_eq!(keys, vec![1, 30, 38, 39]);
        let ties: Vec<&str> = groups[&39].iter().map(|g| g.text.as_str()).collect();
        assert_eq!(ties, vec!["CCC", "EEE"]);
    }
}
