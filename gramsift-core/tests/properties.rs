use gramsift_core::analyzer::{NGramGenerator, TextNormalizer};
use gramsift_core::index::Automaton;
use gramsift_core::rank::{
    dedup, dice_coefficient, filter_similarity, relative_diff, summarize, Summarizer,
};
use gramsift_types::{GramCount, GramRange, SummaryConfig};
use proptest::prelude::*;

fn accept_all(_: &str) -> bool {
    true
}

fn naive_matches(patterns: &[String], hay: &str) -> Vec<(u32, usize, usize)> {
    let bytes = hay.as_bytes();
    let mut out = Vec::new();
    for (id, p) in patterns.iter().enumerate() {
        let p = p.as_bytes();
        if p.is_empty() {
            continue;
        }
        for start in 0..bytes.len() {
            if bytes[start..].starts_with(p) {
                out.push((id as u32, start, start + p.len()));
            }
        }
    }
    out.sort();
    out
}

fn gram_list() -> impl Strategy<Value = Vec<GramCount>> {
    prop::collection::vec(("[a-cก-ข]{1,5}", 0u64..50), 0..24)
        .prop_map(|v| v.into_iter().map(GramCount::from).collect())
}

// two letters and short texts, so most pairs nest
fn nested_gram_list() -> impl Strategy<Value = Vec<GramCount>> {
    prop::collection::vec(("[ab]{1,4}", 0u64..20), 0..16)
        .prop_map(|v| v.into_iter().map(GramCount::from).collect())
}

proptest! {
    #[test]
    fn normalizer_removes_every_separated_exclude(
        excludes in prop::collection::vec("[abก่]{1,3}", 1..5),
        head in "[xy ]{0,4}",
        pieces in prop::collection::vec((0usize..8, "[xy ]{1,4}"), 0..8),
    ) {
        let mut input = head.clone();
        let mut expected = head;
        for (idx, clean) in &pieces {
            input.push_str(&excludes[idx % excludes.len()]);
            input.push_str(clean);
            expected.push_str(clean);
        }

        let out = TextNormalizer::new(&excludes).normalize(&input);
        prop_assert_eq!(&out, &expected);
        for e in &excludes {
            prop_assert!(!out.contains(e.as_str()), "{:?} still in {:?}", e, out);
        }
    }

    #[test]
    fn normalizer_never_grows_and_keeps_utf8(
        excludes in prop::collection::vec("[abกข]{0,3}", 0..4),
        text in "[abกข ]{0,24}",
    ) {
        let normalizer = TextNormalizer::new(&excludes);
        let out = normalizer.normalize(&text);
        prop_assert!(out.len() <= text.len());
        if excludes.iter().all(|e| e.is_empty()) {
            prop_assert_eq!(out, text);
        }
    }

    #[test]
    fn ngram_sequence_matches_enumeration(
        tokens in prop::collection::vec("[a-z]{1,3}", 0..12),
        min_gram in 1usize..5,
        extra in 0usize..3,
    ) {
        let max_gram = min_gram + extra;
        let generator = NGramGenerator::new(GramRange::new(min_gram, max_gram).unwrap(), accept_all).unwrap();

        let mut expected = Vec::new();
        for start in 0..tokens.len() {
            for len in min_gram..=max_gram {
                if start + len > tokens.len() {
                    break;
                }
                expected.push(tokens[start..start + len].concat());
            }
        }

        let n = tokens.len();
        let count: usize = (0..n)
            .map(|i| (max_gram.min(n - i) + 1).saturating_sub(min_gram))
            .sum();

        let grams = generator.grams(&tokens);
        prop_assert_eq!(grams.len(), count);
        prop_assert_eq!(grams, expected);
    }

    #[test]
    fn dedup_leaves_no_near_equal_substring_pair(
        grams in nested_gram_list(),
        diff_ratio in 0.0f64..=1.0,
        parallel in any::<bool>(),
    ) {
        let survivors = dedup(grams.clone(), diff_ratio, parallel);
        prop_assert!(survivors.len() <= grams.len());
        // a survivor was never marked, so its own detection pass ran in full
        for outer in &survivors {
            for inner in &survivors {
                if inner.text == outer.text || !outer.text.contains(inner.text.as_str()) {
                    continue;
                }
                if let Some(diff) = relative_diff(outer.count, inner.count) {
                    prop_assert!(
                        diff >= diff_ratio,
                        "{} inside {} survived with diff {}",
                        inner,
                        outer,
                        diff
                    );
                }
            }
        }
    }

    #[test]
    fn summary_is_bounded_and_sorted(grams in gram_list(), size in 1usize..10) {
        let total = grams.len();
        let summary = summarize(grams, size).unwrap();
        prop_assert_eq!(summary.len(), size.min(total));
        for pair in summary.grams().windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }

    #[test]
    fn summarizer_output_is_bounded(grams in gram_list(), size in 1usize..6) {
        let summarizer = Summarizer::new(SummaryConfig::with_size(size)).unwrap();
        let total = grams.len();
        let summary = summarizer.run(grams);
        prop_assert!(summary.len() <= size.min(total));
    }

    #[test]
    fn similarity_survivors_are_pairwise_distinct(grams in gram_list(), ratio in 0.0f64..=1.0) {
        let kept = filter_similarity(&grams, ratio);
        prop_assert!(kept.len() <= grams.len());
        if let Some(last) = grams.last() {
            prop_assert_eq!(kept.last(), Some(last));
        }
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                prop_assert!(dice_coefficient(&a.text, &b.text) <= ratio);
            }
        }
    }

    #[test]
    fn dice_is_symmetric_and_bounded(a in "[abก ]{0,8}", b in "[abก ]{0,8}") {
        let ab = dice_coefficient(&a, &b);
        prop_assert_eq!(ab, dice_coefficient(&b, &a));
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn automaton_agrees_with_naive_scan(
        patterns in prop::collection::vec("[abก]{0,3}", 0..8),
        hay in "[abก]{0,16}",
    ) {
        let ac = Automaton::build(&patterns);
        let mut found: Vec<_> = ac
            .find_iter(hay.as_bytes())
            .map(|m| (m.pattern, m.start, m.end))
            .collect();
        found.sort();
        prop_assert_eq!(found, naive_matches(&patterns, &hay));
    }
}
