//! Trending Phrase Benchmarking Tool
//!
//! Runs the whole extraction and summarization path over a text file and
//! reports how long each stage takes. Every line of the file is treated as
//! one document (a post, a comment, a headline).
//!
//! ## What It Measures
//!
//! 1. **Extraction**: normalization, splitting and tokenization on a
//!    producer thread, n-gram generation on the worker thread, and counting
//!    on the main thread
//! 2. **Summarization**: subset dedup, similarity filter and ranking
//!
//! Counting happens in memory here; in production a separate counting
//! backend aggregates the gram stream.
//!
//! ## Usage
//!
//! ```bash
//! # Top 10 phrases of up to 4 tokens
//! ./target/release/trend_bench /path/to/posts.txt
//!
//! # Top 25 phrases of up to 3 tokens
//! ./target/release/trend_bench /path/to/posts.txt 25 3
//!
//! # Show per-stage debug events
//! RUST_LOG=gramsift_core=debug ./target/release/trend_bench /path/to/posts.txt
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Extraction ===
//! --------------------------------
//! Elapsed     : 0.412 s
//! Throughput  : 96.31 MiB/s
//! Batches     : 1_204_511
//! Grams       : 9_875_220
//! Distinct    : 2_310_402
//! --------------------------------
//! ```

use std::env;
use std::error::Error;
use std::fs;
use std::thread;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gramsift_core::analyzer::{NGramGenerator, NGramWorker, Splitter, TextNormalizer, Tokenizer};
use gramsift_core::pipeline::TextPipeline;
use gramsift_core::rank::Summarizer;
use gramsift_types::{GramCount, GramRange, SummaryConfig};

const DEFAULT_SIZE: usize = 10;
const DEFAULT_MAX_GRAM: usize = 4;
const MAX_GRAM_CHARS: usize = 48;

type BenchPipeline = TextPipeline<Splitter, fn(&str) -> bool>;

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: trend_bench <path> [size] [max_gram]");
        std::process::exit(1);
    }

    let path = &args[1];
    let size = match args.get(2) {
        Some(s) => s.parse()?,
        None => DEFAULT_SIZE,
    };
    let max_gram = match args.get(3) {
        Some(s) => s.parse()?,
        None => DEFAULT_MAX_GRAM,
    };

    let summarizer = Summarizer::new(SummaryConfig::with_size(size))?;
    let range = GramRange::unigrams_to(max_gram)?;

    println!("Loading file...");
    let input = fs::read_to_string(path)?;
    println!("File size: {}", fmt_bytes(input.len() as u64));
    println!("Lines:     {}\n", fmt_count(input.lines().count() as u64));

    let pipeline = build_pipeline()?;

    println!("=== Extraction ===");
    let started = Instant::now();
    let (counts, batches, grams) = extract(&input, &pipeline, range)?;
    let elapsed = started.elapsed();
    print_extraction(input.len(), elapsed, batches, grams, counts.len() as u64);

    let mut candidates: Vec<GramCount> = counts.into_iter().map(GramCount::from).collect();
    // hash order is arbitrary; fix one so runs are comparable
    candidates.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));

    println!("=== Summarization ===");
    let started = Instant::now();
    let summary = summarizer.run(candidates);
    let elapsed = started.elapsed();
    println!("--------------------------------");
    println!("Elapsed     : {:.3} s", elapsed.as_secs_f64());
    println!("Kept        : {}", summary.len());
    println!("--------------------------------\n");

    for (rank, g) in summary.grams().iter().enumerate() {
        println!("{:>3}. {:<40} {}", rank + 1, g.text, fmt_count(g.count));
    }
    println!();
    println!("{}", summary.to_json());

    Ok(())
}

fn build_pipeline() -> Result<BenchPipeline, Box<dyn Error>> {
    Ok(TextPipeline::new(
        TextNormalizer::new(["http://", "https://", "www.", "\u{200b}"]),
        Splitter::pattern(r"[\n.,!?;:()\[\]\x22]+")?,
        Tokenizer::new(
            Splitter::whitespace(),
            Vec::<(&str, &str)>::new(),
            has_word_char as fn(&str) -> bool,
        ),
    ))
}

fn has_word_char(token: &str) -> bool {
    token.chars().any(char::is_alphanumeric)
}

fn short_enough(gram: &str) -> bool {
    gram.chars().count() <= MAX_GRAM_CHARS
}

/// Feeds every line through the pipeline and the worker; counts the
/// resulting grams. Returns the counts, the batch total and the gram total.
fn extract(
    input: &str,
    pipeline: &BenchPipeline,
    range: GramRange,
) -> Result<(FxHashMap<String, u64>, u64, u64), Box<dyn Error>> {
    let generator = NGramGenerator::new(range, short_enough)?;
    let mut worker = NGramWorker::start(generator)?;
    let Some(batches) = worker.batch_sender() else {
        return Err("worker input closed before start".into());
    };
    worker.close();

    let mut counts: FxHashMap<String, u64> = FxHashMap::default();
    let mut grams = 0u64;

    thread::scope(|scope| {
        scope.spawn(move || {
            for line in input.lines() {
                for batch in pipeline.batches(line) {
                    if batches.send(batch).is_err() {
                        return;
                    }
                }
            }
        });

        for gram in worker.grams().iter() {
            grams += 1;
            *counts.entry(gram).or_insert(0) += 1;
        }
    });

    let stats = worker.join();
    info!(
        batches = stats.batches,
        grams = stats.grams,
        distinct = counts.len(),
        "extraction finished"
    );
    Ok((counts, stats.batches, grams))
}

fn print_extraction(input_bytes: usize, elapsed: Duration, batches: u64, grams: u64, distinct: u64) {
    let secs = elapsed.as_secs_f64();
    let mib = input_bytes as f64 / (1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.2} MiB/s", mib / secs);
    println!("Batches     : {}", fmt_count(batches));
    println!("Grams       : {}", fmt_count(grams));
    println!("Distinct    : {}", fmt_count(distinct));
    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 * 1024 {
        format!("{:.2} GiB", b as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
