//! Phrase extraction and summarization core.
//!
//! Text flows through two halves joined by an external counting step:
//!
//! ```text
//! raw text ─► TextNormalizer ─► Splitter ─► Tokenizer ─► token batches
//!          ─► NGramWorker ─► gram stream ─► (counting) ─► GramCount list
//!          ─► subset dedup ─► similarity filter ─► Summary (JSON)
//! ```
//!
//! - [`analyzer`]: normalization, fragment splitting, tokenization and
//!   n-gram generation
//! - [`pipeline`]: the three text stages composed into one value
//! - [`index`]: the build-once substring automaton over gram texts
//! - [`rank`]: redundancy removal, near-duplicate filtering and ranking
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod analyzer;
pub mod index;
pub mod pipeline;
pub mod rank;

pub use analyzer::{NGramGenerator, NGramWorker, Splitter, TextNormalizer, Tokenizer};
pub use index::{Automaton, GramDict};
pub use pipeline::TextPipeline;
pub use rank::{Summarizer, Summary};

pub use gramsift_types::{
    ConfigError, GramCount, GramRange, PatternId, SimilarityScope, SummaryConfig,
};
