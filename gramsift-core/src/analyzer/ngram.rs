//! N-gram generation.
//!
//! Joins consecutive tokens of a batch into gram candidates. For a batch
//! `[A, B, C, D]` with `min_gram = 1, max_gram = 3` the emitted sequence is
//!
//! ```text
//! A AB ABC  B BC BCD  C CD  D
//! ```
//!
//! grouped by start index, then by increasing length. Tokens are
//! concatenated with no separator.
//!
//! Two entry points share the same enumeration:
//! - [`NGramGenerator::generate`] runs inline with a callback
//! - [`NGramGenerator::spawn`] moves the generator onto a dedicated thread
//!   fed by one batch channel and draining into one gram channel
//!
//! ## Worker lifecycle
//!
//! The worker reads batches until every input sender is dropped and the
//! queue is drained, then drops its output sender and exits. Closing the
//! input is the only stop signal; there is no internal timeout. If the
//! consumer hangs up first the worker stops at its next emission.

use std::ops::ControlFlow;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use gramsift_types::{ConfigError, GramRange};
use tracing::{debug, trace};

/// Enumerates grams of a token batch.
///
/// Grams of length 1 bypass the filter; longer grams are emitted only if
/// the filter accepts them.
#[derive(Clone, Debug)]
pub struct NGramGenerator<F> {
    range: GramRange,
    filter: F,
}

impl<F> NGramGenerator<F>
where
    F: Fn(&str) -> bool,
{
    /// Creates a generator.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidGramRange` unless `1 <= min <= max`.
    pub fn new(range: GramRange, filter: F) -> Result<Self, ConfigError> {
        range.validate()?;
        Ok(Self { range, filter })
    }

    /// The configured bounds.
    #[inline]
    pub fn range(&self) -> GramRange {
        self.range
    }

    /// Emits every gram of `tokens`, stopping early if `emit` breaks.
    pub fn generate<S, E>(&self, tokens: &[S], mut emit: E) -> ControlFlow<()>
    where
        S: AsRef<str>,
        E: FnMut(String) -> ControlFlow<()>,
    {
        let GramRange { min_gram, max_gram } = self.range;

        for start in 0..tokens.len() {
            let mut gram = String::from(tokens[start].as_ref());
            if min_gram < 2 {
                emit(gram.clone())?;
            }

            for end in start + 1..tokens.len() {
                let len = end - start + 1;
                if len > max_gram {
                    break;
                }
                gram.push_str(tokens[end].as_ref());
                if self.range.contains(len) && (self.filter)(&gram) {
                    emit(gram.clone())?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Collects every gram of `tokens`.
    pub fn grams<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        let mut out = Vec::new();
        let _ = self.generate(tokens, |g| {
            out.push(g);
            ControlFlow::Continue(())
        });
        out
    }
}

/// Totals reported by a worker when it exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Batches received.
    pub batches: u64,
    /// Grams delivered to the consumer.
    pub grams: u64,
    /// `true` if the worker stopped because the consumer hung up.
    pub disconnected: bool,
}

impl<F> NGramGenerator<F>
where
    F: Fn(&str) -> bool + Send + 'static,
{
    /// Runs the generator on a dedicated thread.
    ///
    /// Every gram is handed to `output` with a blocking send, so a
    /// zero-capacity output channel gives synchronous handoff and a slow
    /// consumer throttles generation.
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn(
        self,
        input: Receiver<Vec<String>>,
        output: Sender<String>,
    ) -> std::io::Result<JoinHandle<WorkerStats>> {
        thread::Builder::new()
            .name("ngram-worker".into())
            .spawn(move || self.run(input, output))
    }

    fn run(self, input: Receiver<Vec<String>>, output: Sender<String>) -> WorkerStats {
        debug!(
            min_gram = self.range.min_gram,
            max_gram = self.range.max_gram,
            "ngram worker started"
        );
        let mut stats = WorkerStats::default();

        for batch in input.iter() {
            stats.batches += 1;
            trace!(tokens = batch.len(), "ngram batch received");

            let flow = self.generate(&batch, |gram| match output.send(gram) {
                Ok(()) => {
                    stats.grams += 1;
                    ControlFlow::Continue(())
                }
                Err(_) => ControlFlow::Break(()),
            });

            if flow.is_break() {
                stats.disconnected = true;
                debug!(batches = stats.batches, "ngram consumer hung up, stopping");
                break;
            }
        }

        drop(output);
        debug!(
            batches = stats.batches,
            grams = stats.grams,
            "ngram worker finished"
        );
        stats
    }
}

/// A running generator together with both ends of its channels.
///
/// ```
/// use gramsift_core::analyzer::{NGramGenerator, NGramWorker};
/// use gramsift_types::GramRange;
///
/// let generator = NGramGenerator::new(GramRange::new(2, 2).unwrap(), |_: &str| true).unwrap();
/// let mut worker = NGramWorker::start(generator).unwrap();
///
/// worker.send(vec!["a".into(), "b".into(), "c".into()]);
/// worker.close();
///
/// let grams: Vec<String> = worker.grams().iter().collect();
/// assert_eq!(grams, vec!["ab", "bc"]);
/// worker.join();
/// ```
pub struct NGramWorker {
    batches: Option<Sender<Vec<String>>>,
    grams: Receiver<String>,
    handle: JoinHandle<WorkerStats>,
}

impl NGramWorker {
    /// Spawns `generator` with an unbounded batch queue and a zero-capacity
    /// gram channel.
    ///
    /// The queue never blocks [`send`](Self::send), so batches can be
    /// queued and read back on the same thread. Backpressure comes from
    /// the gram channel alone.
    ///
    /// # Errors
    /// Returns the OS error if the thread cannot be spawned.
    pub fn start<F>(generator: NGramGenerator<F>) -> std::io::Result<Self>
    where
        F: Fn(&str) -> bool + Send + 'static,
    {
        let (batch_tx, batch_rx) = unbounded();
        let (gram_tx, gram_rx) = bounded(0);
        let handle = generator.spawn(batch_rx, gram_tx)?;
        Ok(Self {
            batches: Some(batch_tx),
            grams: gram_rx,
            handle,
        })
    }

    /// Queues a batch without blocking. Returns `false` if the input was
    /// already closed or the worker has exited.
    pub fn send(&self, batch: Vec<String>) -> bool {
        match &self.batches {
            Some(tx) => tx.send(batch).is_ok(),
            None => false,
        }
    }

    /// A sender for feeding batches from another thread. The input only
    /// closes once every clone is dropped as well.
    pub fn batch_sender(&self) -> Option<Sender<Vec<String>>> {
        self.batches.clone()
    }

    /// Closes this handle's input sender.
    pub fn close(&mut self) {
        self.batches = None;
    }

    /// The gram channel. Iterating it ends once the worker has exited.
    #[inline]
    pub fn grams(&self) -> &Receiver<String> {
        &self.grams
    }

    /// Closes the input, waits for the worker and returns its totals.
    ///
    /// Grams not yet consumed are discarded: dropping the receiver makes
    /// the worker stop at its next emission.
    pub fn join(self) -> WorkerStats {
        let Self {
            batches,
            grams,
            handle,
        } = self;
        drop(batches);
        drop(grams);
        match handle.join() {
            Ok(stats) => stats,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
