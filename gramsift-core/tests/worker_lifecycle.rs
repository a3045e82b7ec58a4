use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, RecvTimeoutError};
use gramsift_core::analyzer::{NGramGenerator, NGramWorker, Splitter, TextNormalizer, Tokenizer};
use gramsift_core::pipeline::TextPipeline;
use gramsift_types::GramRange;

fn accept_all(_: &str) -> bool {
    true
}

fn letters(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn output_closes_after_pending_grams_are_delivered() {
    let generator = NGramGenerator::new(GramRange::new(1, 4).unwrap(), accept_all).unwrap();
    let (batch_tx, batch_rx) = bounded(4);
    let (gram_tx, gram_rx) = bounded(0);
    let handle = generator.spawn(batch_rx, gram_tx).unwrap();

    let producer = thread::spawn(move || {
        batch_tx.send(letters(&["A", "B", "C", "D", "E", "F"])).unwrap();
        // batch_tx dropped here: input closed
    });

    let grams: Vec<String> = gram_rx.iter().collect();
    assert_eq!(
        grams,
        vec![
            "A", "AB", "ABC", "ABCD", "B", "BC", "BCD", "BCDE", "C", "CD", "CDE", "CDEF", "D",
            "DE", "DEF", "E", "EF", "F"
        ]
    );
    assert_eq!(
        gram_rx.recv_timeout(Duration::from_millis(10)),
        Err(RecvTimeoutError::Disconnected)
    );

    producer.join().unwrap();
    let stats = handle.join().unwrap();
    assert!(!stats.disconnected);
    assert_eq!(stats.batches, 1);
    assert_eq!(stats.grams, 18);
}

#[test]
fn worker_blocks_until_consumer_reads() {
    let generator = NGramGenerator::new(GramRange::new(2, 2).unwrap(), accept_all).unwrap();
    let mut worker = NGramWorker::start(generator).unwrap();

    assert!(worker.send(letters(&["A", "B", "C", "D", "E", "F"])));
    worker.close();
    assert!(!worker.send(letters(&["X"])));

    // rendezvous output: nothing is lost while the consumer is slow
    thread::sleep(Duration::from_millis(20));
    let mut grams = Vec::new();
    for gram in worker.grams().iter() {
        grams.push(gram);
    }
    assert_eq!(grams, vec!["AB", "BC", "CD", "DE", "EF"]);

    let stats = worker.join();
    assert_eq!(stats.grams, 5);
    assert!(!stats.disconnected);
}

#[test]
fn pipeline_feeds_worker_from_another_thread() {
    let pipeline = TextPipeline::new(
        TextNormalizer::new(["#"]),
        Splitter::pattern(r"[.\n]").unwrap(),
        Tokenizer::new(
            Splitter::whitespace(),
            [("Cats", "cat")],
            |t: &str| t != "the",
        ),
    );
    let generator = NGramGenerator::new(GramRange::new(1, 2).unwrap(), accept_all).unwrap();
    let mut worker = NGramWorker::start(generator).unwrap();
    let batches = worker.batch_sender().unwrap();
    worker.close();

    let grams: Vec<String> = thread::scope(|scope| {
        scope.spawn(|| {
            for batch in pipeline.batches("the #cats sleep. dogs bark") {
                batches.send(batch).unwrap();
            }
            drop(batches);
        });
        worker.grams().iter().collect()
    });

    assert_eq!(
        grams,
        vec!["cat", "catsleep", "sleep", "dogs", "dogsbark", "bark"]
    );
    let stats = worker.join();
    assert_eq!(stats.batches, 2);
}

#[test]
fn many_producers_share_one_worker() {
    let generator = NGramGenerator::new(GramRange::new(1, 1).unwrap(), accept_all).unwrap();
    let mut worker = NGramWorker::start(generator).unwrap();

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let tx = worker.batch_sender().unwrap();
            thread::spawn(move || {
                for i in 0..10 {
                    tx.send(vec![format!("{p}-{i}")]).unwrap();
                }
            })
        })
        .collect();
    worker.close();

    let count = worker.grams().iter().count();
    for p in producers {
        p.join().unwrap();
    }
    assert_eq!(count, 40);
    assert_eq!(worker.join().batches, 40);
}

#[test]
fn queued_batches_never_block_the_consumer_thread() {
    let generator = NGramGenerator::new(GramRange::new(1, 1).unwrap(), accept_all).unwrap();
    let mut worker = NGramWorker::start(generator).unwrap();

    // everything queued before the first read, all on this thread
    for i in 0..64 {
        assert!(worker.send(vec![format!("t{i}")]));
    }
    worker.close();

    let grams: Vec<String> = worker.grams().iter().collect();
    assert_eq!(grams.len(), 64);
    assert_eq!(grams.first().map(String::as_str), Some("t0"));
    assert_eq!(grams.last().map(String::as_str), Some("t63"));
    assert_eq!(worker.join().batches, 64);
}
