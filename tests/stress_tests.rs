//! Stress tests for shared writers and derived loggers
//!
//! These tests verify:
//! - Per-thread call order is preserved under concurrent logging
//! - Concurrent forced uploads each resolve exactly once
//! - A bounded channel writer never blocks callers when its consumer stalls

use context_logger::core::fields;
use context_logger::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

/// Each thread's records reach the writer in the order that thread issued them
#[test]
fn test_per_thread_order_under_contention() {
    let writer = Arc::new(MemoryLogWriter::new());
    let root = ContextLogger::for_application("stress", writer.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = root.extend_context([("worker", t.to_string())]);
            std::thread::spawn(move || {
                for n in 0..PER_THREAD {
                    logger.info(&n.to_string());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let mut last_seen: HashMap<String, i64> = HashMap::new();
    for record in writer.records() {
        let worker = record.get("worker").expect("worker field").to_string();
        let n: i64 = record.message().unwrap().parse().unwrap();
        let previous = last_seen.insert(worker.clone(), n).unwrap_or(-1);
        assert_eq!(n, previous + 1, "worker {} out of order", worker);
        assert_eq!(record.get(fields::APPLICATION_ID), Some("stress"));
    }

    assert_eq!(last_seen.len(), THREADS);
    assert_eq!(writer.len(), THREADS * PER_THREAD);
    assert_eq!(root.metrics().records_written(), (THREADS * PER_THREAD) as u64);
}

/// Concurrent upload requests are forwarded individually and all resolve
#[cfg(feature = "channel")]
#[test]
fn test_concurrent_uploads_resolve_once_each() {
    let (writer, events) = ChannelLogWriter::unbounded();
    let answered = Arc::new(AtomicUsize::new(0));
    let answered_clone = Arc::clone(&answered);

    let consumer = std::thread::spawn(move || {
        for event in events {
            if let WriterEvent::Flush(notifier) = event {
                answered_clone.fetch_add(1, Ordering::SeqCst);
                notifier.succeed();
            }
        }
    });

    let root = ContextLogger::for_application("stress", Arc::new(writer));
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = root.with_user_id(format!("user-{}", t));
            std::thread::spawn(move || {
                for _ in 0..10 {
                    logger.info("before upload");
                    logger
                        .force_log_upload()
                        .wait_timeout(Duration::from_secs(5))
                        .expect("upload resolved");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked");
    }
    assert_eq!(root.metrics().uploads_requested(), (THREADS * 10) as u64);

    drop(root);
    consumer.join().expect("consumer panicked");
    assert_eq!(answered.load(Ordering::SeqCst), THREADS * 10);
}

/// A stalled consumer costs dropped records, never a blocked caller
#[cfg(feature = "channel")]
#[test]
fn test_stalled_consumer_never_blocks() {
    let (writer, events) = ChannelLogWriter::bounded(16);
    let writer = Arc::new(writer);
    let logger = ContextLogger::for_application("stress", writer.clone());

    let start = std::time::Instant::now();
    for i in 0..10_000 {
        logger.debug(&format!("flood {}", i));
    }
    let upload = logger.force_log_upload();
    assert!(start.elapsed() < Duration::from_secs(5));

    assert_eq!(writer.pending(), 16);
    assert_eq!(writer.dropped_count(), 10_000 - 16);
    assert!(matches!(
        upload.wait_timeout(Duration::from_secs(1)),
        Err(LoggerError::QueueFull { .. })
    ));
    assert_eq!(logger.metrics().writer_panics(), 0);

    drop(events);
}
