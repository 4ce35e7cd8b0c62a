//! Channel writer example
//!
//! Demonstrates handing records to a consumer thread that batches them and
//! answers forced uploads once everything before the request is persisted.
//!
//! Run with: cargo run --example channel_writer

use context_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Context Logger - Channel Writer Example ===\n");

    let (writer, events) = ChannelLogWriter::bounded(1024);

    let consumer = thread::spawn(move || {
        let mut batch = Vec::new();
        for event in events {
            match event {
                WriterEvent::Record(record) => batch.push(record),
                WriterEvent::Flush(notifier) => {
                    println!("   uploading {} records", batch.len());
                    for record in batch.drain(..) {
                        println!("     {} {}", record.level, record.context.format_fields());
                    }
                    notifier.succeed();
                }
            }
        }
        batch.len()
    });

    let logger = ContextLogger::for_application("com.example.channel", Arc::new(writer));

    let workers: Vec<_> = (0..3)
        .map(|i| {
            let worker = logger.with_tag(format!("worker-{}", i));
            thread::spawn(move || {
                for n in 0..3 {
                    worker.info(&format!("step {}", n));
                }
            })
        })
        .collect();

    for worker in workers {
        let _ = worker.join();
    }

    logger
        .force_log_upload()
        .wait_timeout(Duration::from_secs(5))?;

    logger.info("written after the upload");
    drop(logger);

    let leftover = consumer.join().unwrap_or_default();
    println!("\n   records left unuploaded at shutdown: {}", leftover);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
