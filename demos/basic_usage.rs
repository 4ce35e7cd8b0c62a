//! Basic logger usage example
//!
//! Demonstrates building a logger, deriving per-user loggers and reading
//! back the enriched records from an in-memory writer.
//!
//! Run with: cargo run --example basic_usage

use context_logger::prelude::*;
use context_logger::{error, info};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Context Logger - Basic Usage Example ===\n");

    let writer = Arc::new(MemoryLogWriter::new());
    let logger = ContextLogger::builder(writer.clone())
        .application_id("com.example.demo")
        .tag("demo")
        .timestamp_format(TimestampFormat::Iso8601)
        .build();

    println!("1. Logging at every level:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Deriving a logger for one user:");
    let session = logger.with_user_id("user-42");
    info!(session, "Signed in from {}", "10.0.0.7");

    let failure = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "token expired");
    error!(session, err = failure, "Refresh failed after {} attempts", 3);

    for record in writer.records() {
        println!("   [{}] {}", record.level, record.context);
    }

    println!("\n3. Record as JSON:");
    if let Some(last) = writer.last() {
        println!("{}", last.to_json_pretty()?);
    }

    println!("\n4. Forcing an upload:");
    logger.force_log_upload().wait()?;
    println!("   uploads requested: {}", writer.upload_count());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
