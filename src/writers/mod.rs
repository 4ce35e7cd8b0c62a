//! Log writer implementations

pub mod memory;

#[cfg(feature = "channel")]
pub mod channel;

pub use memory::MemoryLogWriter;

#[cfg(feature = "channel")]
pub use channel::{ChannelLogWriter, WriterEvent};

// Re-export the trait for convenience
pub use crate::core::LogWriter;
