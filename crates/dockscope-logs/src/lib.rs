//! Log processing for dockscope
//!
//! This crate provides line parsing, buffering, filtering, and the
//! connection lifecycle for a single container log stream.

mod buffer;
mod filter;
mod parser;
mod stream;

pub use buffer::{DEFAULT_CAPACITY, LogBuffer};
pub use filter::CompiledFilter;
pub use parser::{LineParser, RECORD_DELIMITER};
pub use stream::{ConnectionManager, StreamEvent};

// Re-export types used in our public API
pub use dockscope_types::{ConnectionStatus, LogEntry, TargetIdentity};
