//! Docker agent boundary for dockscope
//!
//! This crate talks to a dockscope agent: it builds the per-container
//! WebSocket endpoints and exposes the raw record stream behind the
//! [`LogSource`] trait.

mod endpoints;
mod source;

pub use endpoints::{DEFAULT_ENDPOINT, Endpoints};
pub use source::{LogSource, RecordStream, SourceError, WsLogSource};

// Re-export types used in our public API
pub use dockscope_types::TargetIdentity;
