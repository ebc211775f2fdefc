//! Shared types for dockscope
//!
//! This crate contains data structures used across multiple dockscope crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a log stream connection
///
/// The value is monotonic within one connection's lifetime
/// (Uninitialized → Connecting → Open → Closed) and resets to
/// `Connecting` whenever a new connection attempt starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No connection has ever been attempted
    #[default]
    Uninitialized,
    /// A connection attempt is in flight
    Connecting,
    /// The stream is live and delivering records
    Open,
    /// The connection ended (remote close, local close, or error)
    Closed,
}

impl ConnectionStatus {
    /// Short display string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "idle",
            Self::Connecting => "connecting",
            Self::Open => "connected",
            Self::Closed => "closed",
        }
    }

    /// Whether a connection attempt or live stream exists
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Connecting | Self::Open)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key selecting which remote container stream is being followed
///
/// A change in either field invalidates the current connection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetIdentity {
    pub server_id: String,
    pub container_id: String,
}

impl TargetIdentity {
    pub fn new(server_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            container_id: container_id.into(),
        }
    }
}

impl fmt::Display for TargetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.server_id, self.container_id)
    }
}

/// A single parsed log entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Timestamp component of the record; empty when the record did not
    /// carry a conforming one
    pub timestamp: String,

    /// Message content
    pub content: String,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            content: content.into(),
        }
    }

    pub fn has_timestamp(&self) -> bool {
        !self.timestamp.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_monotonic_labels() {
        assert_eq!(ConnectionStatus::Uninitialized.as_str(), "idle");
        assert_eq!(ConnectionStatus::Open.as_str(), "connected");
        assert!(ConnectionStatus::Connecting.is_live());
        assert!(!ConnectionStatus::Closed.is_live());
    }

    #[test]
    fn test_target_identity_display() {
        let target = TargetIdentity::new("prod-1", "a1b2c3");
        assert_eq!(target.to_string(), "prod-1/a1b2c3");
    }

    #[test]
    fn test_target_identity_change_detection() {
        let a = TargetIdentity::new("prod-1", "a1b2c3");
        let same = TargetIdentity::new("prod-1", "a1b2c3");
        let other_container = TargetIdentity::new("prod-1", "d4e5f6");
        let other_server = TargetIdentity::new("prod-2", "a1b2c3");

        assert_eq!(a, same);
        assert_ne!(a, other_container);
        assert_ne!(a, other_server);
    }
}
