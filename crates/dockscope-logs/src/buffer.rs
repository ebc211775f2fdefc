use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use dockscope_types::LogEntry;

/// Default number of entries retained for display
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded buffer holding the most recent log entries
///
/// Keeps only the last `capacity` entries ever appended; the oldest is
/// evicted first when the bound would be exceeded. Readers only ever see
/// owned snapshots, and entries are never mutated after insertion.
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    /// Create a new log buffer with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest if at capacity
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Owned snapshot of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.read().iter().cloned().collect()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current entry count
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Configured capacity bound
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: usize) -> LogEntry {
        LogEntry::new("12:00:00", format!("entry_{}", n))
    }

    #[test]
    fn test_bound_holds_after_every_push() {
        let buffer = LogBuffer::default();
        for n in 1..=250 {
            buffer.push(entry(n));
            assert!(buffer.len() <= DEFAULT_CAPACITY);
        }
    }

    #[test]
    fn test_fifo_eviction_keeps_last_hundred() {
        let buffer = LogBuffer::default();
        for n in 1..=150 {
            buffer.push(entry(n));
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 100);
        assert_eq!(snapshot.first().map(|e| e.content.as_str()), Some("entry_51"));
        assert_eq!(snapshot.last().map(|e| e.content.as_str()), Some("entry_150"));
        for (i, e) in snapshot.iter().enumerate() {
            assert_eq!(e.content, format!("entry_{}", 51 + i));
        }
    }

    #[test]
    fn test_under_capacity_keeps_everything_in_order() {
        let buffer = LogBuffer::default();
        for n in 1..=10 {
            buffer.push(entry(n));
        }

        let snapshot = buffer.snapshot();
        assert_eq!(snapshot.len(), 10);
        for (i, e) in snapshot.iter().enumerate() {
            assert_eq!(e.content, format!("entry_{}", i + 1));
        }
    }

    #[test]
    fn test_clear_behaves_like_fresh_buffer() {
        let buffer = LogBuffer::default();
        for n in 1..=150 {
            buffer.push(entry(n));
        }
        buffer.clear();
        assert!(buffer.is_empty());

        for n in 1..=3 {
            buffer.push(entry(n));
        }
        let fresh = LogBuffer::default();
        for n in 1..=3 {
            fresh.push(entry(n));
        }
        assert_eq!(buffer.snapshot(), fresh.snapshot());
    }

    #[test]
    fn test_custom_capacity() {
        let buffer = LogBuffer::new(3);
        for n in 1..=5 {
            buffer.push(entry(n));
        }
        let contents: Vec<_> = buffer.snapshot().into_iter().map(|e| e.content).collect();
        assert_eq!(contents, vec!["entry_3", "entry_4", "entry_5"]);
    }

    #[test]
    fn test_snapshot_is_detached_from_buffer() {
        let buffer = LogBuffer::default();
        buffer.push(entry(1));
        let snapshot = buffer.snapshot();
        buffer.push(entry(2));
        assert_eq!(snapshot.len(), 1);
    }
}
