use std::sync::Arc;

use futures::StreamExt;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use dockscope_docker::LogSource;
use dockscope_types::{ConnectionStatus, TargetIdentity};

use crate::{LineParser, LogBuffer};

/// Notifications emitted towards the render loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamEvent {
    /// Connection status changed
    StatusChanged(ConnectionStatus),
    /// A parsed entry was appended to the buffer
    EntryAppended,
}

/// Owns the log stream connection lifecycle for one target at a time
///
/// At most one connection is live per manager. Opening a new target
/// first retires the previous connection completely (the stream task is
/// cancelled and awaited) and clears the buffer, so records from two
/// generations never interleave. Transport failures surface only as a
/// `Closed` status; reconnection happens exclusively through a new
/// `open` call.
pub struct ConnectionManager<S> {
    source: Arc<S>,
    parser: LineParser,
    buffer: LogBuffer,
    status: Arc<RwLock<ConnectionStatus>>,
    events: mpsc::UnboundedSender<StreamEvent>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    target: Option<TargetIdentity>,
}

impl<S: LogSource> ConnectionManager<S> {
    pub fn new(
        source: S,
        parser: LineParser,
        buffer: LogBuffer,
        events: mpsc::UnboundedSender<StreamEvent>,
    ) -> Self {
        Self {
            source: Arc::new(source),
            parser,
            buffer,
            status: Arc::new(RwLock::new(ConnectionStatus::Uninitialized)),
            events,
            cancel: CancellationToken::new(),
            task: None,
            target: None,
        }
    }

    /// Current connection status
    pub fn status(&self) -> ConnectionStatus {
        *self.status.read()
    }

    /// Target of the current (or last) connection
    pub fn target(&self) -> Option<&TargetIdentity> {
        self.target.as_ref()
    }

    /// Start following a target, replacing any existing connection
    ///
    /// The previous connection is fully retired and the buffer cleared
    /// before the new generation starts. Status flips to `Connecting`
    /// before any network I/O is attempted.
    pub async fn open(&mut self, target: TargetIdentity) {
        self.retire().await;
        self.buffer.clear();

        self.set_status(ConnectionStatus::Connecting);
        debug!("opening log stream for {}", target);
        self.target = Some(target.clone());

        let cancel = self.cancel.clone();
        let ctx = StreamContext {
            source: Arc::clone(&self.source),
            parser: self.parser,
            buffer: self.buffer.clone(),
            status: Arc::clone(&self.status),
            events: self.events.clone(),
        };
        self.task = Some(tokio::spawn(async move {
            ctx.run(target, cancel).await;
        }));
    }

    /// Close the current connection, if any
    ///
    /// Idempotent: closing a manager with no connection does nothing.
    pub async fn close(&mut self) {
        if self.task.is_none() {
            return;
        }
        self.retire().await;
        self.set_status(ConnectionStatus::Closed);
    }

    /// Cancel and await the current stream task, detaching its listeners
    ///
    /// Awaiting the handle is what guarantees no record of a retired
    /// generation can land in the buffer afterwards.
    async fn retire(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        self.cancel = CancellationToken::new();
    }

    fn set_status(&self, status: ConnectionStatus) {
        *self.status.write() = status;
        let _ = self.events.send(StreamEvent::StatusChanged(status));
    }
}

impl<S> Drop for ConnectionManager<S> {
    fn drop(&mut self) {
        // Best effort teardown; retire() cannot be awaited here
        self.cancel.cancel();
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// State the stream task needs, detached from the manager itself
struct StreamContext<S> {
    source: Arc<S>,
    parser: LineParser,
    buffer: LogBuffer,
    status: Arc<RwLock<ConnectionStatus>>,
    events: mpsc::UnboundedSender<StreamEvent>,
}

impl<S: LogSource> StreamContext<S> {
    async fn run(self, target: TargetIdentity, cancel: CancellationToken) {
        let mut records = tokio::select! {
            _ = cancel.cancelled() => return,

            connected = self.source.connect(&target) => match connected {
                Ok(stream) => stream,
                Err(e) => {
                    debug!("failed to open log stream for {}: {}", target, e);
                    self.set_status(ConnectionStatus::Closed);
                    return;
                }
            }
        };

        self.set_status(ConnectionStatus::Open);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,

                record = records.next() => match record {
                    Some(Ok(raw)) => {
                        self.buffer.push(self.parser.parse(&raw));
                        let _ = self.events.send(StreamEvent::EntryAppended);
                    }
                    Some(Err(e)) => {
                        debug!("log stream for {} failed: {}", target, e);
                        self.set_status(ConnectionStatus::Closed);
                        break;
                    }
                    None => {
                        debug!("log stream for {} ended", target);
                        self.set_status(ConnectionStatus::Closed);
                        break;
                    }
                }
            }
        }
    }

    fn set_status(&self, status: ConnectionStatus) {
        *self.status.write() = status;
        let _ = self.events.send(StreamEvent::StatusChanged(status));
    }
}
