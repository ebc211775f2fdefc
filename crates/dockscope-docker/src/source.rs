use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use thiserror::Error;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::debug;

use dockscope_types::TargetIdentity;

use crate::Endpoints;

/// Raw records as delivered by the transport, in order, until closed
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<String, SourceError>> + Send>>;

/// Errors raised while establishing or reading a record stream
///
/// These never reach the UI; the connection manager downgrades them to a
/// `Closed` status.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

/// Supplies the raw record stream for a target
///
/// Implementations hand back one record per item, in delivery order,
/// ending the stream when the remote side closes.
#[async_trait]
pub trait LogSource: Send + Sync + 'static {
    async fn connect(&self, target: &TargetIdentity) -> Result<RecordStream, SourceError>;
}

/// WebSocket-backed log source talking to a dockscope agent
#[derive(Clone, Debug, Default)]
pub struct WsLogSource {
    endpoints: Endpoints,
}

impl WsLogSource {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl LogSource for WsLogSource {
    async fn connect(&self, target: &TargetIdentity) -> Result<RecordStream, SourceError> {
        let url = self.endpoints.container_logs(target);
        let (ws, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        debug!("websocket connected: {}", url);

        let records = ws.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text)),
                Ok(Message::Binary(bytes)) => {
                    Some(Ok(String::from_utf8_lossy(&bytes).into_owned()))
                }
                // Control frames carry no records; the stream itself ends
                // once the close handshake completes.
                Ok(_) => None,
                Err(e) => Some(Err(SourceError::from(e))),
            }
        });

        Ok(Box::pin(records))
    }
}
