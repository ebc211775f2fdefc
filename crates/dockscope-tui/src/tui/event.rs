use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEventKind,
};
use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Terminal events
#[derive(Clone, Debug)]
pub enum Event {
    /// Terminal tick (for periodic updates)
    Tick,
    /// Key press event
    Key(KeyEvent),
    /// Mouse wheel scrolled up over the viewport
    WheelUp,
    /// Mouse wheel scrolled down over the viewport
    WheelDown,
    /// Terminal resize
    Resize(u16, u16),
    /// Error occurred
    Error(String),
}

impl Event {
    /// Translate a crossterm event, dropping the ones we ignore
    fn from_crossterm(evt: CrosstermEvent) -> Option<Self> {
        match evt {
            // Only presses; release events also arrive on Windows
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => Some(Self::WheelUp),
                MouseEventKind::ScrollDown => Some(Self::WheelDown),
                _ => None,
            },
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Pumps terminal input and ticks into a channel
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        tokio::spawn(pump(sender, cancel.clone(), tick_rate));

        Self { receiver, cancel }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }

    /// Shutdown the event handler
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

async fn pump(
    sender: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
    tick_rate: Duration,
) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,

            _ = ticks.tick() => {
                if sender.send(Event::Tick).is_err() {
                    break;
                }
            }

            maybe_event = reader.next().fuse() => match maybe_event {
                Some(Ok(evt)) => {
                    if let Some(event) = Event::from_crossterm(evt) {
                        let _ = sender.send(event);
                    }
                }
                Some(Err(e)) => {
                    let _ = sender.send(Event::Error(e.to_string()));
                }
                None => break,
            }
        }
    }
}
