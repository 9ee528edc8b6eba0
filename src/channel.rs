//! Notification channel abstraction.
//!
//! Signals flow into the coordinator through an unbounded tokio queue whose receiving half the
//! channel hands over once; outcomes flow back out through [`NotificationChannel::emit`].

use log::trace;
use parking_lot::Mutex;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::render::protocol::{Notification, Signal};

/// Core trait for the publish/subscribe transport between the host page and the coordinator.
pub trait NotificationChannel: Send + Sync {
    /// Publish a coordinator outcome
    fn emit(&self, notification: Notification);

    /// Take the stream of subscribed signals. Yields `None` once it has been taken.
    fn take_signals(&self) -> Option<UnboundedReceiver<Signal>>;
}

/// In-process channel that records every emitted notification.
pub struct LocalChannel {
    signal_tx: Mutex<Option<UnboundedSender<Signal>>>,
    signal_rx: Mutex<Option<UnboundedReceiver<Signal>>>,
    emitted: Mutex<Vec<Notification>>,
}

impl Default for LocalChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalChannel {
    pub fn new() -> Self {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            signal_tx: Mutex::new(Some(signal_tx)),
            signal_rx: Mutex::new(Some(signal_rx)),
            emitted: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a signal to whoever took the signal stream.
    ///
    /// Returns false once the channel is closed or the stream was dropped.
    pub fn send(&self, signal: Signal) -> bool {
        self.signal_tx
            .lock()
            .as_ref()
            .is_some_and(|tx| tx.send(signal).is_ok())
    }

    /// Close the signal stream; the subscriber sees it end after draining pending signals
    pub fn close(&self) {
        self.signal_tx.lock().take();
    }

    pub fn emitted(&self) -> Vec<Notification> {
        self.emitted.lock().clone()
    }

    /// Remove and return everything emitted so far
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.emitted.lock())
    }
}

impl NotificationChannel for LocalChannel {
    fn emit(&self, notification: Notification) {
        trace!("emit {}", notification.name());
        self.emitted.lock().push(notification);
    }

    fn take_signals(&self) -> Option<UnboundedReceiver<Signal>> {
        self.signal_rx.lock().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_drains_notifications() {
        let channel = LocalChannel::new();
        channel.emit(Notification::StoryMissing {
            id: "ghost".to_string(),
        });
        assert_eq!(channel.emitted().len(), 1);
        assert_eq!(channel.drain().len(), 1);
        assert!(channel.emitted().is_empty());
    }

    #[tokio::test]
    async fn signal_stream_is_taken_once() {
        let channel = LocalChannel::new();
        let mut rx = channel.take_signals().expect("first take");
        assert!(channel.take_signals().is_none());

        assert!(channel.send(Signal::ArgsUpdated));
        assert_eq!(rx.recv().await, Some(Signal::ArgsUpdated));
    }

    #[tokio::test]
    async fn close_ends_the_signal_stream() {
        let channel = LocalChannel::new();
        let mut rx = channel.take_signals().unwrap();

        assert!(channel.send(Signal::ForceReRender));
        channel.close();
        assert!(!channel.send(Signal::ForceReRender));

        assert_eq!(rx.recv().await, Some(Signal::ForceReRender));
        assert_eq!(rx.recv().await, None);
    }
}
