use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio_stream::wrappers::BroadcastStream;
use tracing::warn;

use crate::models::notification::NotificationRecord;

/// In-process fan-out of normalized notifications. Presenters subscribe on
/// mount and hold the handle for as long as the view lives.
pub struct EventHub {
    tx: broadcast::Sender<NotificationRecord>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _unused_rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Publishing with no live subscribers is fine; the store already kept
    /// the record.
    pub fn publish(&self, record: NotificationRecord) {
        let _ = self.tx.send(record);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Scoped subscription handle. Dropping it deregisters the subscriber, so a
/// torn-down view can never act on events for a screen no longer presented.
pub struct Subscription {
    rx: broadcast::Receiver<NotificationRecord>,
}

impl Subscription {
    /// Next notification, or `None` once the hub is gone. A slow subscriber
    /// that lagged skips ahead rather than stalling the hub.
    pub async fn recv(&mut self) -> Option<NotificationRecord> {
        loop {
            match self.rx.recv().await {
                Ok(record) => return Some(record),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notification subscriber lagged; skipping ahead");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    pub fn into_stream(self) -> BroadcastStream<NotificationRecord> {
        BroadcastStream::new(self.rx)
    }
}
