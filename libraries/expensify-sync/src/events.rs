//! Event channel between the sync layer and its subscriber

use expensify_core::ExpenseEvent;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Receiving half handed to the state container
pub type EventReceiver = mpsc::UnboundedReceiver<ExpenseEvent>;

/// Sending half used by sync operations
///
/// Publishing never blocks and never fails from the caller's point of view.
/// If the subscriber has gone away the event is dropped with a warning.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    tx: mpsc::UnboundedSender<ExpenseEvent>,
}

impl EventPublisher {
    /// Create a publisher and the receiver its events arrive on
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, event: ExpenseEvent) {
        let kind = event.kind();
        if self.tx.send(event).is_err() {
            warn!(event = kind, "No subscriber for expense event, dropping it");
        } else {
            debug!(event = kind, "Published expense event");
        }
    }

    /// True once the receiving half has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensify_core::ExpenseId;

    #[tokio::test]
    async fn published_events_arrive_in_order() {
        let (publisher, mut rx) = EventPublisher::channel();

        publisher.publish(ExpenseEvent::removed(ExpenseId::new("a")));
        publisher.publish(ExpenseEvent::removed(ExpenseId::new("b")));

        assert_eq!(
            rx.recv().await,
            Some(ExpenseEvent::removed(ExpenseId::new("a")))
        );
        assert_eq!(
            rx.recv().await,
            Some(ExpenseEvent::removed(ExpenseId::new("b")))
        );
    }

    #[test]
    fn publishing_without_subscriber_does_not_panic() {
        let (publisher, rx) = EventPublisher::channel();
        drop(rx);

        assert!(publisher.is_closed());
        publisher.publish(ExpenseEvent::set(Vec::new()));
    }
}
