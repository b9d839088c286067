//! Live queries over the queue collection.
//!
//! A subscription is a standing filtered + ordered read: it receives
//! the full matching result set immediately, then a full replacement
//! result set after every write that touches the collection. Deliveries
//! are authoritative snapshots, never deltas — consumers discard what
//! they held before.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::models::Visit;

/// The ordering a subscriber sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotOrder {
    /// Timestamp ascending — the admin and doctor consoles.
    Arrival,
    /// Status descending then timestamp ascending — the TV board.
    Board,
}

/// A subscription handle. Dropping it (or calling
/// [`QueueFeed::unsubscribe`]) stops future deliveries; the feed prunes
/// the dead channel at its next publish.
pub struct Subscription {
    id: u64,
    order: SnapshotOrder,
    rx: Receiver<Vec<Visit>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn order(&self) -> SnapshotOrder {
        self.order
    }

    /// Wait for the next snapshot. `None` once the feed is gone.
    pub fn next_snapshot(&self) -> Option<Vec<Visit>> {
        self.rx.recv().ok()
    }

    /// Take a snapshot if one is already queued.
    pub fn try_snapshot(&self) -> Option<Vec<Visit>> {
        self.rx.try_recv().ok()
    }
}

struct Subscriber {
    id: u64,
    order: SnapshotOrder,
    tx: Sender<Vec<Visit>>,
}

/// Fan-out of queue snapshots to every live subscriber.
pub struct QueueFeed {
    subscribers: Mutex<Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl QueueFeed {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a subscriber and deliver its initial result set.
    pub fn subscribe(&self, order: SnapshotOrder, initial: Vec<Visit>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = channel();

        // The receiver is still in hand, this cannot fail
        let _ = tx.send(initial);

        self.lock_subscribers().push(Subscriber { id, order, tx });
        Subscription { id, order, rx }
    }

    /// Stop deliveries to one subscriber. In-flight snapshots already
    /// queued on its channel are unaffected.
    pub fn unsubscribe(&self, id: u64) {
        self.lock_subscribers().retain(|s| s.id != id);
    }

    /// Deliver fresh full snapshots to every subscriber, each in its
    /// own ordering. Subscribers whose receiver is gone are pruned.
    pub fn publish(&self, arrival: &[Visit], board: &[Visit]) {
        self.lock_subscribers().retain(|s| {
            let snapshot = match s.order {
                SnapshotOrder::Arrival => arrival.to_vec(),
                SnapshotOrder::Board => board.to_vec(),
            };
            match s.tx.send(snapshot) {
                Ok(()) => true,
                Err(_) => {
                    warn!("Pruning subscriber {} with closed channel", s.id);
                    false
                }
            }
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<Subscriber>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for QueueFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueueNumber, Visit};

    fn visit(id: &str, name: &str) -> Visit {
        Visit::new(id.into(), name.into(), None, QueueNumber::new(1))
    }

    #[test]
    fn test_initial_snapshot_delivered() {
        let feed = QueueFeed::new();
        let sub = feed.subscribe(SnapshotOrder::Arrival, vec![visit("111111", "Alice Smith")]);

        let snapshot = sub.try_snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].employee_id, "111111");
    }

    #[test]
    fn test_publish_respects_ordering_choice() {
        let feed = QueueFeed::new();
        let arrival_sub = feed.subscribe(SnapshotOrder::Arrival, vec![]);
        let board_sub = feed.subscribe(SnapshotOrder::Board, vec![]);
        arrival_sub.try_snapshot();
        board_sub.try_snapshot();

        let a = visit("111111", "Alice Smith");
        let b = visit("222222", "Bob Jones");
        feed.publish(&[a.clone(), b.clone()], &[b.clone(), a.clone()]);

        let arrival = arrival_sub.try_snapshot().unwrap();
        assert_eq!(arrival[0].employee_id, "111111");
        let board = board_sub.try_snapshot().unwrap();
        assert_eq!(board[0].employee_id, "222222");
    }

    #[test]
    fn test_each_publish_replaces_snapshot() {
        let feed = QueueFeed::new();
        let sub = feed.subscribe(SnapshotOrder::Arrival, vec![]);
        sub.try_snapshot();

        feed.publish(&[visit("111111", "Alice Smith")], &[]);
        feed.publish(&[], &[]);

        assert_eq!(sub.try_snapshot().unwrap().len(), 1);
        // The later delivery is the authoritative state: empty again
        assert_eq!(sub.try_snapshot().unwrap().len(), 0);
        assert!(sub.try_snapshot().is_none());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let feed = QueueFeed::new();
        let sub = feed.subscribe(SnapshotOrder::Arrival, vec![]);
        assert_eq!(feed.subscriber_count(), 1);

        drop(sub);
        feed.publish(&[], &[]);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_deliveries() {
        let feed = QueueFeed::new();
        let sub = feed.subscribe(SnapshotOrder::Arrival, vec![]);
        sub.try_snapshot();

        feed.unsubscribe(sub.id());
        feed.publish(&[visit("111111", "Alice Smith")], &[]);

        assert!(sub.try_snapshot().is_none());
        assert_eq!(feed.subscriber_count(), 0);
    }
}
