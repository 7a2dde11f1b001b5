//! Single-writer store over all known transfers
//!
//! Workers and the manager mutate transfer state exclusively through
//! [`TransferStore::apply`]; the UI reads ordered snapshots and may subscribe
//! to the event feed. Completed transfers are retained until the store is
//! dropped, so the read model doubles as transfer history.

use super::state::transition;
use super::types::{Transfer, TransferEvent, TransferStatus};
use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Buffered events per subscriber before lagging kicks in
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Default)]
struct StoreInner {
    /// Transfers in creation order; this is the read model.
    transfers: Vec<Transfer>,
    /// Transfer id -> slot in `transfers`.
    index: HashMap<String, usize>,
}

pub struct TransferStore {
    inner: Mutex<StoreInner>,
    events: broadcast::Sender<TransferEvent>,
}

impl TransferStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Mutex::new(StoreInner::default()),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fold one event into the store, then fan it out to subscribers.
    ///
    /// Events for unknown transfers and events arriving after a terminal
    /// status are dropped, not errors: the transport delivers callbacks with
    /// no ordering guarantee beyond per-transfer arrival order.
    pub fn apply(&self, event: TransferEvent) {
        {
            let mut inner = self.lock();
            match &event {
                TransferEvent::Started {
                    id,
                    file_name,
                    path,
                } => {
                    if inner.index.contains_key(id) {
                        warn!("transfer {} already registered, ignoring", id);
                    } else {
                        info!("transfer {} started: {}", id, file_name);
                        let slot = inner.transfers.len();
                        inner.index.insert(id.clone(), slot);
                        inner.transfers.push(Transfer {
                            id: id.clone(),
                            file_name: file_name.clone(),
                            path: path.clone(),
                            percent: 0,
                            status: TransferStatus::Uploading,
                        });
                    }
                }
                TransferEvent::ProgressUpdated { id, .. }
                | TransferEvent::StatusUpdated { id, .. } => {
                    if let Some(slot) = inner.index.get(id).copied() {
                        let next = transition(&inner.transfers[slot], &event);
                        if next.status != inner.transfers[slot].status {
                            info!(
                                "transfer {}: {} -> {}",
                                id, inner.transfers[slot].status, next.status
                            );
                        }
                        inner.transfers[slot] = next;
                    } else {
                        warn!("event for unknown transfer {}, ignoring", id);
                    }
                }
            }
        }

        // No receivers is fine; the feed is optional for the embedder.
        let _ = self.events.send(event);
    }

    /// Ordered snapshot of every known transfer, oldest first.
    pub fn snapshot(&self) -> Vec<Transfer> {
        self.lock().transfers.clone()
    }

    pub fn get(&self, transfer_id: &str) -> Option<Transfer> {
        let inner = self.lock();
        inner
            .index
            .get(transfer_id)
            .map(|&slot| inner.transfers[slot].clone())
    }

    pub fn len(&self) -> usize {
        self.lock().transfers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to the event feed. Applied events are visible in
    /// `snapshot()` before they are delivered here.
    pub fn subscribe(&self) -> broadcast::Receiver<TransferEvent> {
        self.events.subscribe()
    }
}

impl Default for TransferStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::TransferStore;
    use crate::transfer::{TransferEvent, TransferStatus};

    fn started(id: &str) -> TransferEvent {
        TransferEvent::Started {
            id: id.to_string(),
            file_name: format!("{}.bin", id),
            path: "/".to_string(),
        }
    }

    #[test]
    fn snapshot_keeps_creation_order() {
        let store = TransferStore::new();
        store.apply(started("a"));
        store.apply(started("b"));
        store.apply(started("c"));

        let ids: Vec<String> = store.snapshot().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn progress_and_status_reach_the_read_model() {
        let store = TransferStore::new();
        store.apply(started("a"));
        store.apply(TransferEvent::ProgressUpdated {
            id: "a".to_string(),
            percent: 60,
        });

        let t = store.get("a").unwrap();
        assert_eq!(t.percent, 60);
        assert_eq!(t.status, TransferStatus::Uploading);

        store.apply(TransferEvent::StatusUpdated {
            id: "a".to_string(),
            status: TransferStatus::Success,
        });
        assert_eq!(store.get("a").unwrap().status, TransferStatus::Success);
    }

    #[test]
    fn post_terminal_events_are_ignored() {
        let store = TransferStore::new();
        store.apply(started("a"));
        store.apply(TransferEvent::StatusUpdated {
            id: "a".to_string(),
            status: TransferStatus::Failed,
        });

        let before = store.get("a").unwrap();
        store.apply(TransferEvent::ProgressUpdated {
            id: "a".to_string(),
            percent: 90,
        });
        store.apply(TransferEvent::StatusUpdated {
            id: "a".to_string(),
            status: TransferStatus::Success,
        });

        let after = store.get("a").unwrap();
        assert_eq!(after.percent, before.percent);
        assert_eq!(after.status, TransferStatus::Failed);
    }

    #[test]
    fn events_for_unknown_transfers_are_dropped() {
        let store = TransferStore::new();
        store.apply(TransferEvent::ProgressUpdated {
            id: "ghost".to_string(),
            percent: 50,
        });
        assert!(store.is_empty());
    }

    #[test]
    fn subscribers_see_applied_events() {
        let store = TransferStore::new();
        let mut feed = store.subscribe();

        store.apply(started("a"));
        store.apply(TransferEvent::ProgressUpdated {
            id: "a".to_string(),
            percent: 25,
        });

        assert!(matches!(
            feed.try_recv().unwrap(),
            TransferEvent::Started { .. }
        ));
        match feed.try_recv().unwrap() {
            TransferEvent::ProgressUpdated { id, percent } => {
                assert_eq!(id, "a");
                assert_eq!(percent, 25);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
