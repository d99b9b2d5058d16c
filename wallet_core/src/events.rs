//! Update bus for balance and rate stores.
//!
//! Stores publish `StoreEvent`s here instead of being observed as ambient
//! singletons; consumers subscribe and recompute derived state (e.g. the
//! total balance) on each event.

use tokio::sync::broadcast;
use tonkit_types::Address;

/// An update emitted by a balance or rate store.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    BalancesDidUpdate { address: Address },
    RatesDidUpdate,
}

/// Broadcast bus carrying store updates to any number of subscribers.
pub struct UpdateBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl UpdateBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event. Events published with no subscribers are dropped.
    pub fn publish(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = UpdateBus::default();
        let mut rx = bus.subscribe();
        bus.publish(StoreEvent::RatesDidUpdate);
        assert!(matches!(rx.recv().await, Ok(StoreEvent::RatesDidUpdate)));
    }

    #[tokio::test]
    async fn all_subscribers_notified() {
        let bus = UpdateBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();
        let address = Address::new(0, [1u8; 32]);
        bus.publish(StoreEvent::BalancesDidUpdate {
            address: address.clone(),
        });
        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await {
                Ok(StoreEvent::BalancesDidUpdate { address: a }) => assert_eq!(a, address),
                other => panic!("unexpected event: {other:?}"),
            }
        }
    }
}
