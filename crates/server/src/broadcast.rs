//! Order event broadcasting.
//!
//! A small publish/subscribe capability over [`tokio::sync::broadcast`].
//! Order placement publishes; the WebSocket route subscribes and forwards.
//! Fan-out is best-effort: no acknowledgement, no persistence, no replay —
//! a subscriber that lags past the channel capacity just misses events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use carbon_shop_core::{Footprint, UserId};

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 256;

/// Event published once per successful order placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    /// The user who placed the order.
    pub user_id: UserId,
    /// The order's computed footprint total.
    pub total_carbon: Footprint,
}

/// Fans out [`OrderEvent`]s to all current subscribers.
///
/// Cheaply cloneable; clones share the same channel.
#[derive(Debug, Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<OrderEvent>,
}

impl Broadcaster {
    /// Create a broadcaster with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Returns the number of subscribers the event was delivered to.
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, event: OrderEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.tx.subscribe()
    }

    /// Number of currently connected subscribers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
