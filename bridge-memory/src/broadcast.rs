//! Broadcast fan-out.

use tokio::sync::broadcast;

use bridge_traits::broadcast::{BroadcastEnvelope, BroadcastSource};

use crate::MemoryBridge;

impl BroadcastSource for MemoryBridge {
    fn subscribe(&self) -> broadcast::Receiver<BroadcastEnvelope> {
        self.broadcasts.subscribe()
    }
}
