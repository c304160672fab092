//! Analytics event recording.

use async_trait::async_trait;
use tracing::debug;

use bridge_traits::analytics::{AnalyticsEvent, AnalyticsRecorder};
use bridge_traits::error::Result;

use crate::{EcommerceRecord, MemoryBridge, RecordedEvent};

#[async_trait]
impl AnalyticsRecorder for MemoryBridge {
    async fn send_event(&self, event: AnalyticsEvent) -> Result<()> {
        let recorded_at = self.clock.now();
        debug!(name = %event.name, action = event.action.as_str(), "Recorded analytics event");
        self.lock().events.push(RecordedEvent { event, recorded_at });
        Ok(())
    }

    async fn send_ecommerce_data(&self, name: &str, price: f64) -> Result<()> {
        self.lock().ecommerce.push(EcommerceRecord {
            name: name.to_string(),
            price,
        });
        Ok(())
    }
}
