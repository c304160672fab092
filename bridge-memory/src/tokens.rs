//! Token retrieval from fixture state.

use async_trait::async_trait;

use bridge_traits::error::Result;
use bridge_traits::tokens::{DeliveryService, TokenProvider};

use crate::MemoryBridge;

#[async_trait]
impl TokenProvider for MemoryBridge {
    async fn fcm_token(&self) -> Result<Option<String>> {
        Ok(self.lock().fcm_token.clone())
    }

    async fn hms_token(&self) -> Result<Option<String>> {
        Ok(self.lock().hms_token.clone())
    }

    async fn apns_token(&self) -> Result<Option<String>> {
        Ok(self.lock().apns_token.clone())
    }

    async fn active_service(&self) -> Result<Option<DeliveryService>> {
        Ok(self.lock().active_service)
    }
}
