//! SDK lifecycle simulation.

use async_trait::async_trait;
use tracing::debug;

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::registration::Registrar;

use crate::MemoryBridge;

#[async_trait]
impl Registrar for MemoryBridge {
    /// The in-memory bridge registers synchronously: initialization and
    /// device registration complete before this returns.
    async fn initialize(&self) -> Result<()> {
        let mut state = self.lock();
        state.initialized = true;
        state.registered = true;
        debug!(device_id = %self.device_id, "Initialized in-memory bridge");
        Ok(())
    }

    async fn is_initialized(&self) -> Result<bool> {
        Ok(self.lock().initialized)
    }

    async fn is_registered(&self) -> Result<bool> {
        Ok(self.lock().registered)
    }

    async fn set_user_consent_given(&self) -> Result<()> {
        self.lock().consent_given = true;
        Ok(())
    }

    async fn registration_complete(&self) -> Result<()> {
        if self.lock().registered {
            Ok(())
        } else {
            Err(BridgeError::NotAvailable(
                "device registration has not completed; call initialize() first".to_string(),
            ))
        }
    }

    async fn initialization_complete(&self) -> Result<()> {
        if self.lock().initialized {
            Ok(())
        } else {
            Err(BridgeError::NotAvailable(
                "initialization has not completed; call initialize() first".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_registers_device() {
        let bridge = MemoryBridge::new();
        assert!(!bridge.is_initialized().await.unwrap());
        assert!(bridge.registration_complete().await.is_err());

        bridge.initialize().await.unwrap();

        assert!(bridge.is_initialized().await.unwrap());
        assert!(bridge.is_registered().await.unwrap());
        bridge.registration_complete().await.unwrap();
        bridge.initialization_complete().await.unwrap();
    }

    #[tokio::test]
    async fn test_consent_is_sticky() {
        let bridge = MemoryBridge::new();
        bridge.set_user_consent_given().await.unwrap();
        bridge.set_user_consent_given().await.unwrap();
        assert!(bridge.consent_given());
    }
}
