//! Identity attribute storage.

use async_trait::async_trait;

use bridge_traits::error::Result;
use bridge_traits::identity::IdentityManager;

use crate::MemoryBridge;

#[async_trait]
impl IdentityManager for MemoryBridge {
    async fn set_custom_id(&self, id: &str) -> Result<()> {
        self.lock().custom_id = Some(id.to_string());
        Ok(())
    }

    async fn custom_id(&self) -> Result<Option<String>> {
        Ok(self.lock().custom_id.clone())
    }

    async fn set_user_email(&self, email: &str) -> Result<()> {
        self.lock().email = Some(email.to_string());
        Ok(())
    }

    async fn user_email(&self) -> Result<Option<String>> {
        Ok(self.lock().email.clone())
    }

    async fn set_user_phone_number(&self, phone: &str) -> Result<()> {
        self.lock().phone = Some(phone.to_string());
        Ok(())
    }

    async fn user_phone_number(&self) -> Result<Option<String>> {
        Ok(self.lock().phone.clone())
    }

    async fn device_id(&self) -> Result<String> {
        Ok(self.device_id.clone())
    }

    async fn advertising_id(&self) -> Result<Option<String>> {
        Ok(self.lock().advertising_id.clone())
    }
}
