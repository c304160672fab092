//! Notification presentation state and direct sends.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use bridge_traits::error::Result;
use bridge_traits::notifications::{ChannelConfig, IdentifierKind, NotificationController};

use crate::{MemoryBridge, UserNotification};

#[async_trait]
impl NotificationController for MemoryBridge {
    async fn enable_notifications(&self) -> Result<()> {
        self.lock().notifications_enabled = true;
        Ok(())
    }

    async fn disable_notifications(&self) -> Result<()> {
        self.lock().notifications_enabled = false;
        Ok(())
    }

    async fn notifications_enabled(&self) -> Result<bool> {
        Ok(self.lock().notifications_enabled)
    }

    async fn enable_custom_sound(&self) -> Result<()> {
        self.lock().custom_sound_enabled = true;
        Ok(())
    }

    async fn disable_custom_sound(&self) -> Result<()> {
        self.lock().custom_sound_enabled = false;
        Ok(())
    }

    async fn custom_sound_enabled(&self) -> Result<bool> {
        Ok(self.lock().custom_sound_enabled)
    }

    async fn enable_foreground_awareness(&self) -> Result<()> {
        self.lock().foreground_aware = true;
        Ok(())
    }

    async fn disable_foreground_awareness(&self) -> Result<()> {
        self.lock().foreground_aware = false;
        Ok(())
    }

    async fn foreground_aware(&self) -> Result<bool> {
        Ok(self.lock().foreground_aware)
    }

    async fn create_channel(&self, config: ChannelConfig) -> Result<()> {
        debug!(channel_id = %config.id, "Created notification channel");
        self.lock().channels.insert(config.id.clone(), config);
        Ok(())
    }

    /// Removing an unknown channel is accepted, matching the native behavior
    /// of a fire-and-forget delete.
    async fn remove_channel(&self, channel_id: &str) -> Result<()> {
        self.lock().channels.remove(channel_id);
        Ok(())
    }

    async fn send_to_user(
        &self,
        id_type: IdentifierKind,
        user_id: &str,
        payload: Value,
    ) -> Result<()> {
        debug!(%id_type, user_id, "Accepted user notification");
        self.lock().user_notifications.push(UserNotification {
            id_type,
            user_id: user_id.to_string(),
            payload,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_presentation_toggles() {
        let bridge = MemoryBridge::new();

        assert!(bridge.notifications_enabled().await.unwrap());
        bridge.disable_notifications().await.unwrap();
        assert!(!bridge.notifications_enabled().await.unwrap());
        bridge.enable_notifications().await.unwrap();
        assert!(bridge.notifications_enabled().await.unwrap());

        assert!(!bridge.foreground_aware().await.unwrap());
        bridge.enable_foreground_awareness().await.unwrap();
        assert!(bridge.foreground_aware().await.unwrap());
    }

    #[tokio::test]
    async fn test_channel_crud() {
        let bridge = MemoryBridge::new();

        let config = ChannelConfig::new("promo", "Promotions").with_badge(true);
        bridge.create_channel(config.clone()).await.unwrap();
        assert_eq!(bridge.channel_config("promo"), Some(config));

        bridge.remove_channel("promo").await.unwrap();
        assert_eq!(bridge.channel_config("promo"), None);

        // Deleting again is still fine.
        bridge.remove_channel("promo").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_to_user_is_recorded() {
        let bridge = MemoryBridge::new();

        bridge
            .send_to_user(
                IdentifierKind::CustomId,
                "user-1",
                json!({"title": "hi", "content": "there"}),
            )
            .await
            .unwrap();

        let sent = bridge.sent_user_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].id_type, IdentifierKind::CustomId);
        assert_eq!(sent[0].user_id, "user-1");
        assert_eq!(sent[0].payload["title"], "hi");
    }
}
