//! Topic and tag storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use bridge_traits::audience::AudienceManager;
use bridge_traits::error::Result;

use crate::MemoryBridge;

#[async_trait]
impl AudienceManager for MemoryBridge {
    async fn subscribe_to_topic(&self, topic: &str) -> Result<()> {
        self.lock().topics.insert(topic.to_string());
        debug!(topic, "Subscribed to topic");
        Ok(())
    }

    async fn unsubscribe_from_topic(&self, topic: &str) -> Result<()> {
        self.lock().topics.remove(topic);
        Ok(())
    }

    async fn subscribed_topics(&self) -> Result<Vec<String>> {
        Ok(self.lock().topics.iter().cloned().collect())
    }

    async fn add_tags(&self, tags: HashMap<String, String>) -> Result<()> {
        self.lock().tags.extend(tags);
        Ok(())
    }

    async fn remove_tags(&self, keys: Vec<String>) -> Result<()> {
        let mut state = self.lock();
        for key in keys {
            state.tags.remove(&key);
        }
        Ok(())
    }

    async fn subscribed_tags(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .lock()
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_topic_subscription_is_idempotent() {
        let bridge = MemoryBridge::new();

        bridge.subscribe_to_topic("news").await.unwrap();
        bridge.subscribe_to_topic("news").await.unwrap();
        bridge.subscribe_to_topic("sports").await.unwrap();

        assert_eq!(
            bridge.subscribed_topics().await.unwrap(),
            vec!["news".to_string(), "sports".to_string()]
        );

        bridge.unsubscribe_from_topic("news").await.unwrap();
        assert_eq!(
            bridge.subscribed_topics().await.unwrap(),
            vec!["sports".to_string()]
        );
    }

    #[tokio::test]
    async fn test_tags_overwrite_and_remove() {
        let bridge = MemoryBridge::new();

        bridge
            .add_tags(HashMap::from([("plan".to_string(), "free".to_string())]))
            .await
            .unwrap();
        bridge
            .add_tags(HashMap::from([("plan".to_string(), "pro".to_string())]))
            .await
            .unwrap();

        let tags = bridge.subscribed_tags().await.unwrap();
        assert_eq!(tags.get("plan").map(String::as_str), Some("pro"));

        bridge
            .remove_tags(vec!["plan".to_string(), "missing".to_string()])
            .await
            .unwrap();
        assert!(bridge.subscribed_tags().await.unwrap().is_empty());
    }
}
