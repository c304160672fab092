//! Topic subscriptions and tag management.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;

/// Audience segmentation: named topics the installation subscribes to and
/// free-form string tags attached to it.
#[async_trait]
pub trait AudienceManager: Send + Sync {
    async fn subscribe_to_topic(&self, topic: &str) -> Result<()>;

    async fn unsubscribe_from_topic(&self, topic: &str) -> Result<()>;

    async fn subscribed_topics(&self) -> Result<Vec<String>>;

    /// Attach tags; existing keys are overwritten.
    async fn add_tags(&self, tags: HashMap<String, String>) -> Result<()>;

    /// Remove the given tag keys; unknown keys are ignored.
    async fn remove_tags(&self, keys: Vec<String>) -> Result<()>;

    async fn subscribed_tags(&self) -> Result<HashMap<String, String>>;
}
