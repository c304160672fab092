//! Inbound broadcast contract.
//!
//! The native SDK announces notification lifecycle moments on named broadcast
//! channels. A [`BroadcastSource`] is the host-side tap on that stream: each
//! `subscribe()` call returns an independent receiver carrying every
//! [`BroadcastEnvelope`] the native layer emits. Consumers filter by channel
//! name; names are case-sensitive and must match the constants below exactly
//! for dispatch to occur.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::broadcast;

/// Broadcast names emitted by the native SDK (`co.pushe.plus.utils`).
pub const CHANNEL_NOTIFICATION_RECEIVED: &str = "Pushe-NotificationReceived";
pub const CHANNEL_CLICKED: &str = "Pushe-Clicked";
pub const CHANNEL_DISMISSED: &str = "Pushe-Dismissed";
pub const CHANNEL_BUTTON_CLICKED: &str = "Pushe-ButtonClicked";
pub const CHANNEL_CUSTOM_CONTENT_RECEIVED: &str = "Pushe-CustomContentReceived";

/// An opaque notification payload as delivered by the native layer.
///
/// Only `title` and `content` are common enough to name; everything else the
/// native SDK attaches (message ids, action data, custom content) rides in the
/// flattened `extra` map untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A payload tagged with the broadcast channel it arrived on.
#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastEnvelope {
    pub channel: String,
    pub notification: Notification,
}

impl BroadcastEnvelope {
    pub fn new(channel: impl Into<String>, notification: Notification) -> Self {
        Self {
            channel: channel.into(),
            notification,
        }
    }
}

/// Host-side tap on the native broadcast stream.
///
/// Implementations are expected to fan the native stream out to every
/// subscriber; receivers that fall behind observe
/// [`Lagged`](tokio::sync::broadcast::error::RecvError::Lagged) and keep going.
pub trait BroadcastSource: Send + Sync {
    /// Open an independent receiver on the broadcast stream.
    ///
    /// Past envelopes are not replayed.
    fn subscribe(&self) -> broadcast::Receiver<BroadcastEnvelope>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_extra_is_flattened() {
        let notification = Notification::new()
            .with_title("hello")
            .with_extra("messageId", "m-1");

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["title"], "hello");
        assert_eq!(json["messageId"], "m-1");
    }

    #[test]
    fn test_notification_unknown_fields_survive_round_trip() {
        let raw = r#"{"title":"t","content":"c","bigTitle":"b","json":{"k":1}}"#;
        let notification: Notification = serde_json::from_str(raw).unwrap();

        assert_eq!(notification.title.as_deref(), Some("t"));
        assert_eq!(notification.extra["bigTitle"], "b");
        assert_eq!(notification.extra["json"]["k"], 1);
    }

    #[test]
    fn test_channel_names_are_exact() {
        assert_eq!(CHANNEL_NOTIFICATION_RECEIVED, "Pushe-NotificationReceived");
        assert_eq!(CHANNEL_CLICKED, "Pushe-Clicked");
        assert_eq!(CHANNEL_DISMISSED, "Pushe-Dismissed");
        assert_eq!(CHANNEL_BUTTON_CLICKED, "Pushe-ButtonClicked");
        assert_eq!(
            CHANNEL_CUSTOM_CONTENT_RECEIVED,
            "Pushe-CustomContentReceived"
        );
    }
}
