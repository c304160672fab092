//! Notification presentation controls and device-to-device sends.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::error::Result;

/// Android notification-channel importance ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    None,
    Min,
    Low,
    Default,
    High,
}

impl Importance {
    /// The integer the Android `NotificationManager` expects.
    pub fn android_value(self) -> i32 {
        match self {
            Importance::None => 0,
            Importance::Min => 1,
            Importance::Low => 2,
            Importance::Default => 3,
            Importance::High => 4,
        }
    }
}

impl Default for Importance {
    fn default() -> Self {
        Importance::Default
    }
}

/// Explicit configuration for creating a notification channel (Android 8.0+).
///
/// Every recognized option is a named field; unset optionals defer to the
/// native defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub enable_light: bool,
    #[serde(default)]
    pub enable_vibration: bool,
    #[serde(default)]
    pub show_badge: bool,
    /// ARGB color for the notification LED, when lights are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub led_color: Option<u32>,
    /// Vibration timing pattern in milliseconds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vibration_pattern: Vec<u64>,
}

impl ChannelConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            importance: Importance::Default,
            enable_light: false,
            enable_vibration: false,
            show_badge: false,
            led_color: None,
            vibration_pattern: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_light(mut self, led_color: Option<u32>) -> Self {
        self.enable_light = true;
        self.led_color = led_color;
        self
    }

    pub fn with_vibration(mut self, pattern: Vec<u64>) -> Self {
        self.enable_vibration = true;
        self.vibration_pattern = pattern;
        self
    }

    pub fn with_badge(mut self, show: bool) -> Self {
        self.show_badge = show;
        self
    }
}

/// How a target user is identified when sending a device-to-device
/// notification. The wire values are the three identifier kinds the native
/// layer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierKind {
    CustomId,
    AndroidId,
    AdvertisementId,
}

impl IdentifierKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierKind::CustomId => "CUSTOM_ID",
            IdentifierKind::AndroidId => "ANDROID_ID",
            IdentifierKind::AdvertisementId => "ADVERTISEMENT_ID",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown identifier kind `{0}`, expected CUSTOM_ID, ANDROID_ID or ADVERTISEMENT_ID")]
pub struct ParseIdentifierKindError(pub String);

impl FromStr for IdentifierKind {
    type Err = ParseIdentifierKindError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "CUSTOM_ID" => Ok(IdentifierKind::CustomId),
            "ANDROID_ID" => Ok(IdentifierKind::AndroidId),
            "ADVERTISEMENT_ID" => Ok(IdentifierKind::AdvertisementId),
            other => Err(ParseIdentifierKindError(other.to_string())),
        }
    }
}

/// Notification presentation toggles, channel CRUD and direct sends.
#[async_trait]
pub trait NotificationController: Send + Sync {
    async fn enable_notifications(&self) -> Result<()>;

    async fn disable_notifications(&self) -> Result<()>;

    async fn notifications_enabled(&self) -> Result<bool>;

    async fn enable_custom_sound(&self) -> Result<()>;

    async fn disable_custom_sound(&self) -> Result<()>;

    async fn custom_sound_enabled(&self) -> Result<bool>;

    /// Force every incoming notification to be foreground-aware instead of
    /// letting the message's own `show_foreground` key decide.
    async fn enable_foreground_awareness(&self) -> Result<()>;

    async fn disable_foreground_awareness(&self) -> Result<()>;

    async fn foreground_aware(&self) -> Result<bool>;

    async fn create_channel(&self, config: ChannelConfig) -> Result<()>;

    async fn remove_channel(&self, channel_id: &str) -> Result<()>;

    /// Send a notification to another device of the same application.
    /// `payload` carries the notification body as the native layer expects it.
    async fn send_to_user(
        &self,
        id_type: IdentifierKind,
        user_id: &str,
        payload: Value,
    ) -> Result<()>;
}
