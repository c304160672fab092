//! Analytics event submission.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Semantic action attached to an analytics event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Custom,
    SignUp,
    Login,
    Purchase,
    Achievement,
    Level,
}

impl EventAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EventAction::Custom => "custom",
            EventAction::SignUp => "sign_up",
            EventAction::Login => "login",
            EventAction::Purchase => "purchase",
            EventAction::Achievement => "achievement",
            EventAction::Level => "level",
        }
    }
}

impl Default for EventAction {
    fn default() -> Self {
        EventAction::Custom
    }
}

/// A named analytics event with an action and structured data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub name: String,
    #[serde(default)]
    pub action: EventAction,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            action: EventAction::Custom,
            data: Map::new(),
        }
    }

    pub fn with_action(mut self, action: EventAction) -> Self {
        self.action = action;
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// Forwards analytics events to the delivery backend.
#[async_trait]
pub trait AnalyticsRecorder: Send + Sync {
    async fn send_event(&self, event: AnalyticsEvent) -> Result<()>;

    /// Report an e-commerce interaction (item name and price).
    async fn send_ecommerce_data(&self, name: &str, price: f64) -> Result<()>;
}
