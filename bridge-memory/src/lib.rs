//! # In-Memory Bridge Implementation
//!
//! A self-contained implementation of every bridge trait, backed by plain
//! in-process state instead of a native SDK.
//!
//! ## Overview
//!
//! This crate serves two purposes:
//! - the default wiring behind the `memory-shims` feature, so the core can be
//!   exercised on a development machine without a device
//! - a deterministic fixture for tests: state is inspectable, broadcasts are
//!   emitted on demand via [`MemoryBridge::emit`]
//!
//! A single [`MemoryBridge`] implements all capability traits plus
//! [`BroadcastSource`], so one instance can be shared (via `Arc` clones)
//! across every capability slot of the core configuration and the pieces stay
//! consistent with each other.
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use bridge_memory::MemoryBridge;
//! use bridge_traits::{broadcast, Notification};
//!
//! let bridge = Arc::new(MemoryBridge::new());
//! bridge.emit(
//!     broadcast::CHANNEL_CLICKED,
//!     Notification::new().with_title("hello"),
//! );
//! ```

mod analytics;
mod audience;
mod broadcast;
mod identity;
mod notifications;
mod registration;
mod tokens;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::broadcast as tokio_broadcast;
use uuid::Uuid;

use bridge_traits::broadcast::BroadcastEnvelope;
use bridge_traits::notifications::{ChannelConfig, IdentifierKind};
use bridge_traits::time::{Clock, SystemClock};
use bridge_traits::tokens::DeliveryService;
use bridge_traits::AnalyticsEvent;

/// Envelopes buffered per subscriber before a slow receiver starts lagging.
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// A device-to-device notification accepted by [`MemoryBridge`].
#[derive(Debug, Clone, PartialEq)]
pub struct UserNotification {
    pub id_type: IdentifierKind,
    pub user_id: String,
    pub payload: Value,
}

/// An analytics event with the instant the bridge accepted it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub event: AnalyticsEvent,
    pub recorded_at: DateTime<Utc>,
}

/// An e-commerce interaction accepted by [`MemoryBridge`].
#[derive(Debug, Clone, PartialEq)]
pub struct EcommerceRecord {
    pub name: String,
    pub price: f64,
}

pub(crate) struct BridgeState {
    pub(crate) initialized: bool,
    pub(crate) registered: bool,
    pub(crate) consent_given: bool,
    pub(crate) custom_id: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) advertising_id: Option<String>,
    pub(crate) topics: BTreeSet<String>,
    pub(crate) tags: BTreeMap<String, String>,
    pub(crate) notifications_enabled: bool,
    pub(crate) custom_sound_enabled: bool,
    pub(crate) foreground_aware: bool,
    pub(crate) channels: BTreeMap<String, ChannelConfig>,
    pub(crate) user_notifications: Vec<UserNotification>,
    pub(crate) events: Vec<RecordedEvent>,
    pub(crate) ecommerce: Vec<EcommerceRecord>,
    pub(crate) fcm_token: Option<String>,
    pub(crate) hms_token: Option<String>,
    pub(crate) apns_token: Option<String>,
    pub(crate) active_service: Option<DeliveryService>,
}

impl Default for BridgeState {
    fn default() -> Self {
        Self {
            initialized: false,
            registered: false,
            consent_given: false,
            custom_id: None,
            email: None,
            phone: None,
            advertising_id: None,
            topics: BTreeSet::new(),
            tags: BTreeMap::new(),
            // Notifications and sounds start enabled, matching a fresh install.
            notifications_enabled: true,
            custom_sound_enabled: true,
            foreground_aware: false,
            channels: BTreeMap::new(),
            user_notifications: Vec::new(),
            events: Vec::new(),
            ecommerce: Vec::new(),
            fcm_token: None,
            hms_token: None,
            apns_token: None,
            active_service: None,
        }
    }
}

/// In-memory implementation of every bridge capability.
pub struct MemoryBridge {
    pub(crate) state: Mutex<BridgeState>,
    pub(crate) broadcasts: tokio_broadcast::Sender<BroadcastEnvelope>,
    pub(crate) device_id: String,
    pub(crate) clock: Arc<dyn Clock>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (broadcasts, _) = tokio_broadcast::channel(capacity);
        Self {
            state: Mutex::new(BridgeState::default()),
            broadcasts,
            device_id: Uuid::new_v4().to_string(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used to stamp recorded analytics events.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Emit a broadcast envelope on the given channel, as the native layer
    /// would. Returns the number of subscribers that received it.
    pub fn emit(
        &self,
        channel: &str,
        notification: bridge_traits::broadcast::Notification,
    ) -> usize {
        self.broadcasts
            .send(BroadcastEnvelope::new(channel, notification))
            .unwrap_or(0)
    }

    // Fixture setters for state the native layer would normally own.

    pub fn set_fcm_token(&self, token: impl Into<String>) {
        self.lock().fcm_token = Some(token.into());
    }

    pub fn set_hms_token(&self, token: impl Into<String>) {
        self.lock().hms_token = Some(token.into());
    }

    pub fn set_apns_token(&self, token: impl Into<String>) {
        self.lock().apns_token = Some(token.into());
    }

    pub fn set_active_service(&self, service: DeliveryService) {
        self.lock().active_service = Some(service);
    }

    pub fn set_advertising_id(&self, id: impl Into<String>) {
        self.lock().advertising_id = Some(id.into());
    }

    // Inspection helpers for tests.

    pub fn sent_user_notifications(&self) -> Vec<UserNotification> {
        self.lock().user_notifications.clone()
    }

    pub fn recorded_events(&self) -> Vec<RecordedEvent> {
        self.lock().events.clone()
    }

    pub fn ecommerce_records(&self) -> Vec<EcommerceRecord> {
        self.lock().ecommerce.clone()
    }

    pub fn channel_config(&self, channel_id: &str) -> Option<ChannelConfig> {
        self.lock().channels.get(channel_id).cloned()
    }

    pub fn consent_given(&self) -> bool {
        self.lock().consent_given
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().expect("memory bridge state poisoned")
    }
}

impl Default for MemoryBridge {
    fn default() -> Self {
        Self::new()
    }
}
