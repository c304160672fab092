//! # Host Bridge Traits
//!
//! Capability contracts that must be implemented by each host platform's
//! native push SDK integration.
//!
//! ## Overview
//!
//! This crate defines the contract between the core library and the native
//! push layer. Each trait represents a capability group the core forwards to
//! but that must be implemented differently per platform (Android, iOS, or an
//! in-memory shim for development).
//!
//! ## Traits
//!
//! ### SDK Lifecycle
//! - [`Registrar`](registration::Registrar) - Initialization, registration state, consent
//!
//! ### Identity & Audience
//! - [`IdentityManager`](identity::IdentityManager) - Custom id, email, phone, device ids
//! - [`AudienceManager`](audience::AudienceManager) - Topic subscriptions and tags
//!
//! ### Notifications & Analytics
//! - [`NotificationController`](notifications::NotificationController) - Presentation toggles, channel CRUD, direct sends
//! - [`AnalyticsRecorder`](analytics::AnalyticsRecorder) - Event and e-commerce submission
//! - [`TokenProvider`](tokens::TokenProvider) - FCM/HMS/APNs token retrieval
//!
//! ### Inbound Events & Utilities
//! - [`BroadcastSource`](broadcast::BroadcastSource) - Tap on the native broadcast stream
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! Each supported platform must ship concrete adapters for every required bridge trait:
//!
//! | Platform  | Implementation Crate | Status |
//! |-----------|---------------------|--------|
//! | In-memory | `bridge-memory`     | ✅ Available |
//! | Android   | TBD                 | 📋 Planned |
//! | iOS       | TBD                 | 📋 Planned |
//!
//! Operations that exist on only one platform are guarded at the service
//! layer; the guard returns a typed
//! [`BridgeError::Unsupported`](error::BridgeError::Unsupported) so callers can
//! distinguish "not supported here" from "succeeded with no value".
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type for
//! consistent error handling. Platform implementations should:
//!
//! - Convert platform-specific errors to `BridgeError`
//! - Provide actionable error messages
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent
//! usage across async tasks. Implementations must ensure thread safety.
//!
//! ## Examples
//!
//! ### Implementing AudienceManager
//!
//! ```ignore
//! use bridge_traits::audience::AudienceManager;
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//! use std::collections::HashMap;
//!
//! pub struct MyAudienceManager;
//!
//! #[async_trait]
//! impl AudienceManager for MyAudienceManager {
//!     async fn subscribe_to_topic(&self, topic: &str) -> Result<()> {
//!         // Forward to the native SDK
//!         todo!()
//!     }
//!
//!     // ...
//! }
//! ```

pub mod analytics;
pub mod audience;
pub mod broadcast;
pub mod error;
pub mod identity;
pub mod notifications;
pub mod platform;
pub mod registration;
pub mod time;
pub mod tokens;

pub use error::BridgeError;

// Re-export commonly used types
pub use analytics::{AnalyticsEvent, AnalyticsRecorder, EventAction};
pub use audience::AudienceManager;
pub use broadcast::{BroadcastEnvelope, BroadcastSource, Notification};
pub use identity::IdentityManager;
pub use notifications::{ChannelConfig, IdentifierKind, Importance, NotificationController};
pub use platform::Platform;
pub use registration::Registrar;
pub use time::{Clock, LogEntry, LogLevel, LoggerSink, SystemClock};
pub use tokens::{DeliveryService, TokenProvider};
