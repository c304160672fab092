//! # Core Configuration Module
//!
//! Provides configuration management for the push platform core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance holding the host platform, every capability handle the core
//! forwards to, and the relay settings. It enforces fail-fast validation so a
//! missing capability surfaces at build time with an actionable message, not
//! at first use.
//!
//! ## Required Dependencies
//!
//! Every capability slot must be filled: `Registrar`, `IdentityManager`,
//! `AudienceManager`, `NotificationController`, `AnalyticsRecorder`,
//! `TokenProvider` and `BroadcastSource`.
//!
//! When the `memory-shims` feature is enabled, any slot left unset is filled
//! from a single shared in-memory bridge, so the shimmed capabilities stay
//! consistent with each other.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::Platform;
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .platform(Platform::Android)
//!     .build()
//!     .expect("Failed to build config");
//! ```
//!
//! ### Configuration with custom bridges
//!
//! ```ignore
//! use std::sync::Arc;
//! use bridge_traits::Platform;
//! use core_runtime::config::CoreConfig;
//!
//! let config = CoreConfig::builder()
//!     .platform(Platform::Ios)
//!     .registrar(Arc::new(MyRegistrar))
//!     .identity(Arc::new(MyIdentityManager))
//!     .audience(Arc::new(MyAudienceManager))
//!     .notifications(Arc::new(MyNotificationController))
//!     .analytics(Arc::new(MyAnalyticsRecorder))
//!     .tokens(Arc::new(MyTokenProvider))
//!     .broadcasts(Arc::new(MyBroadcastSource))
//!     .build()?;
//! ```

use std::sync::Arc;

use crate::error::{Error, Result};
use bridge_traits::{
    AnalyticsRecorder, AudienceManager, BroadcastSource, IdentityManager, NotificationController,
    Platform, Registrar, TokenProvider,
};

/// Core configuration for the push platform core.
///
/// Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// The host platform the bridges are backed by
    pub platform: Platform,

    /// SDK lifecycle operations
    pub registrar: Arc<dyn Registrar>,

    /// User and device identity
    pub identity: Arc<dyn IdentityManager>,

    /// Topic subscriptions and tags
    pub audience: Arc<dyn AudienceManager>,

    /// Notification presentation controls and direct sends
    pub notifications: Arc<dyn NotificationController>,

    /// Analytics event submission
    pub analytics: Arc<dyn AnalyticsRecorder>,

    /// Push token retrieval
    pub tokens: Arc<dyn TokenProvider>,

    /// Tap on the native broadcast stream
    pub broadcasts: Arc<dyn BroadcastSource>,

    /// Attach the default channel bindings when the service is constructed
    pub auto_bind: bool,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("platform", &self.platform)
            .field("registrar", &"Registrar { ... }")
            .field("identity", &"IdentityManager { ... }")
            .field("audience", &"AudienceManager { ... }")
            .field("notifications", &"NotificationController { ... }")
            .field("analytics", &"AnalyticsRecorder { ... }")
            .field("tokens", &"TokenProvider { ... }")
            .field("broadcasts", &"BroadcastSource { ... }")
            .field("auto_bind", &self.auto_bind)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }
}

#[cfg(not(feature = "memory-shims"))]
fn capability_missing(capability: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "No {capability} implementation provided. \
             Development: enable the 'memory-shims' feature to use the in-memory bridge. \
             Mobile: inject the platform-native adapter."
        ),
    }
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// The builder validates required dependencies and provides helpful error
/// messages when a capability is missing.
#[derive(Default)]
pub struct CoreConfigBuilder {
    platform: Option<Platform>,
    registrar: Option<Arc<dyn Registrar>>,
    identity: Option<Arc<dyn IdentityManager>>,
    audience: Option<Arc<dyn AudienceManager>>,
    notifications: Option<Arc<dyn NotificationController>>,
    analytics: Option<Arc<dyn AnalyticsRecorder>>,
    tokens: Option<Arc<dyn TokenProvider>>,
    broadcasts: Option<Arc<dyn BroadcastSource>>,
    auto_bind: Option<bool>,
}

impl CoreConfigBuilder {
    /// Sets the host platform (required).
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the SDK lifecycle implementation.
    pub fn registrar(mut self, registrar: Arc<dyn Registrar>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    /// Sets the identity implementation.
    pub fn identity(mut self, identity: Arc<dyn IdentityManager>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Sets the audience (topics and tags) implementation.
    pub fn audience(mut self, audience: Arc<dyn AudienceManager>) -> Self {
        self.audience = Some(audience);
        self
    }

    /// Sets the notification controls implementation.
    pub fn notifications(mut self, notifications: Arc<dyn NotificationController>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Sets the analytics implementation.
    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsRecorder>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Sets the token retrieval implementation.
    pub fn tokens(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Sets the inbound broadcast source.
    pub fn broadcasts(mut self, broadcasts: Arc<dyn BroadcastSource>) -> Self {
        self.broadcasts = Some(broadcasts);
        self
    }

    /// Whether the service binds the default broadcast channels on
    /// construction.
    ///
    /// Default: true
    pub fn auto_bind(mut self, auto_bind: bool) -> Self {
        self.auto_bind = Some(auto_bind);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if the platform or a
    /// capability implementation is missing.
    pub fn build(self) -> Result<CoreConfig> {
        let platform = self.platform.ok_or_else(|| {
            Error::Config("Platform is required. Use .platform() to set it.".to_string())
        })?;

        #[cfg(feature = "memory-shims")]
        let (registrar, identity, audience, notifications, analytics, tokens, broadcasts) = {
            // One shared shim backs every slot left unset, so shimmed
            // capabilities observe the same state.
            let shim = Arc::new(bridge_memory::MemoryBridge::new());
            let registrar: Arc<dyn Registrar> = match self.registrar {
                Some(registrar) => registrar,
                None => shim.clone(),
            };
            let identity: Arc<dyn IdentityManager> = match self.identity {
                Some(identity) => identity,
                None => shim.clone(),
            };
            let audience: Arc<dyn AudienceManager> = match self.audience {
                Some(audience) => audience,
                None => shim.clone(),
            };
            let notifications: Arc<dyn NotificationController> = match self.notifications {
                Some(notifications) => notifications,
                None => shim.clone(),
            };
            let analytics: Arc<dyn AnalyticsRecorder> = match self.analytics {
                Some(analytics) => analytics,
                None => shim.clone(),
            };
            let tokens: Arc<dyn TokenProvider> = match self.tokens {
                Some(tokens) => tokens,
                None => shim.clone(),
            };
            let broadcasts: Arc<dyn BroadcastSource> = match self.broadcasts {
                Some(broadcasts) => broadcasts,
                None => shim,
            };
            (
                registrar,
                identity,
                audience,
                notifications,
                analytics,
                tokens,
                broadcasts,
            )
        };

        #[cfg(not(feature = "memory-shims"))]
        let (registrar, identity, audience, notifications, analytics, tokens, broadcasts) = (
            self.registrar
                .ok_or_else(|| capability_missing("Registrar"))?,
            self.identity
                .ok_or_else(|| capability_missing("IdentityManager"))?,
            self.audience
                .ok_or_else(|| capability_missing("AudienceManager"))?,
            self.notifications
                .ok_or_else(|| capability_missing("NotificationController"))?,
            self.analytics
                .ok_or_else(|| capability_missing("AnalyticsRecorder"))?,
            self.tokens
                .ok_or_else(|| capability_missing("TokenProvider"))?,
            self.broadcasts
                .ok_or_else(|| capability_missing("BroadcastSource"))?,
        );

        Ok(CoreConfig {
            platform,
            registrar,
            identity,
            audience,
            notifications,
            analytics,
            tokens,
            broadcasts,
            auto_bind: self.auto_bind.unwrap_or(true),
        })
    }
}
