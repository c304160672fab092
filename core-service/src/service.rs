//! The `PushService` façade.

use std::sync::Arc;

use tracing::debug;

use bridge_traits::analytics::AnalyticsEvent;
use bridge_traits::broadcast::Notification;
use bridge_traits::notifications::ChannelConfig;
use bridge_traits::tokens::DeliveryService;
use bridge_traits::Platform;
use core_runtime::config::CoreConfig;
use core_runtime::events::{EventKind, EventRelay};
use core_runtime::logging::redact_if_sensitive;

use crate::error::{CoreError, Result};
use crate::requests::UserNotificationRequest;

struct ServiceInner {
    config: CoreConfig,
    relay: EventRelay,
}

/// Primary façade exposed to host applications.
///
/// Wraps the capability provider behind platform guards and owns the event
/// relay that forwards native broadcasts to registered listeners. Cloning is
/// cheap; clones share the same relay and bridges.
#[derive(Clone)]
pub struct PushService {
    inner: Arc<ServiceInner>,
}

impl PushService {
    /// Create a new service from the provided configuration.
    ///
    /// When `auto_bind` is enabled (the default), the default broadcast
    /// bindings are attached here, which requires a running Tokio runtime.
    pub fn new(config: CoreConfig) -> Result<Self> {
        if config.auto_bind && tokio::runtime::Handle::try_current().is_err() {
            return Err(CoreError::InitializationFailed(
                "binding broadcast channels requires a running Tokio runtime; \
                 construct the service inside one or disable auto_bind"
                    .to_string(),
            ));
        }

        let relay = EventRelay::new(Arc::clone(&config.broadcasts));
        if config.auto_bind {
            relay.bind_defaults();
        }
        debug!(platform = %config.platform, auto_bind = config.auto_bind, "Push service ready");

        Ok(Self {
            inner: Arc::new(ServiceInner { config, relay }),
        })
    }

    /// The host platform the service was configured for.
    pub fn platform(&self) -> Platform {
        self.inner.config.platform
    }

    /// Direct access to the event relay.
    pub fn relay(&self) -> &EventRelay {
        &self.inner.relay
    }

    /// Errors with [`CoreError::UnsupportedPlatform`] unless the active
    /// platform is `required`.
    fn require(&self, required: Platform, operation: &'static str) -> Result<()> {
        let platform = self.inner.config.platform;
        if platform == required {
            Ok(())
        } else {
            Err(CoreError::UnsupportedPlatform {
                operation,
                platform,
            })
        }
    }

    // ========================================================================
    // Event listener API
    // ========================================================================

    /// Register `handler` for `kind`, replacing any previous listener.
    ///
    /// If a notification for `kind` arrived before any listener existed, the
    /// cached payload is delivered to `handler` immediately, exactly once.
    pub fn add_event_listener<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        self.inner.relay.on(kind, handler);
    }

    /// Remove the listener for `kind`. Notifications arriving afterwards are
    /// cached again until a new listener registers.
    pub fn remove_event_listener(&self, kind: EventKind) {
        self.inner.relay.unregister(kind);
    }

    /// Tear down every broadcast binding and discard listeners and cached
    /// notifications.
    pub fn clear_listeners(&self) {
        self.inner.relay.clear();
    }

    // ========================================================================
    // Registration & consent
    // ========================================================================

    pub async fn initialize(&self) -> Result<()> {
        Ok(self.inner.config.registrar.initialize().await?)
    }

    pub async fn is_initialized(&self) -> Result<bool> {
        self.require(Platform::Android, "is_initialized")?;
        Ok(self.inner.config.registrar.is_initialized().await?)
    }

    pub async fn is_registered(&self) -> Result<bool> {
        Ok(self.inner.config.registrar.is_registered().await?)
    }

    pub async fn set_user_consent_given(&self) -> Result<()> {
        self.require(Platform::Android, "set_user_consent_given")?;
        Ok(self.inner.config.registrar.set_user_consent_given().await?)
    }

    /// Resolves once device registration has completed.
    pub async fn registration_complete(&self) -> Result<()> {
        self.require(Platform::Android, "registration_complete")?;
        Ok(self.inner.config.registrar.registration_complete().await?)
    }

    /// Resolves once SDK initialization has completed.
    pub async fn initialization_complete(&self) -> Result<()> {
        self.require(Platform::Android, "initialization_complete")?;
        Ok(self
            .inner
            .config
            .registrar
            .initialization_complete()
            .await?)
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub async fn set_custom_id(&self, id: &str) -> Result<()> {
        self.require(Platform::Android, "set_custom_id")?;
        Ok(self.inner.config.identity.set_custom_id(id).await?)
    }

    pub async fn custom_id(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "custom_id")?;
        Ok(self.inner.config.identity.custom_id().await?)
    }

    pub async fn set_user_email(&self, email: &str) -> Result<()> {
        self.require(Platform::Android, "set_user_email")?;
        debug!(email = %redact_if_sensitive("email", email), "Setting user email");
        Ok(self.inner.config.identity.set_user_email(email).await?)
    }

    pub async fn user_email(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "user_email")?;
        Ok(self.inner.config.identity.user_email().await?)
    }

    pub async fn set_user_phone_number(&self, phone: &str) -> Result<()> {
        self.require(Platform::Android, "set_user_phone_number")?;
        debug!(phone = %redact_if_sensitive("phone", phone), "Setting user phone number");
        Ok(self
            .inner
            .config
            .identity
            .set_user_phone_number(phone)
            .await?)
    }

    pub async fn user_phone_number(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "user_phone_number")?;
        Ok(self.inner.config.identity.user_phone_number().await?)
    }

    /// Stable per-installation device identifier. Works on both platforms.
    pub async fn device_id(&self) -> Result<String> {
        Ok(self.inner.config.identity.device_id().await?)
    }

    /// The Google advertising id (Android).
    pub async fn google_advertising_id(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "google_advertising_id")?;
        Ok(self.inner.config.identity.advertising_id().await?)
    }

    /// The advertising identifier (iOS).
    pub async fn advertising_id(&self) -> Result<Option<String>> {
        self.require(Platform::Ios, "advertising_id")?;
        Ok(self.inner.config.identity.advertising_id().await?)
    }

    // ========================================================================
    // Topics & tags
    // ========================================================================

    pub async fn subscribe_to_topic(&self, topic: &str) -> Result<()> {
        Ok(self.inner.config.audience.subscribe_to_topic(topic).await?)
    }

    pub async fn unsubscribe_from_topic(&self, topic: &str) -> Result<()> {
        Ok(self
            .inner
            .config
            .audience
            .unsubscribe_from_topic(topic)
            .await?)
    }

    pub async fn subscribed_topics(&self) -> Result<Vec<String>> {
        Ok(self.inner.config.audience.subscribed_topics().await?)
    }

    pub async fn add_tags(
        &self,
        tags: std::collections::HashMap<String, String>,
    ) -> Result<()> {
        Ok(self.inner.config.audience.add_tags(tags).await?)
    }

    pub async fn remove_tags(&self, keys: Vec<String>) -> Result<()> {
        Ok(self.inner.config.audience.remove_tags(keys).await?)
    }

    pub async fn subscribed_tags(
        &self,
    ) -> Result<std::collections::HashMap<String, String>> {
        Ok(self.inner.config.audience.subscribed_tags().await?)
    }

    // ========================================================================
    // Notification controls
    // ========================================================================

    pub async fn enable_notifications(&self) -> Result<()> {
        self.require(Platform::Android, "enable_notifications")?;
        Ok(self.inner.config.notifications.enable_notifications().await?)
    }

    pub async fn disable_notifications(&self) -> Result<()> {
        self.require(Platform::Android, "disable_notifications")?;
        Ok(self
            .inner
            .config
            .notifications
            .disable_notifications()
            .await?)
    }

    pub async fn notifications_enabled(&self) -> Result<bool> {
        self.require(Platform::Android, "notifications_enabled")?;
        Ok(self
            .inner
            .config
            .notifications
            .notifications_enabled()
            .await?)
    }

    pub async fn enable_custom_sound(&self) -> Result<()> {
        self.require(Platform::Android, "enable_custom_sound")?;
        Ok(self.inner.config.notifications.enable_custom_sound().await?)
    }

    pub async fn disable_custom_sound(&self) -> Result<()> {
        self.require(Platform::Android, "disable_custom_sound")?;
        Ok(self
            .inner
            .config
            .notifications
            .disable_custom_sound()
            .await?)
    }

    pub async fn custom_sound_enabled(&self) -> Result<bool> {
        self.require(Platform::Android, "custom_sound_enabled")?;
        Ok(self
            .inner
            .config
            .notifications
            .custom_sound_enabled()
            .await?)
    }

    /// Force every incoming notification to be foreground-aware.
    pub async fn enable_notification_foreground_awareness(&self) -> Result<()> {
        self.require(Platform::Android, "enable_notification_foreground_awareness")?;
        Ok(self
            .inner
            .config
            .notifications
            .enable_foreground_awareness()
            .await?)
    }

    /// Let each notification's own `show_foreground` key decide again.
    pub async fn disable_notification_foreground_awareness(&self) -> Result<()> {
        self.require(
            Platform::Android,
            "disable_notification_foreground_awareness",
        )?;
        Ok(self
            .inner
            .config
            .notifications
            .disable_foreground_awareness()
            .await?)
    }

    pub async fn is_foreground_aware(&self) -> Result<bool> {
        self.require(Platform::Android, "is_foreground_aware")?;
        Ok(self.inner.config.notifications.foreground_aware().await?)
    }

    /// Create a notification channel (Android 8.0+).
    pub async fn create_notification_channel(&self, config: ChannelConfig) -> Result<()> {
        self.require(Platform::Android, "create_notification_channel")?;
        debug!(channel_id = %config.id, "Creating notification channel");
        Ok(self.inner.config.notifications.create_channel(config).await?)
    }

    /// Remove the notification channel with `channel_id`.
    pub async fn remove_notification_channel(&self, channel_id: &str) -> Result<()> {
        self.require(Platform::Android, "remove_notification_channel")?;
        Ok(self
            .inner
            .config
            .notifications
            .remove_channel(channel_id)
            .await?)
    }

    /// Send a notification to another device of this application.
    ///
    /// The request must carry a non-empty target id; the identifier kind is
    /// already constrained to the recognized set by its type.
    pub async fn send_notification_to_user(
        &self,
        request: UserNotificationRequest,
    ) -> Result<()> {
        self.require(Platform::Android, "send_notification_to_user")?;
        request.validate()?;
        Ok(self
            .inner
            .config
            .notifications
            .send_to_user(request.id_type, &request.user_id, request.payload())
            .await?)
    }

    // ========================================================================
    // Analytics
    // ========================================================================

    /// Submit an analytics event to the delivery backend.
    pub async fn send_event(&self, event: AnalyticsEvent) -> Result<()> {
        Ok(self.inner.config.analytics.send_event(event).await?)
    }

    /// Report an e-commerce interaction.
    pub async fn send_ecommerce_data(&self, name: &str, price: f64) -> Result<()> {
        self.require(Platform::Android, "send_ecommerce_data")?;
        Ok(self
            .inner
            .config
            .analytics
            .send_ecommerce_data(name, price)
            .await?)
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// The FCM module token, when the FCM service is active.
    pub async fn fcm_token(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "fcm_token")?;
        Ok(self.inner.config.tokens.fcm_token().await?)
    }

    /// The HMS module token, when the HMS service is active.
    pub async fn hms_token(&self) -> Result<Option<String>> {
        self.require(Platform::Android, "hms_token")?;
        Ok(self.inner.config.tokens.hms_token().await?)
    }

    /// The APNs token (iOS).
    pub async fn apns_token(&self) -> Result<Option<String>> {
        self.require(Platform::Ios, "apns_token")?;
        Ok(self.inner.config.tokens.apns_token().await?)
    }

    /// The courier module currently delivering pushes, if any.
    pub async fn active_service(&self) -> Result<Option<DeliveryService>> {
        self.require(Platform::Android, "active_service")?;
        Ok(self.inner.config.tokens.active_service().await?)
    }
}

impl std::fmt::Debug for PushService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushService")
            .field("platform", &self.inner.config.platform)
            .field("relay", &self.inner.relay)
            .finish()
    }
}
