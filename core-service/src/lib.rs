//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (registration,
//! identity, audience, notification controls, analytics, tokens, broadcasts)
//! into the shared push core. Development and test hosts typically enable the
//! `memory-shims` feature (which depends on `bridge-memory`), whereas mobile
//! hosts inject their platform-native adapters through
//! [`CoreConfig`](core_runtime::config::CoreConfig).

pub mod error;
pub mod requests;
mod service;

pub use error::{CoreError, Result};
pub use requests::UserNotificationRequest;
pub use service::PushService;

// Re-export the types a host application touches on every call.
pub use bridge_traits::analytics::{AnalyticsEvent, EventAction};
pub use bridge_traits::broadcast::Notification;
pub use bridge_traits::notifications::{ChannelConfig, IdentifierKind, Importance};
pub use bridge_traits::tokens::DeliveryService;
pub use bridge_traits::Platform;
pub use core_runtime::events::EventKind;

/// Convenience bootstrapper backed entirely by the in-memory bridge.
///
/// ```
/// # #[cfg(feature = "memory-shims")]
/// # async fn example() -> core_service::Result<()> {
/// use core_service::{bootstrap_memory, EventKind, Platform};
///
/// let core = bootstrap_memory(Platform::Android)?;
/// core.add_event_listener(EventKind::Clicked, |notification| {
///     println!("clicked: {:?}", notification.title);
/// });
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "memory-shims")]
pub fn bootstrap_memory(platform: Platform) -> Result<PushService> {
    let config = core_runtime::config::CoreConfig::builder()
        .platform(platform)
        .build()?;
    PushService::new(config)
}
