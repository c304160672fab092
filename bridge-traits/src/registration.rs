//! SDK registration and consent.

use async_trait::async_trait;

use crate::error::Result;

/// Lifecycle operations of the native SDK itself.
///
/// `initialize` is idempotent on both platforms: Android only needs it when the
/// GDPR consent feature delays auto-start, while iOS 13.6+ requires an explicit
/// call because auto-initialization is unavailable there.
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Start the native SDK.
    async fn initialize(&self) -> Result<()>;

    /// Whether the native SDK has finished initializing.
    async fn is_initialized(&self) -> Result<bool>;

    /// Whether the device is registered with the delivery backend.
    async fn is_registered(&self) -> Result<bool>;

    /// Record user consent so the SDK is allowed to operate. Calling once is
    /// enough; the native layer persists the flag.
    async fn set_user_consent_given(&self) -> Result<()>;

    /// Resolves once the native layer reports device registration finished.
    async fn registration_complete(&self) -> Result<()>;

    /// Resolves once the native layer reports initialization finished.
    async fn initialization_complete(&self) -> Result<()>;
}
