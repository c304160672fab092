//! User and device identity.

use async_trait::async_trait;

use crate::error::Result;

/// Identity attributes attached to the current installation.
///
/// Setters overwrite; getters return `None` when the native layer has nothing
/// stored for the attribute.
#[async_trait]
pub trait IdentityManager: Send + Sync {
    async fn set_custom_id(&self, id: &str) -> Result<()>;

    async fn custom_id(&self) -> Result<Option<String>>;

    async fn set_user_email(&self, email: &str) -> Result<()>;

    async fn user_email(&self) -> Result<Option<String>>;

    async fn set_user_phone_number(&self, phone: &str) -> Result<()>;

    async fn user_phone_number(&self) -> Result<Option<String>>;

    /// Stable per-installation device identifier. Available on both platforms.
    async fn device_id(&self) -> Result<String>;

    /// Platform advertising identifier (GAID on Android, IDFA on iOS).
    /// `None` when the user has limited ad tracking.
    async fn advertising_id(&self) -> Result<Option<String>>;
}
