//! Delivery-service token retrieval.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The courier module currently delivering pushes on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryService {
    Fcm,
    Hms,
}

impl DeliveryService {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryService::Fcm => "fcm",
            DeliveryService::Hms => "hms",
        }
    }
}

impl fmt::Display for DeliveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access to the raw push tokens of each courier module.
///
/// Getters return `None` when the corresponding module is inactive on the
/// device.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fcm_token(&self) -> Result<Option<String>>;

    async fn hms_token(&self) -> Result<Option<String>>;

    async fn apns_token(&self) -> Result<Option<String>>;

    async fn active_service(&self) -> Result<Option<DeliveryService>>;
}
