//! Validated request structures for operations with loosely-typed wire input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use bridge_traits::notifications::IdentifierKind;

use crate::error::{CoreError, Result};

/// A device-to-device notification request.
///
/// `id_type` and `user_id` identify the target; everything else the caller
/// wants to ship (title, content, custom keys) rides in the flattened `extra`
/// map. The identifier kind is a closed enum, so an unrecognized wire string
/// fails deserialization instead of reaching the native layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserNotificationRequest {
    #[serde(rename = "type")]
    pub id_type: IdentifierKind,

    #[serde(rename = "userId")]
    pub user_id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserNotificationRequest {
    pub fn new(id_type: IdentifierKind, user_id: impl Into<String>) -> Self {
        Self {
            id_type,
            user_id: user_id.into(),
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Both the identifier kind and a non-empty target id must be present for
    /// the native layer to resolve the recipient.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(CoreError::MissingField("user_id"));
        }
        Ok(())
    }

    /// The notification body forwarded to the native layer.
    pub fn payload(&self) -> Value {
        Value::Object(self.extra.clone())
    }
}
