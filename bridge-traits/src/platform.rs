//! Host platform identification.
//!
//! The capability provider runs on exactly one mobile platform per process.
//! Operations that only exist on one platform are guarded by the service layer
//! against the platform reported here; the guard produces a typed
//! [`BridgeError::Unsupported`](crate::error::BridgeError::Unsupported) result
//! instead of silently returning nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The host platform a bridge implementation is backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Android.to_string(), "android");
        assert_eq!(Platform::Ios.to_string(), "ios");
    }

    #[test]
    fn test_platform_serde_round_trip() {
        let json = serde_json::to_string(&Platform::Ios).unwrap();
        assert_eq!(json, "\"ios\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::Ios);
    }
}
