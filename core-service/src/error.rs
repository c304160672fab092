use thiserror::Error;

use bridge_traits::{BridgeError, Platform};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error("`{operation}` is not supported on {platform}")]
    UnsupportedPlatform {
        operation: &'static str,
        platform: Platform,
    },

    #[error("`{0}` is required")]
    MissingField(&'static str),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Runtime(#[from] core_runtime::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
