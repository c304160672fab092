use thiserror::Error;

use crate::platform::Platform;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("`{operation}` is not supported on {platform}")]
    Unsupported {
        operation: &'static str,
        platform: Platform,
    },
}

pub type Result<T> = std::result::Result<T, BridgeError>;
