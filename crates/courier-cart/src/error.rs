//! Courier cart — application error types.

use courier_core::error::DispatchError;
use thiserror::Error;

/// Startup and runtime errors for the cart binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A command failed on the bus.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}
