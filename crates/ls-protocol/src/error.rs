//! Protocol-level error types.

use thiserror::Error;

/// Errors raised when decoding protocol values strictly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unknown intent tier: {0:?}")]
    UnknownIntent(String),
}

/// Convenience alias for protocol results.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
