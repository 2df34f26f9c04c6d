//! Shared error type.
//!
//! Sub-crates define their own error enums for their own failure modes and
//! wrap `FdError` where a core primitive (so far only configuration) fails.

use thiserror::Error;

/// The base error type for `fd-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum FdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fd-core`.
pub type FdResult<T> = Result<T, FdError>;
