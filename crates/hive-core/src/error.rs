//! Base error type.
//!
//! Downstream crates define their own enums and wrap `HiveError` as one
//! variant via `#[from]`, the same way each `hive-*` crate layers on this one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HiveError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `hive-core`.
pub type HiveResult<T> = Result<T, HiveError>;
