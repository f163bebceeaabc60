//! World-model error type.

use thiserror::Error;

use hive_core::HiveError;

/// Errors produced by `hive-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("snapshot buffer has {got} cells, expected {expected}")]
    SnapshotSize { expected: usize, got: usize },

    #[error(transparent)]
    Core(#[from] HiveError),
}

pub type WorldResult<T> = Result<T, WorldError>;
