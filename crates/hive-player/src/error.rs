use thiserror::Error;

use hive_core::HiveError;
use hive_world::WorldError;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("player configuration error: {0}")]
    Config(#[from] HiveError),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("match session already shut down")]
    ShutDown,
}

pub type PlayerResult<T> = Result<T, PlayerError>;
