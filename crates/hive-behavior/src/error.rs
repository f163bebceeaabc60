use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("controller pool exhausted (capacity {capacity})")]
    PoolExhausted { capacity: usize },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
