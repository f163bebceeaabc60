use thiserror::Error;

use hive_core::AgentId;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("repath queue full (capacity {capacity}); request for {agent} dropped")]
    QueueFull { agent: AgentId, capacity: usize },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
