//! `hive-schedule`: cached paths and capped repath scheduling.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`path`]      | `CachedPath`                                               |
//! | [`scheduler`] | `RepathScheduler`, `RepathTarget` trait, `RouteRequest`, `RouteGoal`, `DrainStats` |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                       |
//!
//! # Turn model (summary)
//!
//! ```text
//! begin_turn()                     queue := ∅, executed := 0
//! enqueue(agent, 1 − consumed)     routine request
//! enqueue(agent, urgent_priority)  combat / flight (negative: ahead of all routine)
//! drain_turn(..)                   pop all; search the first `cap`; each
//!                                  popped agent emits one cached order
//! ```

pub mod error;
pub mod path;
pub mod scheduler;


pub use error::{ScheduleError, ScheduleResult};
pub use path::CachedPath;
pub use scheduler::{DrainStats, RepathScheduler, RepathTarget, RouteGoal, RouteRequest};
