//! `hive-behavior`: agent controllers and colony decision rules.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`controller`] | `AgentController`: per-agent report, goal, job, cached path |
//! | [`pool`]       | `ControllerPool` (implements `RepathTarget`)                 |
//! | [`census`]     | `ColonyCensus`                                               |
//! | [`context`]    | `TurnContext<'a>`: the turn as seen by behaviour callbacks  |
//! | [`decision`]   | `Decision` enum (`Idle`, `Act`, `FollowPath`, `Repath`)      |
//! | [`model`]      | `BehaviorModel` trait                                        |
//! | [`colony`]     | `ColonyBehavior`: queen / worker / soldier / scout rules    |
//! | [`noop`]       | `NoopBehavior`: every agent idles                           |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                         |
//!
//! # Design notes
//!
//! The turn pipeline in hive-player runs in two phases:
//!
//! 1. **Decide** (sequential, ascending agent id): call
//!    `BehaviorModel::decide` for every agent able to act.  `Act` and
//!    `FollowPath` produce an order immediately; `Repath` enqueues a request.
//!
//! 2. **Drain**: the repath scheduler serves queued requests under the
//!    admission cap, and every queued agent emits one cached order.

pub mod census;
pub mod colony;
pub mod context;
pub mod controller;
pub mod decision;
pub mod error;
pub mod model;
pub mod noop;
pub mod pool;

#[cfg(test)]
mod tests;

pub use census::ColonyCensus;
pub use colony::ColonyBehavior;
pub use context::TurnContext;
pub use controller::AgentController;
pub use decision::Decision;
pub use error::{BehaviorError, BehaviorResult};
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
pub use pool::ControllerPool;
