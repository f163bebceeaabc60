//! `hive-core`: foundational types for the `hive` colony client.
//!
//! Every other `hive-*` crate depends on this one.  It has no `hive-*`
//! dependencies and few external ones (`rand`, `thiserror`, optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `TileIndex`, `PlayerId`, `TeamId`               |
//! | [`coord`]       | `TileCoord`, `Direction`                                   |
//! | [`time`]        | `Tick`                                                     |
//! | [`protocol`]    | host snapshot / order types and match limits               |
//! | [`config`]      | `PlayerConfig`                                             |
//! | [`heap`]        | `MinHeap`, `PriorityEntry`, `HeapFull`                     |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (player-wide)             |
//! | [`error`]       | `HiveError`, `HiveResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, coords and protocol |
//! |         | value types, and to `PlayerConfig`.                        |

pub mod config;
pub mod coord;
pub mod error;
pub mod heap;
pub mod ids;
pub mod protocol;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::PlayerConfig;
pub use coord::{Direction, TileCoord};
pub use error::{HiveError, HiveResult};
pub use heap::{HeapFull, MinHeap, PriorityEntry};
pub use ids::{AgentId, PlayerId, TeamId, TileIndex};
pub use protocol::{
    AgentOrder, AgentReport, AgentState, AgentType, AgentTypeInfo, MatchInfo, ObservedAgent,
    OrderCode, OrderResult, StartupInfo, TileType, TurnOrders, TurnSnapshot,
};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
