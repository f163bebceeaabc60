//! What a behaviour model asks the player to do with one agent this turn.

use hive_core::{OrderCode, TileCoord};

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Decision {
    /// Give no order; the host treats the agent as idle.
    Idle,

    /// Issue this order directly.
    Act(OrderCode),

    /// Consume the next order of the cached path.
    FollowPath,

    /// Ask the scheduler for a fresh route to `goal`.  Lower `priority` is
    /// served first; if the request is not admitted this turn the agent
    /// walks its stale path.
    Repath { goal: TileCoord, priority: f32 },

    /// Ask the scheduler for a route to the nearest never-seen tile.  Admitted
    /// and deferred exactly like `Repath`.
    Explore { priority: f32 },
}
