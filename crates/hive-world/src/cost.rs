//! Per-class terrain step costs.
//!
//! The cost of stepping into a tile is `BASE_STEP_COST` plus the exhaustion
//! the host charges that agent type for entering that terrain.  A type the
//! host forbids from a terrain (`move_exhaust < 0`) pays
//! `CLASS_BLOCKED_COST` instead of being excluded outright, so a soldier
//! boxed in by sand still gets a route (the blocked step will simply fail
//! and trigger a repath) rather than no route at all.  Stone is the only
//! terrain excluded here; lethal terrain is excluded by the world model's
//! passability policy.

use hive_core::protocol::{NUM_AGENT_TYPES, NUM_TILE_TYPES};
use hive_core::{AgentType, MatchInfo, TileType};

/// Cost of one step onto open ground.
pub const BASE_STEP_COST: f32 = 1.0;

/// Surrogate cost for terrain the agent type may not enter.
pub const CLASS_BLOCKED_COST: f32 = 1_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct CostTable {
    /// `costs[agent_type][tile_type]`; `None` = never expand.
    costs: [[Option<f32>; NUM_TILE_TYPES]; NUM_AGENT_TYPES],
}

impl CostTable {
    pub fn from_match(info: &MatchInfo) -> Self {
        let mut costs = [[None; NUM_TILE_TYPES]; NUM_AGENT_TYPES];
        for agent_type in AgentType::ALL {
            let penalties = &info.agent_type(agent_type).move_exhaust;
            for tile in TileType::ALL {
                let Some(t) = tile.table_index() else { continue };
                costs[agent_type.index()][t] = match tile {
                    TileType::Stone => None,
                    _ if penalties[t] < 0 => Some(CLASS_BLOCKED_COST),
                    _ => Some(BASE_STEP_COST + penalties[t] as f32),
                };
            }
        }
        Self { costs }
    }

    /// Cost for `agent_type` to step onto `tile`.  Unseen tiles cost the base
    /// step; `None` means the search must not expand into the tile.
    #[inline]
    pub fn step_cost(&self, agent_type: AgentType, tile: TileType) -> Option<f32> {
        match tile.table_index() {
            Some(t) => self.costs[agent_type.index()][t],
            None    => Some(BASE_STEP_COST),
        }
    }

    /// The cheapest possible step for any class.  Multiplying a move count by
    /// this keeps the heuristic admissible.
    #[inline]
    pub fn min_step_cost(&self) -> f32 {
        BASE_STEP_COST
    }
}

impl Default for CostTable {
    /// Costs derived from the representative per-type stats in
    /// `AgentTypeInfo::default_for`.
    fn default() -> Self {
        Self::from_match(&MatchInfo::with_width(1))
    }
}
