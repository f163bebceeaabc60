//! Per-turn state handed to every behaviour callback.

use hive_core::{MatchInfo, ObservedAgent, PlayerConfig, Tick, TileCoord};
use hive_world::WorldModel;

use crate::ColonyCensus;

/// The player's view of the current turn.
///
/// Agents are decided one at a time in ascending id order, and the world is
/// borrowed mutably, so a reservation made while deciding one agent is
/// visible when deciding the next.
pub struct TurnContext<'a> {
    pub tick:       Tick,
    pub nutrients:  i32,
    pub world:      &'a mut WorldModel,
    pub census:     &'a ColonyCensus,
    /// Where our queen was last reported, if we have one.
    pub queen:      Option<TileCoord>,
    pub enemies:    &'a [ObservedAgent],
    pub config:     &'a PlayerConfig,
    pub match_info: &'a MatchInfo,
}

impl TurnContext<'_> {
    /// Can the colony afford to birth an agent of `agent_type` right now?
    #[inline]
    pub fn can_afford(&self, agent_type: hive_core::AgentType) -> bool {
        self.nutrients >= self.match_info.agent_type(agent_type).cost_to_birth
    }

    /// The closest visible enemy to `from` (taxicab), if any.
    pub fn nearest_enemy(&self, from: TileCoord) -> Option<&ObservedAgent> {
        self.enemies.iter().min_by_key(|e| e.coord.manhattan(from))
    }
}
