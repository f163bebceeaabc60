//! Player configuration.

use crate::protocol::{MAX_AGENTS_PER_PLAYER, MAX_ARENA_WIDTH, MatchInfo};
use crate::{HiveError, HiveResult};

/// Every tunable of one player instance.
///
/// Plain data: build one with `Default`, adjust fields, call [`validate`],
/// hand it to the player builder.
///
/// [`validate`]: PlayerConfig::validate
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerConfig {
    /// Side length of the square map.
    pub map_width: u16,

    /// Most moves a cached path holds.  Longer routes are truncated and
    /// re-planned once the agent has walked the prefix.
    pub max_path_len: usize,

    /// Admission cap: fresh searches allowed per turn.
    pub repaths_per_turn: usize,

    /// Expansion cap: node expansions a single search may perform.
    pub expansion_cap: usize,

    /// Capacity of the scheduler's request heap.
    pub repath_queue_capacity: usize,

    /// Capacity of the controller pool.
    pub controller_capacity: usize,

    /// Fixed scheduler priority for combat and flight repaths.  Routine
    /// requests use `1 − consumed_fraction`, which lies in `[0, 1]`, so this
    /// must be negative to be served ahead of every one of them.
    pub urgent_priority: f32,

    /// Treat lethal terrain (water) as impassable during search.
    pub lethal_is_impassable: bool,

    /// Queen keeps birthing workers until this many are alive.
    pub min_workers: u32,

    /// Soldiers the queen keeps alive once `soldiers_after_turn` has passed.
    pub min_soldiers: u32,

    pub soldiers_after_turn: u32,

    /// Master seed for per-agent RNGs.
    pub seed: u64,

    /// Host wall-clock budget per call, in seconds.
    pub max_turn_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            map_width:             64,
            max_path_len:          32,
            repaths_per_turn:      8,
            expansion_cap:         4096,
            repath_queue_capacity: MAX_AGENTS_PER_PLAYER,
            controller_capacity:   MAX_AGENTS_PER_PLAYER,
            urgent_priority:       -1.0,
            lethal_is_impassable:  true,
            min_workers:           100,
            min_soldiers:          1,
            soldiers_after_turn:   150,
            seed:                  0,
            max_turn_secs:         0.01,
        }
    }
}

impl PlayerConfig {
    /// Defaults with the map width taken from the host's match info.
    pub fn for_match(info: &MatchInfo) -> Self {
        Self { map_width: info.map_width, ..Self::default() }
    }

    /// Total tiles on the map.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.map_width as usize * self.map_width as usize
    }

    pub fn validate(&self) -> HiveResult<()> {
        if self.map_width == 0 || self.map_width > MAX_ARENA_WIDTH {
            return Err(HiveError::Config(format!(
                "map_width {} not in 1..={MAX_ARENA_WIDTH}",
                self.map_width
            )));
        }
        let caps = [
            ("max_path_len", self.max_path_len),
            ("repaths_per_turn", self.repaths_per_turn),
            ("expansion_cap", self.expansion_cap),
            ("repath_queue_capacity", self.repath_queue_capacity),
            ("controller_capacity", self.controller_capacity),
        ];
        if let Some((name, _)) = caps.iter().find(|(_, v)| *v == 0) {
            return Err(HiveError::Config(format!("{name} must be at least 1")));
        }
        if !self.urgent_priority.is_finite() || self.urgent_priority >= 0.0 {
            return Err(HiveError::Config(format!(
                "urgent_priority {} must be finite and below 0",
                self.urgent_priority
            )));
        }
        if self.max_turn_secs.is_nan() || self.max_turn_secs <= 0.0 {
            return Err(HiveError::Config("max_turn_secs must be positive".into()));
        }
        Ok(())
    }
}
