//! Fluent builder for constructing a [`Player`].

use hive_behavior::{BehaviorModel, ControllerPool};
use hive_core::{HiveError, MatchInfo, PlayerConfig};
use hive_schedule::RepathScheduler;
use hive_world::{CostTable, PathPlanner, SearchEngine, WorldModel};

use crate::{Player, PlayerResult};

/// Fluent builder for [`Player<B, P>`].
///
/// # Required inputs
///
/// - [`PlayerConfig`]: caps, map width, colony tuning
/// - `B: BehaviorModel`: the decision rules
/// - `P: PathPlanner`: the router used by the repath scheduler
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                      |
/// |-------------------|----------------------------------------------|
/// | `.match_info(m)`  | `MatchInfo::with_width(config.map_width)`    |
/// | `.world(w)`       | fully unseen map of `config.map_width`       |
///
/// # Example
///
/// ```rust,ignore
/// let planner = search_planner(&config, &info);
/// let mut player = PlayerBuilder::new(config, ColonyBehavior, planner)
///     .match_info(info)
///     .build()?;
/// player.process_turn(&snapshot, &mut NoopObserver)?;
/// ```
pub struct PlayerBuilder<B: BehaviorModel, P: PathPlanner> {
    config:     PlayerConfig,
    behavior:   B,
    planner:    P,
    match_info: Option<MatchInfo>,
    world:      Option<WorldModel>,
}

impl<B: BehaviorModel, P: PathPlanner> PlayerBuilder<B, P> {
    pub fn new(config: PlayerConfig, behavior: B, planner: P) -> Self {
        Self { config, behavior, planner, match_info: None, world: None }
    }

    /// Host match rules.  Per-type movement penalties feed the cost table.
    pub fn match_info(mut self, info: MatchInfo) -> Self {
        self.match_info = Some(info);
        self
    }

    /// Start from an already-perceived world (tests, replays).
    pub fn world(mut self, world: WorldModel) -> Self {
        self.world = Some(world);
        self
    }

    /// Validate the configuration and return a ready player.
    pub fn build(self) -> PlayerResult<Player<B, P>> {
        let config = self.config;
        config.validate()?;

        let match_info = self.match_info.unwrap_or_else(|| MatchInfo::with_width(config.map_width));
        let world = match self.world {
            Some(w) if w.width() == config.map_width => w,
            Some(w) => {
                return Err(HiveError::Config(format!(
                    "world width {} does not match map_width {}",
                    w.width(),
                    config.map_width
                ))
                .into());
            }
            None => WorldModel::new(config.map_width, config.lethal_is_impassable)?,
        };
        let scheduler = RepathScheduler::new(config.repath_queue_capacity, config.repaths_per_turn);
        let pool = ControllerPool::new(config.controller_capacity, config.max_path_len, config.seed);

        Ok(Player::from_parts(config, match_info, world, self.planner, scheduler, pool, self.behavior))
    }
}

/// The default planner for a match: a [`SearchEngine`] whose costs come from
/// the host's per-type movement penalties.
pub fn search_planner(config: &PlayerConfig, info: &MatchInfo) -> SearchEngine {
    SearchEngine::new(CostTable::from_match(info), config.expansion_cap)
}
