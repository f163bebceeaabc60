//! The `Player` struct and its per-turn pipeline.

use tracing::warn;

use hive_behavior::{AgentController, BehaviorModel, ColonyCensus, ControllerPool, Decision, TurnContext};
use hive_core::{
    AgentId, AgentType, MatchInfo, OrderCode, PlayerConfig, TileCoord, TurnOrders, TurnSnapshot,
};
use hive_schedule::{RepathScheduler, RouteGoal};
use hive_world::{PathPlanner, WorldModel};

use crate::{PlayerResult, TurnObserver, TurnSummary};

/// Everything one player owns for the length of a match.
///
/// `process_turn` runs the pipeline for one snapshot:
///
/// 1. **Merge**: fold visible tiles and food into the perceived world.
/// 2. **Controllers**: recount the census; acquire a controller for every
///    live agent, release the dead (and anything the host stopped reporting).
/// 3. **Decide**: ask the behaviour model about every agent able to act, in
///    ascending id order.  `Act` / `FollowPath` emit an order now; `Repath`
///    and `Explore` enqueue a request.
/// 4. **Drain**: serve queued repaths under the admission cap; each emits one
///    order.
///
/// Create via [`PlayerBuilder`][crate::PlayerBuilder].
pub struct Player<B: BehaviorModel, P: PathPlanner> {
    pub config:     PlayerConfig,
    pub match_info: MatchInfo,
    pub world:      WorldModel,
    /// Router used by the scheduler; every search of the turn runs here.
    pub planner:    P,
    pub scheduler:  RepathScheduler,
    pub pool:       ControllerPool,
    pub census:     ColonyCensus,
    pub behavior:   B,
    queen:          Option<TileCoord>,
    orders:         TurnOrders,
    live:           Vec<AgentId>,
}

impl<B: BehaviorModel, P: PathPlanner> Player<B, P> {
    pub(crate) fn from_parts(
        config:     PlayerConfig,
        match_info: MatchInfo,
        world:      WorldModel,
        planner:    P,
        scheduler:  RepathScheduler,
        pool:       ControllerPool,
        behavior:   B,
    ) -> Self {
        Self {
            config,
            match_info,
            world,
            planner,
            scheduler,
            pool,
            census: ColonyCensus::default(),
            behavior,
            queen: None,
            orders: TurnOrders::new(),
            live: Vec::new(),
        }
    }

    /// Orders produced by the most recent `process_turn`.
    #[inline]
    pub fn orders(&self) -> &TurnOrders {
        &self.orders
    }

    /// Where our queen was last reported.
    #[inline]
    pub fn queen(&self) -> Option<TileCoord> {
        self.queen
    }

    /// Run the full pipeline for one snapshot.
    ///
    /// Only a malformed snapshot (grid buffers of the wrong size) is an
    /// error; every per-agent problem degrades to that agent holding.
    pub fn process_turn<O: TurnObserver>(
        &mut self,
        snapshot: &TurnSnapshot,
        observer: &mut O,
    ) -> PlayerResult<TurnSummary> {
        let tick = snapshot.tick;
        observer.on_turn_start(tick);

        self.orders.clear();
        self.scheduler.begin_turn();
        let mut summary = TurnSummary { tick, ..TurnSummary::default() };

        // ── Merge perception ──────────────────────────────────────────────
        summary.tiles_seen =
            self.world.merge_perception(&snapshot.observed_tiles, &snapshot.food, tick)?;

        // ── Controllers ───────────────────────────────────────────────────
        self.census.recount(&snapshot.reports);
        self.queen = snapshot
            .reports
            .iter()
            .find(|r| r.agent_type == AgentType::Queen && !r.is_dead())
            .map(|r| r.coord);

        let mut reports = snapshot.reports.clone();
        reports.sort_unstable_by_key(|r| r.agent);

        self.live.clear();
        for report in &reports {
            if report.is_dead() {
                self.retire(report.agent, snapshot);
                continue;
            }
            match self.pool.acquire(*report) {
                Ok(_) => self.live.push(report.agent),
                Err(e) => {
                    summary.capacity_dropped += 1;
                    warn!(agent = %report.agent, error = %e, "agent left without a controller");
                }
            }
        }
        // Agents the host no longer reports at all.
        for agent in self.pool.agents() {
            if reports.binary_search_by_key(&agent, |r| r.agent).is_err() {
                self.retire(agent, snapshot);
            }
        }

        // ── Decide ────────────────────────────────────────────────────────
        for i in 0..self.live.len() {
            let agent = self.live[i];
            let Some(ctrl) = self.pool.get_mut(agent) else { continue };
            if !ctrl.report.can_act() {
                continue;
            }
            let mut ctx = TurnContext {
                tick,
                nutrients:  snapshot.current_nutrients,
                world:      &mut self.world,
                census:     &self.census,
                queen:      self.queen,
                enemies:    &snapshot.observed_agents,
                config:     &self.config,
                match_info: &self.match_info,
            };
            let order = match self.behavior.decide(ctrl, &mut ctx) {
                Decision::Idle         => None,
                Decision::Act(order)   => Some(order),
                Decision::FollowPath   => Some(ctrl.path.next_order()),
                Decision::Repath { goal, .. } if goal == ctrl.coord => Some(OrderCode::Hold),
                Decision::Repath { goal, priority } => {
                    ctrl.goal = Some(RouteGoal::Tile(goal));
                    request_route(&mut self.scheduler, ctrl, priority, &mut summary)
                }
                Decision::Explore { priority } => {
                    ctrl.goal = Some(RouteGoal::Unexplored);
                    request_route(&mut self.scheduler, ctrl, priority, &mut summary)
                }
            };
            if let Some(order) = order {
                if !self.orders.push(agent, order) {
                    warn!(%agent, ?order, "order batch refused order");
                }
            }
        }

        // ── Drain repaths ─────────────────────────────────────────────────
        let stats = self.scheduler.drain_turn(&self.world, &mut self.planner, &mut self.pool, &mut self.orders);
        summary.searches = stats.searched;
        summary.deferred = stats.deferred;
        summary.failed_searches = stats.failed;
        summary.nodes_expanded = stats.expanded;

        summary.agents = self.pool.len();
        summary.orders = self.orders.len();
        observer.on_turn_end(&summary);
        Ok(summary)
    }

    /// Release `agent`'s controller and everything it had reserved.
    fn retire(&mut self, agent: AgentId, snapshot: &TurnSnapshot) {
        let Some(ctrl) = self.pool.get(agent) else { return };
        let mut ctx = TurnContext {
            tick:       snapshot.tick,
            nutrients:  snapshot.current_nutrients,
            world:      &mut self.world,
            census:     &self.census,
            queen:      self.queen,
            enemies:    &snapshot.observed_agents,
            config:     &self.config,
            match_info: &self.match_info,
        };
        self.behavior.on_death(ctrl, &mut ctx);
        self.world.release_all(agent);
        self.pool.release(agent);
    }
}

/// Queue a route request for `ctrl`.  A refused request falls back to the
/// stale cached path.
fn request_route(
    scheduler: &mut RepathScheduler,
    ctrl:      &mut AgentController,
    priority:  f32,
    summary:   &mut TurnSummary,
) -> Option<OrderCode> {
    match scheduler.enqueue(ctrl.agent, priority) {
        Ok(()) => {
            summary.repath_requests += 1;
            None
        }
        Err(_) => {
            summary.capacity_dropped += 1;
            Some(ctrl.path.next_order())
        }
    }
}
