//! `RepathScheduler`: bounded, priority-ordered search admission.
//!
//! Search dominates turn latency, so only `repaths_per_turn` searches run in
//! any one turn no matter how many agents want a new route.  Requests are
//! served lowest priority value first; agents that miss the cut walk on
//! whatever they already have cached (possibly just a HOLD) and ask again
//! next turn.
//!
//! Exploration requests (`RouteGoal::Unexplored`) are admitted the same way
//! and count against the same cap as routes to a known tile.
//!
//! Nothing in the queue survives a turn: `begin_turn` empties it and resets
//! the search counter.  The only cross-turn state is each agent's own
//! `CachedPath`, owned by the caller and reached through [`RepathTarget`].

use tracing::{debug, warn};

use hive_core::{AgentId, AgentType, MinHeap, OrderCode, TileCoord, TurnOrders};
use hive_world::{Path, PathPlanner, SearchOutcome, WorldModel};

use crate::{ScheduleError, ScheduleResult};

/// Destination of a route request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RouteGoal {
    /// A known tile.
    Tile(TileCoord),
    /// Whichever never-seen tile is nearest once the search runs.
    Unexplored,
}

/// Where an agent wants to go.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct RouteRequest {
    pub start:      TileCoord,
    pub goal:       RouteGoal,
    pub agent_type: AgentType,
}

/// The owner of per-agent cached paths, as seen by the scheduler.
pub trait RepathTarget {
    /// Current position and goal of `agent`; `None` if it no longer needs
    /// (or can no longer take) a route.
    fn route_request(&self, agent: AgentId) -> Option<RouteRequest>;

    /// Store a freshly planned path for `agent`, heading for `goal`.
    fn install_path(&mut self, agent: AgentId, goal: TileCoord, path: Path);

    /// Consume `agent`'s next cached order.
    fn next_order(&mut self, agent: AgentId) -> OrderCode;
}

/// What one drain did.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct DrainStats {
    /// Requests popped from the queue.
    pub served:   usize,
    /// Fresh searches run.
    pub searched: usize,
    /// Requests past the admission cap, left on their stale path.
    pub deferred: usize,
    /// Searches that ended without reaching the goal.
    pub failed:   usize,
    /// Nodes expanded across all searches.
    pub expanded: usize,
}

pub struct RepathScheduler {
    queue:    MinHeap<AgentId>,
    cap:      usize,
    executed: usize,
    dropped:  usize,
}

impl RepathScheduler {
    /// `queue_capacity` bounds pending requests; `cap` bounds searches per turn.
    pub fn new(queue_capacity: usize, cap: usize) -> Self {
        Self {
            queue: MinHeap::with_capacity(queue_capacity),
            cap,
            executed: 0,
            dropped: 0,
        }
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Searches run so far this turn.
    #[inline]
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// Requests refused this turn because the queue was full.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Forget last turn's requests and reset the search counter.
    pub fn begin_turn(&mut self) {
        self.queue.clear();
        self.executed = 0;
        self.dropped = 0;
    }

    /// Ask for a repath of `agent`.  Lower `priority` is served first.
    ///
    /// An agent already queued keeps one entry; a lower priority replaces
    /// the old one in place.
    pub fn enqueue(&mut self, agent: AgentId, priority: f32) -> ScheduleResult<()> {
        if let Some(idx) = self.queue.index_of(agent) {
            let current = self.queue.get(idx).map_or(f32::INFINITY, |e| e.priority);
            if priority < current {
                self.queue.update_at(idx, agent, priority);
            }
            return Ok(());
        }
        self.queue.push(agent, priority).map_err(|e| {
            self.dropped += 1;
            warn!(%agent, capacity = e.capacity, "repath queue full; request dropped");
            ScheduleError::QueueFull { agent, capacity: e.capacity }
        })
    }

    /// Serve every queued request in priority order.
    ///
    /// Up to `cap` of them get a fresh search.  Every served agent, searched
    /// or not, then consumes one cached order into `orders`.
    pub fn drain_turn<P, T>(
        &mut self,
        world: &WorldModel,
        planner: &mut P,
        target: &mut T,
        orders: &mut TurnOrders,
    ) -> DrainStats
    where
        P: PathPlanner + ?Sized,
        T: RepathTarget + ?Sized,
    {
        let mut stats = DrainStats::default();
        while let Some(entry) = self.queue.pop() {
            let agent = entry.key;
            stats.served += 1;

            if self.executed < self.cap {
                if let Some(req) = target.route_request(agent) {
                    let (goal, path) = match req.goal {
                        RouteGoal::Tile(goal) => {
                            (goal, planner.plan(world, req.start, goal, req.agent_type))
                        }
                        RouteGoal::Unexplored => planner
                            .plan_to_unseen(world, req.start, req.agent_type)
                            .unwrap_or_else(|| (req.start, Path::hold(SearchOutcome::Unreachable, 0))),
                    };
                    self.executed += 1;
                    stats.searched += 1;
                    stats.expanded += path.expanded;
                    if !path.reaches_goal() {
                        stats.failed += 1;
                    }
                    debug!(%agent, priority = entry.priority, outcome = ?path.outcome, "repath admitted");
                    target.install_path(agent, goal, path);
                }
            } else {
                stats.deferred += 1;
                debug!(%agent, priority = entry.priority, "repath deferred; admission cap reached");
            }

            let order = target.next_order(agent);
            if !orders.push(agent, order) {
                warn!(%agent, ?order, "order batch refused repathed agent");
            }
        }
        stats
    }
}
