//! Per-agent controller state.

use hive_core::{AgentId, AgentReport, AgentRng, TileCoord};
use hive_schedule::{CachedPath, RouteGoal};

/// Everything the player remembers about one live agent between turns.
#[derive(Clone, Debug)]
pub struct AgentController {
    pub agent:  AgentId,
    /// The most recent report from the host.
    pub report: AgentReport,
    pub coord:  TileCoord,
    /// What the next route request heads for, if anything.
    pub goal:   Option<RouteGoal>,
    /// Food tile this agent has reserved (workers only).
    pub job:    Option<TileCoord>,
    pub path:   CachedPath,
    pub rng:    AgentRng,
}

impl AgentController {
    pub fn new(report: AgentReport, max_path_len: usize, seed: u64) -> Self {
        Self {
            agent:  report.agent,
            coord:  report.coord,
            report,
            goal:   None,
            job:    None,
            path:   CachedPath::new(max_path_len),
            rng:    AgentRng::new(seed, report.agent),
        }
    }

    /// Take in this turn's report.  A move that bounced off something
    /// invalidates the cached path.
    pub fn update(&mut self, report: AgentReport) {
        debug_assert_eq!(report.agent, self.agent);
        self.report = report;
        self.coord = report.coord;
        if report.result.invalidates_path() {
            self.path.invalidate();
        }
    }

    /// `true` when the cached path was planned toward `goal` and still has
    /// orders left.
    #[inline]
    pub fn is_routed_to(&self, goal: TileCoord) -> bool {
        self.path.goal() == Some(goal) && !self.path.is_exhausted()
    }
}
