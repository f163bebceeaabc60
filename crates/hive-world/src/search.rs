//! Bounded best-first search over the perceived grid.
//!
//! # Pluggability
//!
//! The repath scheduler calls search through the [`PathPlanner`] trait, so a
//! different planner (or a counting test double) can be dropped in without
//! touching the scheduler.  [`SearchEngine`] is the default.
//!
//! # Scratch reuse
//!
//! One `SearchNode` per tile lives for the lifetime of the engine.  Every
//! node a search touches is recorded, and only those are reset afterwards, so
//! a short search on a 256×256 map does not pay for clearing 65 536 nodes.
//!
//! # Frontier
//!
//! The open set is a [`MinHeap`] keyed by tile index.  A node reached again
//! with a cheaper cost has its heap entry lowered in place rather than pushed
//! twice, so the frontier never holds more than one entry per tile and its
//! capacity is simply the tile count.
//!
//! # Result shape
//!
//! A search always yields at least one order.  Anything other than reaching
//! the goal produces `[Hold]`; the accompanying [`SearchOutcome`] says why.

use tracing::{debug, warn};

use hive_core::{AgentType, Direction, MinHeap, OrderCode, TileCoord, TileIndex};

use crate::cost::CostTable;
use crate::grid::{TileRecord, WorldModel};

/// Weight of the octile tie-breaker added to the Manhattan heuristic.  Small
/// enough that total overestimation stays well below one step on the largest
/// map, so routes remain shortest while ties favour the straight line.
const TIE_BREAK_WEIGHT: f32 = 1.0e-3;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Why a search ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchOutcome {
    /// Start and goal coincide; no search was run.
    Trivial,
    /// The goal was settled.
    Found,
    /// The frontier emptied without reaching the goal.
    Unreachable,
    /// The expansion cap was hit first.
    CapReached,
}

/// Ordered orders from start to goal plus search bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub orders:   Vec<OrderCode>,
    pub outcome:  SearchOutcome,
    /// Accumulated step cost; 0 unless `Found`.
    pub cost:     f32,
    /// Nodes closed during the search.
    pub expanded: usize,
}

impl Path {
    /// The single-HOLD result.
    pub fn hold(outcome: SearchOutcome, expanded: usize) -> Self {
        Self { orders: vec![OrderCode::Hold], outcome, cost: 0.0, expanded }
    }

    /// `true` when the orders actually lead to the goal.
    #[inline]
    pub fn reaches_goal(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found | SearchOutcome::Trivial)
    }

    /// Where `start` ends up after applying every move in the path.
    pub fn destination(&self, start: TileCoord) -> TileCoord {
        self.orders
            .iter()
            .filter_map(|o| o.move_direction())
            .fold(start, TileCoord::step)
    }
}

/// Search flavour.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchMode {
    /// Dijkstra: no heuristic.  Cheap nearest-cell queries.
    Uniform,
    /// A*: Manhattan distance plus an octile tie-breaker.  Long-range routing.
    Weighted,
}

// ── PathPlanner trait ─────────────────────────────────────────────────────────

/// Pluggable route planner.
///
/// Takes `&mut self` because planners own reusable scratch memory.  All
/// calls happen on the player's worker thread, hence `Send` but not `Sync`.
pub trait PathPlanner: Send {
    /// Plan from `start` to `goal` for an agent of `agent_type`.  Never
    /// fails: an unplannable request yields `[Hold]`.
    fn plan(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        goal: TileCoord,
        agent_type: AgentType,
    ) -> Path;

    /// Plan from `start` to the nearest tile never seen at all.  Returns the
    /// tile and a path whose first order is a move, or `None` when nothing
    /// unseen is reachable within the planner's budget.
    fn plan_to_unseen(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        agent_type: AgentType,
    ) -> Option<(TileCoord, Path)>;
}

impl PathPlanner for SearchEngine {
    fn plan(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        goal: TileCoord,
        agent_type: AgentType,
    ) -> Path {
        self.find_path(world, start, goal, agent_type, SearchMode::Weighted)
    }

    fn plan_to_unseen(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        agent_type: AgentType,
    ) -> Option<(TileCoord, Path)> {
        if world.unexplored() == 0 {
            return None;
        }
        self.find_nearest(world, start, agent_type, |c, rec| c != start && rec.last_seen.is_none())
            .filter(|(_, path)| path.orders.first().is_some_and(|o| o.is_move()))
    }
}

// ── Scratch nodes ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
enum NodeState {
    #[default]
    Unvisited,
    Open,
    Closed,
}

#[derive(Copy, Clone, Debug)]
struct SearchNode {
    parent: TileIndex,
    via:    Option<Direction>,
    g:      f32,
    h:      f32,
    state:  NodeState,
}

impl Default for SearchNode {
    fn default() -> Self {
        Self {
            parent: TileIndex::INVALID,
            via:    None,
            g:      f32::INFINITY,
            h:      0.0,
            state:  NodeState::Unvisited,
        }
    }
}

/// How an exploration ended: the settled target (if any) and the count of
/// closed nodes.
struct Exploration {
    target:   Option<TileIndex>,
    outcome:  SearchOutcome,
    expanded: usize,
}

// ── SearchEngine ──────────────────────────────────────────────────────────────

pub struct SearchEngine {
    costs:         CostTable,
    expansion_cap: usize,
    nodes:         Vec<SearchNode>,
    touched:       Vec<TileIndex>,
    frontier:      MinHeap<TileIndex>,
}

impl SearchEngine {
    pub fn new(costs: CostTable, expansion_cap: usize) -> Self {
        Self {
            costs,
            expansion_cap: expansion_cap.max(1),
            nodes:         Vec::new(),
            touched:       Vec::new(),
            frontier:      MinHeap::with_capacity(0),
        }
    }

    #[inline]
    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    #[inline]
    pub fn expansion_cap(&self) -> usize {
        self.expansion_cap
    }

    pub fn set_expansion_cap(&mut self, cap: usize) {
        self.expansion_cap = cap.max(1);
    }

    /// Route from `start` to `goal`.
    pub fn find_path(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        goal: TileCoord,
        agent_type: AgentType,
        mode: SearchMode,
    ) -> Path {
        debug_assert!(world.in_bounds(start) && world.in_bounds(goal), "{start} -> {goal} off map");
        if start == goal {
            return Path { orders: vec![OrderCode::Hold], outcome: SearchOutcome::Trivial, cost: 0.0, expanded: 0 };
        }
        let (Some(start_idx), Some(goal_idx)) = (world.index_of(start), world.index_of(goal)) else {
            return Path::hold(SearchOutcome::Unreachable, 0);
        };

        let min_step = self.costs.min_step_cost();
        let h = move |c: TileCoord| match mode {
            SearchMode::Uniform  => 0.0,
            SearchMode::Weighted => c.manhattan(goal) as f32 * min_step + TIE_BREAK_WEIGHT * c.octile(goal),
        };

        let run = self.explore(world, start_idx, agent_type, h, |idx, _| idx == goal_idx);
        let path = match run.target {
            Some(idx) => self.reconstruct(idx, run.expanded),
            None => {
                debug!(%start, %goal, ?agent_type, outcome = ?run.outcome, expanded = run.expanded, "search gave up");
                Path::hold(run.outcome, run.expanded)
            }
        };
        self.reset();
        path
    }

    /// Uniform-cost search from `start` that stops at the first settled tile
    /// satisfying `is_target`.  Returns that tile and the path to it.
    pub fn find_nearest<F>(
        &mut self,
        world: &WorldModel,
        start: TileCoord,
        agent_type: AgentType,
        mut is_target: F,
    ) -> Option<(TileCoord, Path)>
    where
        F: FnMut(TileCoord, &TileRecord) -> bool,
    {
        debug_assert!(world.in_bounds(start), "{start} off map");
        let start_idx = world.index_of(start)?;
        let run = self.explore(world, start_idx, agent_type, |_| 0.0, |idx, rec| {
            is_target(world.coord_of(idx), rec)
        });
        let found = run.target.map(|idx| {
            let coord = world.coord_of(idx);
            let path = if idx == start_idx {
                Path { orders: vec![OrderCode::Hold], outcome: SearchOutcome::Trivial, cost: 0.0, expanded: run.expanded }
            } else {
                self.reconstruct(idx, run.expanded)
            };
            (coord, path)
        });
        if found.is_none() {
            debug!(%start, ?agent_type, outcome = ?run.outcome, expanded = run.expanded, "nearest-match search found nothing");
        }
        self.reset();
        found
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Size the scratch arrays for `tiles` cells.  Only reallocates when the
    /// map size changes.
    fn prepare(&mut self, tiles: usize) {
        if self.nodes.len() != tiles {
            self.nodes = vec![SearchNode::default(); tiles];
            self.frontier = MinHeap::with_capacity(tiles);
            self.touched.clear();
        }
    }

    /// Return every touched node to the unvisited state.
    fn reset(&mut self) {
        for idx in self.touched.drain(..) {
            self.nodes[idx.index()] = SearchNode::default();
        }
        self.frontier.clear();
    }

    fn open(&mut self, idx: TileIndex, parent: TileIndex, via: Option<Direction>, g: f32, h: f32) {
        if let Err(e) = self.frontier.push(idx, g + h) {
            warn!(%idx, error = %e, "search frontier full; dropping node");
            return;
        }
        let node = &mut self.nodes[idx.index()];
        if node.state == NodeState::Unvisited {
            self.touched.push(idx);
        }
        *node = SearchNode { parent, via, g, h, state: NodeState::Open };
    }

    fn explore<H, T>(
        &mut self,
        world: &WorldModel,
        start: TileIndex,
        agent_type: AgentType,
        h: H,
        mut is_target: T,
    ) -> Exploration
    where
        H: Fn(TileCoord) -> f32,
        T: FnMut(TileIndex, &TileRecord) -> bool,
    {
        self.prepare(world.tile_count());
        self.open(start, TileIndex::INVALID, None, 0.0, h(world.coord_of(start)));

        let mut expanded = 0;
        while let Some(entry) = self.frontier.pop() {
            let cur = entry.key;
            if is_target(cur, world.record_at(cur)) {
                return Exploration { target: Some(cur), outcome: SearchOutcome::Found, expanded };
            }
            if expanded >= self.expansion_cap {
                return Exploration { target: None, outcome: SearchOutcome::CapReached, expanded };
            }
            self.nodes[cur.index()].state = NodeState::Closed;
            expanded += 1;

            let cur_coord = world.coord_of(cur);
            let cur_g = self.nodes[cur.index()].g;
            for dir in Direction::ALL {
                let Some(next) = world.index_of(cur_coord.step(dir)) else { continue };
                let node = self.nodes[next.index()];
                if node.state == NodeState::Closed {
                    continue;
                }
                let tile = world.record_at(next).tile;
                if !world.tile_is_passable(tile) {
                    continue;
                }
                let Some(step) = self.costs.step_cost(agent_type, tile) else { continue };
                let g = cur_g + step;

                match node.state {
                    NodeState::Unvisited => {
                        let next_h = h(world.coord_of(next));
                        self.open(next, cur, Some(dir), g, next_h);
                    }
                    NodeState::Open if g < node.g => {
                        if let Some(pos) = self.frontier.index_of(next) {
                            self.frontier.update_at(pos, next, g + node.h);
                        }
                        let n = &mut self.nodes[next.index()];
                        n.g = g;
                        n.parent = cur;
                        n.via = Some(dir);
                    }
                    _ => {}
                }
            }
        }
        Exploration { target: None, outcome: SearchOutcome::Unreachable, expanded }
    }

    /// Walk parent links back from `target` and reverse into start → goal
    /// order.
    fn reconstruct(&self, target: TileIndex, expanded: usize) -> Path {
        let mut orders = Vec::new();
        let mut cur = target;
        while let Some(dir) = self.nodes[cur.index()].via {
            orders.push(dir.move_order());
            cur = self.nodes[cur.index()].parent;
        }
        orders.reverse();
        Path {
            orders,
            outcome: SearchOutcome::Found,
            cost: self.nodes[target.index()].g,
            expanded,
        }
    }
}
