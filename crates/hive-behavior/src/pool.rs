//! `ControllerPool`: fixed-capacity storage for live agent controllers.
//!
//! Slots are recycled through a free list, so steady-state turns allocate
//! nothing.  An `FxHashMap` maps host agent ids to slots.

use rustc_hash::FxHashMap;
use tracing::warn;

use hive_core::{AgentId, AgentReport, OrderCode, TileCoord};
use hive_schedule::{RepathTarget, RouteRequest};
use hive_world::Path;

use crate::{AgentController, BehaviorError, BehaviorResult};

pub struct ControllerPool {
    slots:        Vec<Option<AgentController>>,
    free:         Vec<usize>,
    index:        FxHashMap<AgentId, usize>,
    capacity:     usize,
    max_path_len: usize,
    seed:         u64,
}

impl ControllerPool {
    pub fn new(capacity: usize, max_path_len: usize, seed: u64) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            index: FxHashMap::default(),
            capacity,
            max_path_len,
            seed,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.index.contains_key(&agent)
    }

    /// The controller for `report.agent`, creating one if the agent is new.
    /// Existing controllers are updated with the report.
    pub fn acquire(&mut self, report: AgentReport) -> BehaviorResult<&mut AgentController> {
        let (max_path_len, seed) = (self.max_path_len, self.seed);
        if let Some(&slot) = self.index.get(&report.agent) {
            let ctrl = self.slots[slot].get_or_insert_with(|| AgentController::new(report, max_path_len, seed));
            ctrl.update(report);
            return Ok(ctrl);
        }

        let slot = match self.free.pop() {
            Some(slot) => slot,
            None if self.slots.len() < self.capacity => {
                self.slots.push(None);
                self.slots.len() - 1
            }
            None => {
                warn!(agent = %report.agent, capacity = self.capacity, "controller pool exhausted");
                return Err(BehaviorError::PoolExhausted { capacity: self.capacity });
            }
        };
        self.index.insert(report.agent, slot);
        Ok(self.slots[slot].insert(AgentController::new(report, max_path_len, seed)))
    }

    pub fn get(&self, agent: AgentId) -> Option<&AgentController> {
        let slot = *self.index.get(&agent)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentController> {
        let slot = *self.index.get(&agent)?;
        self.slots[slot].as_mut()
    }

    /// Return `agent`'s slot to the free list.
    pub fn release(&mut self, agent: AgentId) -> Option<AgentController> {
        let slot = self.index.remove(&agent)?;
        self.free.push(slot);
        self.slots[slot].take()
    }

    /// Live agent ids in ascending order, so per-turn passes are deterministic.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.index.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentController> + '_ {
        self.slots.iter().flatten()
    }
}

impl RepathTarget for ControllerPool {
    fn route_request(&self, agent: AgentId) -> Option<RouteRequest> {
        let ctrl = self.get(agent)?;
        if ctrl.report.is_dead() {
            return None;
        }
        Some(RouteRequest {
            start:      ctrl.coord,
            goal:       ctrl.goal?,
            agent_type: ctrl.report.agent_type,
        })
    }

    fn install_path(&mut self, agent: AgentId, goal: TileCoord, path: Path) {
        if let Some(ctrl) = self.get_mut(agent) {
            ctrl.path.install(&path, goal);
        }
    }

    fn next_order(&mut self, agent: AgentId) -> OrderCode {
        self.get_mut(agent).map_or(OrderCode::Hold, |c| c.path.next_order())
    }
}
