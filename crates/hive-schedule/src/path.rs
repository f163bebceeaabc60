//! `CachedPath`: an agent's planned moves and how far it has walked them.

use hive_core::{OrderCode, TileCoord};
use hive_world::Path;

/// A bounded sequence of orders plus a cursor at the next unconsumed one.
///
/// Paths longer than the capacity are truncated; the agent re-plans from
/// wherever the prefix leaves it.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedPath {
    orders:   Vec<OrderCode>,
    cursor:   usize,
    capacity: usize,
    goal:     Option<TileCoord>,
}

impl CachedPath {
    pub fn new(capacity: usize) -> Self {
        Self {
            orders: Vec::with_capacity(capacity),
            cursor: 0,
            capacity: capacity.max(1),
            goal: None,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replace the cached orders with the first `capacity` orders of `path`.
    pub fn install(&mut self, path: &Path, goal: TileCoord) {
        self.orders.clear();
        self.orders.extend(path.orders.iter().take(self.capacity).copied());
        self.cursor = 0;
        self.goal = Some(goal);
    }

    /// Consume the next order; `Hold` once the path is used up.
    pub fn next_order(&mut self) -> OrderCode {
        match self.orders.get(self.cursor) {
            Some(&order) => {
                self.cursor += 1;
                order
            }
            None => OrderCode::Hold,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<OrderCode> {
        self.orders.get(self.cursor).copied()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.orders.len() - self.cursor
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The goal the current orders were planned toward.
    #[inline]
    pub fn goal(&self) -> Option<TileCoord> {
        self.goal
    }

    /// Share of the path already walked, in `[0, 1]`.  An empty path counts
    /// as fully consumed.
    pub fn consumed_fraction(&self) -> f32 {
        if self.orders.is_empty() {
            1.0
        } else {
            self.cursor as f32 / self.orders.len() as f32
        }
    }

    /// Routine repath priority: agents about to run dry come first.
    #[inline]
    pub fn repath_priority(&self) -> f32 {
        1.0 - self.consumed_fraction()
    }

    /// Drop the cached orders, e.g. after a blocked move.
    pub fn invalidate(&mut self) {
        self.orders.clear();
        self.cursor = 0;
        self.goal = None;
    }
}
