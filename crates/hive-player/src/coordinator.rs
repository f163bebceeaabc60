//! `TurnCoordinator`: snapshot / orders handoff between the host thread and
//! the player's worker thread.
//!
//! # Protocol
//!
//! ```text
//!            submit_snapshot              worker wakes
//!   Idle ───────────────────▶ Pending ───────────────────▶ Processing
//!    ▲                         ▲  │ (newer snapshot overwrites)   │
//!    │ request_result          │  └─────────────────────────────┐ │ publish
//!    └──────────────── ResultReady ◀────────────────────────────┴─┘
//!
//!   shutdown: any state ──▶ Shutdown (terminal)
//! ```
//!
//! One mutex guards the pending snapshot, the published orders, and the tick
//! bookkeeping; one condvar wakes the worker.  The host side never blocks on
//! the worker: `submit_snapshot` only copies and signals, and
//! `request_result` answers "not ready" immediately when the worker is
//! behind.  A slow worker skips turns instead of queueing them.
//!
//! A poisoned lock is recovered: the shared state is plain data that every
//! critical section leaves consistent.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use hive_behavior::BehaviorModel;
use hive_core::{Tick, TurnOrders, TurnSnapshot};
use hive_world::PathPlanner;

use crate::{Player, TurnObserver};

/// Where the current turn is in the handoff.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TurnPhase {
    /// Nothing pending; the last result (if any) has been collected.
    Idle,
    /// A snapshot is waiting for the worker.
    SnapshotPending,
    /// The worker has copied the snapshot out and is deciding.
    Processing,
    /// Orders for the current tick are ready.
    ResultReady,
    /// Terminal.
    Shutdown,
}

struct Shared {
    running:        bool,
    phase:          TurnPhase,
    snapshot:       TurnSnapshot,
    /// Tick of the most recently submitted snapshot.
    current:        Option<Tick>,
    last_processed: Option<Tick>,
    orders:         TurnOrders,
}

impl Shared {
    #[inline]
    fn has_fresh_snapshot(&self) -> bool {
        self.current.is_some() && self.current != self.last_processed
    }
}

/// Cheap to clone; all clones share one handoff slot.
#[derive(Clone)]
pub struct TurnCoordinator {
    inner: Arc<(Mutex<Shared>, Condvar)>,
}

impl Default for TurnCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnCoordinator {
    pub fn new() -> Self {
        let shared = Shared {
            running:        true,
            phase:          TurnPhase::Idle,
            snapshot:       TurnSnapshot::default(),
            current:        None,
            last_processed: None,
            orders:         TurnOrders::new(),
        };
        Self { inner: Arc::new((Mutex::new(shared), Condvar::new())) }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> TurnPhase {
        self.lock().phase
    }

    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Tick of the last snapshot the worker finished.
    pub fn last_processed(&self) -> Option<Tick> {
        self.lock().last_processed
    }

    // ── Host side ─────────────────────────────────────────────────────────

    /// Hand a new snapshot to the worker.  Copies and signals, nothing more.
    ///
    /// Returns `false` after shutdown.
    pub fn submit_snapshot(&self, snapshot: &TurnSnapshot) -> bool {
        let mut shared = self.lock();
        if !shared.running {
            return false;
        }
        if shared.phase == TurnPhase::SnapshotPending {
            if let Some(stale) = shared.current {
                warn!(%stale, fresh = %snapshot.tick, "worker behind; pending snapshot overwritten");
            }
        }
        shared.snapshot.clone_from(snapshot);
        shared.current = Some(snapshot.tick);
        shared.phase = TurnPhase::SnapshotPending;
        drop(shared);
        self.inner.1.notify_one();
        true
    }

    /// Copy out the orders for `tick` if the worker has finished it.
    ///
    /// Never blocks.  Returns `false` when `tick` is not the current turn or
    /// the worker is still on it.
    pub fn request_result(&self, tick: Tick, out: &mut TurnOrders) -> bool {
        let mut shared = self.lock();
        if shared.current != Some(tick) {
            warn!(%tick, current = ?shared.current, "orders requested for a turn that is not current");
            return false;
        }
        if shared.last_processed != Some(tick) {
            return false;
        }
        out.clone_from(&shared.orders);
        if shared.phase == TurnPhase::ResultReady {
            shared.phase = TurnPhase::Idle;
        }
        true
    }

    /// Stop the worker.  It finishes any in-flight turn, then exits.
    pub fn shutdown(&self) {
        let mut shared = self.lock();
        shared.running = false;
        shared.phase = TurnPhase::Shutdown;
        drop(shared);
        self.inner.1.notify_all();
    }

    // ── Worker side ───────────────────────────────────────────────────────

    /// Block until a snapshot newer than the last processed one arrives, then
    /// copy it into `buf`.  Returns `false` once shut down.
    pub fn next_snapshot(&self, buf: &mut TurnSnapshot) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut shared = cvar
            .wait_while(guard, |s| s.running && !s.has_fresh_snapshot())
            .unwrap_or_else(PoisonError::into_inner);
        if !shared.running {
            return false;
        }
        buf.clone_from(&shared.snapshot);
        shared.phase = TurnPhase::Processing;
        true
    }

    /// Publish the orders computed for `tick`.
    pub fn publish(&self, tick: Tick, orders: &TurnOrders) {
        let mut shared = self.lock();
        shared.orders.clone_from(orders);
        shared.last_processed = Some(tick);
        if !shared.running {
            return;
        }
        // A newer snapshot may have landed while we were busy.
        shared.phase = if shared.current == Some(tick) {
            TurnPhase::ResultReady
        } else {
            TurnPhase::SnapshotPending
        };
    }
}

// ── Worker loop ───────────────────────────────────────────────────────────────

/// Run `player` against `coordinator` until shutdown.
///
/// The lock is held only while copying in and out; the pipeline itself runs
/// unlocked.  A malformed snapshot is logged and answered with an empty
/// batch so the host is never left waiting on a turn.
pub fn run_worker<B, P, O>(coordinator: &TurnCoordinator, player: &mut Player<B, P>, observer: &mut O)
where
    B: BehaviorModel,
    P: PathPlanner,
    O: TurnObserver,
{
    let mut snapshot = TurnSnapshot::default();
    let empty = TurnOrders::new();
    while coordinator.next_snapshot(&mut snapshot) {
        let tick = snapshot.tick;
        match player.process_turn(&snapshot, observer) {
            Ok(_) => coordinator.publish(tick, player.orders()),
            Err(e) => {
                warn!(%tick, error = %e, "turn skipped");
                coordinator.publish(tick, &empty);
            }
        }
    }
}
