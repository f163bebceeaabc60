//! `MatchSession`: the entry points a host calls on a player.
//!
//! The host drives a player through a handful of calls:
//!
//! | Host call                  | Here                              | Thread        |
//! |----------------------------|-----------------------------------|---------------|
//! | startup                    | [`MatchSession::startup`]         | host          |
//! | thread entry (per thread)  | [`MatchSession::thread_entry`]    | lent by host  |
//! | receive turn state         | [`MatchSession::receive_turn_state`] | host       |
//! | turn order request         | [`MatchSession::turn_order_request`] | host       |
//! | shutdown                   | [`MatchSession::shutdown`]        | host          |
//!
//! The first lent thread becomes the worker; any further threads return
//! immediately.

use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use hive_behavior::{BehaviorModel, ColonyBehavior};
use hive_core::{PlayerConfig, StartupInfo, Tick, TurnOrders, TurnSnapshot};
use hive_world::{PathPlanner, SearchEngine};

use crate::{
    Player, PlayerBuilder, PlayerError, PlayerResult, TracingObserver, TurnCoordinator,
    run_worker, search_planner,
};

/// Version of the host ↔ player interface this crate speaks.
pub const INTERFACE_VERSION: u32 = 4;

pub const PLAYER_NAME: &str = "hive";

pub const AUTHOR_NAME: &str = "hive developers";

/// One player's side of one match.
pub struct MatchSession<B: BehaviorModel, P: PathPlanner> {
    startup:     StartupInfo,
    coordinator: TurnCoordinator,
    /// Taken by the first thread to enter.
    pending:     Mutex<Option<Player<B, P>>>,
}

impl MatchSession<ColonyBehavior, SearchEngine> {
    /// A session running the stock colony rules with default tuning.
    pub fn startup(info: StartupInfo) -> PlayerResult<Self> {
        let config = PlayerConfig {
            max_turn_secs: info.max_turn_secs,
            ..PlayerConfig::for_match(&info.match_info)
        };
        let planner = search_planner(&config, &info.match_info);
        let player = PlayerBuilder::new(config, ColonyBehavior, planner)
            .match_info(info.match_info.clone())
            .build()?;
        Ok(Self::with_player(info, player))
    }
}

impl<B: BehaviorModel, P: PathPlanner> MatchSession<B, P> {
    /// Wrap an already-built player.
    pub fn with_player(startup: StartupInfo, player: Player<B, P>) -> Self {
        info!(
            player = %startup.player,
            team = %startup.team,
            width = startup.match_info.map_width,
            threads = startup.expected_thread_count,
            "match session started"
        );
        Self {
            startup,
            coordinator: TurnCoordinator::new(),
            pending: Mutex::new(Some(player)),
        }
    }

    pub fn startup_info(&self) -> &StartupInfo {
        &self.startup
    }

    pub fn coordinator(&self) -> &TurnCoordinator {
        &self.coordinator
    }

    /// Body of a host-lent thread.  The first caller runs the worker loop
    /// until shutdown; later callers return at once.
    ///
    /// Returns `Err(ShutDown)` if the session ended before any thread
    /// entered.
    pub fn thread_entry(&self, thread_idx: u32) -> PlayerResult<()> {
        let taken = self.pending.lock().unwrap_or_else(PoisonError::into_inner).take();
        let Some(mut player) = taken else {
            debug!(thread_idx, "spare thread returned");
            return Ok(());
        };
        if !self.coordinator.is_running() {
            return Err(PlayerError::ShutDown);
        }
        debug!(thread_idx, "worker thread entered");
        run_worker(&self.coordinator, &mut player, &mut TracingObserver);
        debug!(thread_idx, "worker thread exited");
        Ok(())
    }

    /// Hand the host's snapshot to the worker.
    pub fn receive_turn_state(&self, snapshot: &TurnSnapshot) -> bool {
        self.coordinator.submit_snapshot(snapshot)
    }

    /// Copy the orders for `turn` into `orders` if they are ready.
    pub fn turn_order_request(&self, turn: Tick, orders: &mut TurnOrders) -> bool {
        self.coordinator.request_result(turn, orders)
    }

    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}
