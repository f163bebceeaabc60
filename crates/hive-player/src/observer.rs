//! Turn observer hooks for progress reporting and diagnostics.

use tracing::info;

use hive_core::Tick;

/// What one turn of the pipeline did.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TurnSummary {
    pub tick:             Tick,
    /// Live agents with a controller after the turn.
    pub agents:           usize,
    pub orders:           usize,
    /// Cells the host showed us this turn.
    pub tiles_seen:       usize,
    pub repath_requests:  usize,
    pub searches:         usize,
    /// Requests that missed the admission cap.
    pub deferred:         usize,
    /// Searches that ended in HOLD.
    pub failed_searches:  usize,
    pub nodes_expanded:   usize,
    /// Requests or agents dropped because a fixed-capacity structure was full.
    pub capacity_dropped: usize,
}

/// Callbacks invoked by [`Player::process_turn`][crate::Player::process_turn].
///
/// All methods default to no-ops.
///
/// # Example: slow-turn detector
///
/// ```rust,ignore
/// struct Busy;
///
/// impl TurnObserver for Busy {
///     fn on_turn_end(&mut self, summary: &TurnSummary) {
///         if summary.deferred > 0 {
///             eprintln!("{}: {} agents on stale paths", summary.tick, summary.deferred);
///         }
///     }
/// }
/// ```
pub trait TurnObserver {
    fn on_turn_start(&mut self, _tick: Tick) {}

    fn on_turn_end(&mut self, _summary: &TurnSummary) {}
}

/// A [`TurnObserver`] that does nothing.
pub struct NoopObserver;

impl TurnObserver for NoopObserver {}

/// Emits one `info!` event per completed turn.
pub struct TracingObserver;

impl TurnObserver for TracingObserver {
    fn on_turn_end(&mut self, s: &TurnSummary) {
        info!(
            tick = %s.tick,
            agents = s.agents,
            orders = s.orders,
            searches = s.searches,
            deferred = s.deferred,
            failed = s.failed_searches,
            expanded = s.nodes_expanded,
            "turn complete"
        );
    }
}
