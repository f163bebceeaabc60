//! `hive-player`: the per-turn pipeline and the host-facing surface.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`player`]      | `Player<B, P>`: merge → controllers → decide → drain     |
//! | [`builder`]     | `PlayerBuilder`, `search_planner`                         |
//! | [`coordinator`] | `TurnCoordinator`, `TurnPhase`, `run_worker`              |
//! | [`session`]     | `MatchSession`, interface constants                       |
//! | [`observer`]    | `TurnObserver`, `TurnSummary`, `NoopObserver`, `TracingObserver` |
//! | [`error`]       | `PlayerError`, `PlayerResult<T>`                          |
//!
//! # Threads
//!
//! ```text
//!   host thread                         worker thread (lent by host)
//!   ───────────                         ────────────────────────────
//!   receive_turn_state(snap) ──copy──▶  next_snapshot (wakes)
//!                                       Player::process_turn (unlocked)
//!   turn_order_request(t) ◀──copy────   publish(t, orders)
//! ```
//!
//! The host thread never waits on the worker; a late turn answers "not
//! ready" and the host moves on.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let session = MatchSession::startup(startup_info)?;
//! std::thread::scope(|s| {
//!     s.spawn(|| session.thread_entry(0));
//!     session.receive_turn_state(&snapshot);
//!     // ... later, within the host's budget:
//!     if session.turn_order_request(snapshot.tick, &mut orders) { /* apply */ }
//!     session.shutdown();
//! });
//! ```

pub mod builder;
pub mod coordinator;
pub mod error;
pub mod observer;
pub mod player;
pub mod session;


pub use builder::{PlayerBuilder, search_planner};
pub use coordinator::{TurnCoordinator, TurnPhase, run_worker};
pub use error::{PlayerError, PlayerResult};
pub use observer::{NoopObserver, TracingObserver, TurnObserver, TurnSummary};
pub use player::Player;
pub use session::{AUTHOR_NAME, INTERFACE_VERSION, MatchSession, PLAYER_NAME};
