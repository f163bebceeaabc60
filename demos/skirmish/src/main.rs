//! skirmish: one colony against a scripted host.
//!
//! Generates a random map, starts a `MatchSession`, lends it two threads
//! (the first becomes the worker, the second returns at once) and plays
//! `TURNS` turns.  Each turn the host submits a snapshot, polls for orders
//! until its wall-clock budget runs out, then applies whatever it got.
//!
//! Set `RUST_LOG=hive_player=info` for one line per turn, or `debug` for
//! every search.

mod arena;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use tracing::{info, warn};

use hive_core::{AgentType, MatchInfo, PlayerId, SimRng, StartupInfo, TeamId, Tick, TurnOrders};
use hive_player::{AUTHOR_NAME, INTERFACE_VERSION, MatchSession, PLAYER_NAME};

use arena::Arena;

// ── Constants ─────────────────────────────────────────────────────────────────

const MAP_WIDTH:        u16 = 48;
const TURNS:            u32 = 400;
const SEED:             u64 = 7;
const HOST_THREADS:     u32 = 2;
/// Generous next to a real host so debug builds keep up.
const TURN_BUDGET_SECS: f64 = 0.05;

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    println!("=== skirmish: {PLAYER_NAME} by {AUTHOR_NAME} (interface v{INTERFACE_VERSION}) ===");
    println!("Map: {MAP_WIDTH}×{MAP_WIDTH}  |  Turns: {TURNS}  |  Seed: {SEED}");
    println!();

    let mut rng = SimRng::new(SEED);
    let info = MatchInfo { num_players: 1, ..MatchInfo::with_width(MAP_WIDTH) };
    let mut arena = Arena::generate(info.clone(), &mut rng.child(0));
    let mut host_rng = rng.child(1);

    let startup = StartupInfo {
        match_info:            info,
        player:                PlayerId(0),
        team:                  TeamId(0),
        expected_thread_count: HOST_THREADS,
        max_turn_secs:         TURN_BUDGET_SECS,
    };
    let session = MatchSession::startup(startup)?;
    let budget = Duration::from_secs_f64(TURN_BUDGET_SECS);

    let mut late_turns = 0u32;
    let mut slowest = Duration::ZERO;
    let wall = Instant::now();

    thread::scope(|s| -> Result<()> {
        let lent: Vec<_> = (0..HOST_THREADS)
            .map(|idx| {
                let session = &session;
                s.spawn(move || session.thread_entry(idx))
            })
            .collect();

        let mut orders = TurnOrders::new();
        for turn in 0..TURNS {
            let tick = Tick(turn);
            session.receive_turn_state(&arena.snapshot(tick));

            let started = Instant::now();
            let mut ready = false;
            while started.elapsed() < budget {
                if session.turn_order_request(tick, &mut orders) {
                    ready = true;
                    break;
                }
                thread::yield_now();
            }
            slowest = slowest.max(started.elapsed());
            if !ready {
                late_turns += 1;
                warn!(%tick, "no orders within budget; colony idles");
                orders.clear();
            }

            arena.apply(&orders, &mut host_rng);
            if arena.queen().is_none() {
                info!(%tick, "queen lost; match over");
                break;
            }
        }

        session.shutdown();
        for handle in lent {
            handle.join().map_err(|_| anyhow!("lent thread panicked"))??;
        }
        Ok(())
    })?;

    // ── Summary ───────────────────────────────────────────────────────────────
    let elapsed = wall.elapsed();
    println!("Finished in {:.2}s (slowest turn {:.2} ms)", elapsed.as_secs_f64(), slowest.as_secs_f64() * 1e3);
    println!("Late turns:       {late_turns}");
    println!("Nutrients:        {}", arena.nutrients);
    println!("Food delivered:   {}", arena.delivered);
    println!("Births:           {}", arena.births);
    println!("Drowned:          {}", arena.drowned);
    println!("Population:");
    for agent_type in AgentType::ALL {
        let n = arena.live().filter(|a| a.agent_type == agent_type).count();
        println!("  {agent_type:?}: {n}");
    }
    Ok(())
}
