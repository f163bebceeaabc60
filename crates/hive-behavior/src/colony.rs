//! `ColonyBehavior`: the per-class colony rules.
//!
//! One dispatch point on `AgentType`; each class has its own rule function.
//!
//! | Class   | Rule                                                              |
//! |---------|-------------------------------------------------------------------|
//! | Queen   | birth a soldier or a worker when the census and nutrients allow   |
//! | Worker  | reserve the nearest unreserved food, fetch it, drop it at the queen |
//! | Soldier | chase the nearest visible enemy (urgent), otherwise guard the queen |
//! | Scout   | walk to the nearest never-seen tile, else wander randomly         |

use tracing::debug;

use hive_core::{AgentState, AgentType, Direction, OrderCode, TileCoord};

use crate::{AgentController, BehaviorModel, Decision, TurnContext};

/// Soldiers further than this from the queen walk back to her.
pub const GUARD_RADIUS: u32 = 3;

/// Soldiers ignore enemies further away than this.
pub const ENGAGE_RADIUS: u32 = 12;

pub struct ColonyBehavior;

impl BehaviorModel for ColonyBehavior {
    fn decide(&self, ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision {
        match ctrl.report.agent_type {
            AgentType::Queen   => queen(ctrl, ctx),
            AgentType::Worker  => worker(ctrl, ctx),
            AgentType::Soldier => soldier(ctrl, ctx),
            AgentType::Scout   => scout(ctrl, ctx),
        }
    }

    fn on_death(&self, ctrl: &AgentController, ctx: &mut TurnContext<'_>) {
        if let Some(job) = ctrl.job {
            ctx.world.release_tile(job);
        }
    }
}

/// Keep walking the cached route to `goal`, or ask for a new one.
fn route_to(ctrl: &AgentController, goal: TileCoord, priority: f32) -> Decision {
    if ctrl.is_routed_to(goal) {
        Decision::FollowPath
    } else {
        Decision::Repath { goal, priority }
    }
}

fn queen(_ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision {
    let cfg = ctx.config;
    let soldiers = ctx.census.count(AgentType::Soldier);
    let workers = ctx.census.count(AgentType::Worker);

    if ctx.tick.0 >= cfg.soldiers_after_turn
        && soldiers < cfg.min_soldiers
        && ctx.can_afford(AgentType::Soldier)
    {
        return Decision::Act(AgentType::Soldier.birth_order());
    }
    if workers < cfg.min_workers
        && (workers as usize) < ctx.world.food_tiles().count()
        && ctx.can_afford(AgentType::Worker)
    {
        return Decision::Act(AgentType::Worker.birth_order());
    }
    Decision::Idle
}

fn worker(ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision {
    match ctrl.report.state {
        AgentState::HoldingFood => {
            let Some(queen) = ctx.queen else { return Decision::Idle };
            if ctrl.coord == queen {
                ctrl.goal = None;
                return Decision::Act(OrderCode::DropCarriedObject);
            }
            return route_to(ctrl, queen, ctrl.path.repath_priority());
        }
        AgentState::HoldingSand | AgentState::HoldingDirt | AgentState::HoldingGravel => {
            return Decision::Act(OrderCode::DropCarriedObject);
        }
        AgentState::Normal | AgentState::Dead => {}
    }

    // Drop a job whose food has vanished or been taken by someone else.
    if let Some(job) = ctrl.job {
        let still_ours = ctx.world.reserved_by(job) == Some(ctrl.agent);
        if !still_ours || !ctx.world.has_food(job) {
            if still_ours {
                ctx.world.release_tile(job);
            }
            ctrl.job = None;
        }
    }

    if ctrl.job.is_none() {
        let coord = ctrl.coord;
        let world: &hive_world::WorldModel = ctx.world;
        let target = world
            .food_tiles()
            .filter(|&t| world.reserved_by(t).is_none())
            .min_by_key(|t| t.manhattan(coord));
        match target {
            Some(tile) => {
                ctx.world.reserve_tile(tile, ctrl.agent);
                ctrl.job = Some(tile);
            }
            None => return wander(ctrl),
        }
    }

    let Some(job) = ctrl.job else { return Decision::Idle };
    if ctrl.coord == job {
        ctx.world.release_tile(job);
        ctrl.job = None;
        ctrl.goal = None;
        return Decision::Act(OrderCode::PickUpFood);
    }
    route_to(ctrl, job, ctrl.path.repath_priority())
}

fn soldier(ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision {
    if let Some(enemy) = ctx.nearest_enemy(ctrl.coord) {
        let distance = enemy.coord.manhattan(ctrl.coord);
        if distance == 0 {
            return Decision::Idle;
        }
        if distance == 1 {
            // Adjacent: one greedy step, no search.
            if let Some(dir) = ctrl.coord.greedy_direction_to(enemy.coord) {
                return Decision::Act(dir.move_order());
            }
        }
        if distance <= ENGAGE_RADIUS {
            let goal = enemy.coord;
            debug!(agent = %ctrl.agent, %goal, "soldier engaging");
            // The target moves every turn, so always re-plan urgently.
            return Decision::Repath { goal, priority: ctx.config.urgent_priority };
        }
    }
    match ctx.queen {
        Some(queen) if queen.manhattan(ctrl.coord) > GUARD_RADIUS => {
            route_to(ctrl, queen, ctrl.path.repath_priority())
        }
        _ => Decision::Idle,
    }
}

fn scout(ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision {
    if !ctrl.path.is_exhausted() {
        return Decision::FollowPath;
    }
    // A route that ends where we stand either arrived or found nothing
    // reachable; take a random step before asking again.
    if ctx.world.unexplored() == 0 || ctrl.path.goal() == Some(ctrl.coord) {
        return wander(ctrl);
    }
    Decision::Explore { priority: ctrl.path.repath_priority() }
}

/// One random step.
fn wander(ctrl: &mut AgentController) -> Decision {
    let dir = ctrl.rng.choose(&Direction::ALL).copied().unwrap_or(Direction::North);
    Decision::Act(dir.move_order())
}
