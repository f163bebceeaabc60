//! The `BehaviorModel` trait: the per-agent decision extension point.

use crate::{AgentController, Decision, TurnContext};

/// Pluggable agent behaviour.
///
/// Called once per live agent per turn, and only for agents that can act
/// (alive, zero exhaustion); the player handles the rest.  The model may
/// mutate the controller (goal, job, RNG) and the world's reservations
/// through the context; orders and routes are requested via the returned
/// [`Decision`].
pub trait BehaviorModel: Send + 'static {
    fn decide(&self, ctrl: &mut AgentController, ctx: &mut TurnContext<'_>) -> Decision;

    /// Called once when an agent's death is reported, before its controller
    /// is released.  Default: nothing.
    fn on_death(&self, _ctrl: &AgentController, _ctx: &mut TurnContext<'_>) {}
}
