//! A no-op behaviour model: agents never receive orders.

use crate::{AgentController, BehaviorModel, Decision, TurnContext};

/// A [`BehaviorModel`] that leaves every agent idle.
///
/// Useful in tests that exercise the turn pipeline without colony rules.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn decide(&self, _ctrl: &mut AgentController, _ctx: &mut TurnContext<'_>) -> Decision {
        Decision::Idle
    }
}
