//! Fleebs: move in straight lines, turn back at the edges, and try to
//! eat anything that is not a Fleeb.

use creatures_agents::{Behavior, BehaviorError, Blueprint, HookContext, NewCreature};
use creatures_types::{AgentState, CreatureSnapshot, Footprint, Interaction, InteractionKind, TickAction};

use super::{TIRED, turn_from_edge};

/// Kind name.
pub const KIND: &str = "Fleeb";

/// A fresh fleeb.
pub fn fleeb() -> NewCreature {
    NewCreature::new(Blueprint::new(KIND, Footprint::new(20, 20)), Fleeb)
}

/// Fleeb behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fleeb;

impl Behavior for Fleeb {
    fn decide_tick(
        &mut self,
        ctx: &mut HookContext<'_>,
        me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        me.motion.max_velocity = 5.0;
        me.motion.acceleration = 2.0;
        if let Some(angle) = turn_from_edge(&ctx.arena, me.motion.position) {
            me.motion.angle = angle;
        }
        let action = if me.alertness < TIRED {
            TickAction::Sleep
        } else {
            TickAction::Move
        };
        Ok(Some(action))
    }

    fn propose_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
        other: &CreatureSnapshot,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok((other.kind != KIND).then(|| Interaction::new(InteractionKind::Eat)))
    }
}
