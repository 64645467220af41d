//! Korubs: armed wanderers that eat, attack or ignore whatever they
//! bump into, at random.

use rust_decimal_macros::dec;

use creatures_agents::{Behavior, BehaviorError, Blueprint, HookContext, NewCreature};
use creatures_types::{
    AgentState, CreatureSnapshot, Defense, DefenseKind, Footprint, Interaction, InteractionKind,
    TickAction, Weapon, WeaponKind,
};

use super::{rest_or, turn_from_edge};

/// Kind name.
pub const KIND: &str = "Korub";

/// Crushing weapon.
pub const CLAW: &str = "big claw";

/// Venom weapon.
pub const ACID: &str = "acid";

/// A fresh korub with its gear.
pub fn korub() -> NewCreature {
    let blueprint = Blueprint::new(KIND, Footprint::new(30, 30))
        .max_velocity(10.0)
        .weapon(CLAW, Weapon::new(WeaponKind::Crush, dec!(100)))
        .weapon(ACID, Weapon::new(WeaponKind::Venom, dec!(100)))
        .defense("shell", Defense::new(DefenseKind::Shell, dec!(10)));
    NewCreature::new(blueprint, Korub)
}

/// Korub behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct Korub;

impl Behavior for Korub {
    fn decide_tick(
        &mut self,
        ctx: &mut HookContext<'_>,
        me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        let nudge = ctx.rng.int_inclusive(-1, 1);
        me.motion.steering += i32::try_from(nudge).map_or(0.0, f64::from);
        me.motion.acceleration = 1.0;
        if let Some(angle) = turn_from_edge(&ctx.arena, me.motion.position) {
            me.motion.angle = angle;
        }
        Ok(Some(rest_or(me.status, me.alertness, TickAction::Move)))
    }

    fn propose_interaction(
        &mut self,
        ctx: &mut HookContext<'_>,
        _me: &AgentState,
        _other: &CreatureSnapshot,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok(Some(match ctx.rng.int_inclusive(1, 4) {
            1 => Interaction::new(InteractionKind::Eat),
            2 => Interaction::with_details(InteractionKind::Attack, CLAW),
            3 => Interaction::with_details(InteractionKind::Attack, ACID),
            _ => Interaction::ignore(),
        }))
    }
}
