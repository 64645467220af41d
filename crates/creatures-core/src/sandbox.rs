//! Snapshot-invoke-restore around behavior hooks.
//!
//! A creature's tick hook receives its own state mutably so it can steer.
//! Everything the engine owns is captured before the call and written
//! back afterwards, so a hook that edits its energy, damage, alertness,
//! age, size, gear or position changes nothing. A hook may only change
//! the steering inputs (`angle`, `acceleration`, `steering`,
//! `max_velocity`, `max_steering`) and toggle between awake and asleep.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use creatures_types::{
    AgentState, CreatureId, Defense, Footprint, Interaction, Status, TickAction, Vec2, Weapon,
};

/// The engine-owned fields of a creature, captured before a hook runs.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOwned {
    kind: String,
    id: CreatureId,
    size: Decimal,
    bite_size: Decimal,
    age: u64,
    energy: Decimal,
    damage: Decimal,
    alertness: u32,
    status: Status,
    footprint: Footprint,
    position: Vec2,
    velocity: Vec2,
    weapons: BTreeMap<String, Weapon>,
    defenses: BTreeMap<String, Defense>,
    last_action: Option<TickAction>,
    last_interaction: Option<Interaction>,
}

impl EngineOwned {
    /// Capture the engine-owned fields of `state`.
    pub fn capture(state: &AgentState) -> Self {
        Self {
            kind: state.kind.clone(),
            id: state.id,
            size: state.size,
            bite_size: state.bite_size,
            age: state.age,
            energy: state.energy,
            damage: state.damage,
            alertness: state.alertness,
            status: state.status,
            footprint: state.footprint,
            position: state.motion.position,
            velocity: state.motion.velocity,
            weapons: state.weapons.clone(),
            defenses: state.defenses.clone(),
            last_action: state.last_action,
            last_interaction: state.last_interaction.clone(),
        }
    }

    /// Write the captured fields back onto `state`. Returns whether
    /// anything had been changed.
    pub fn restore(self, state: &mut AgentState) -> bool {
        let status = if self.status.is_live() && state.status.is_live() {
            state.status
        } else {
            self.status
        };
        let tampered = Self::capture(state) != Self { status, ..self.clone() };

        state.kind = self.kind;
        state.id = self.id;
        state.size = self.size;
        state.bite_size = self.bite_size;
        state.age = self.age;
        state.energy = self.energy;
        state.damage = self.damage;
        state.alertness = self.alertness;
        state.status = status;
        state.footprint = self.footprint;
        state.motion.position = self.position;
        state.motion.velocity = self.velocity;
        state.weapons = self.weapons;
        state.defenses = self.defenses;
        state.last_action = self.last_action;
        state.last_interaction = self.last_interaction;
        tampered
    }
}

/// Run `hook` against `state`, then restore every engine-owned field.
///
/// Writes to engine-owned fields are discarded and logged at `warn!`.
pub fn run_sandboxed_hook<T>(
    state: &mut AgentState,
    hook: impl FnOnce(&mut AgentState) -> T,
) -> T {
    let saved = EngineOwned::capture(state);
    let output = hook(state);
    if saved.restore(state) {
        warn!(
            kind = %state.kind,
            creature_id = %state.id,
            "behavior wrote engine-owned fields; changes discarded"
        );
    }
    output
}
