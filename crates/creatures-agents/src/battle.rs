//! Battle arithmetic.
//!
//! [`resolve`] turns one weapon, the defender's response and the
//! defender's defenses into a [`BattleResult`]. It applies nothing: the
//! caller moves the energy, adds the damage and docks alertness.
//!
//! Damage is `floor(potential * min(cap, draw))` where `draw` is a single
//! uniform draw from `[0, 1)`, so a battle is a pure function of its
//! inputs and that one draw.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use creatures_types::{BattleResult, Defense, Interaction, InteractionKind, Weapon};

use crate::config::RulesConfig;
use crate::random::RandomSource;

/// The defense a response raises, if it names one the defender carries.
pub fn raised_defense<'a>(
    response: &Interaction,
    defenses: &'a BTreeMap<String, Defense>,
) -> Option<&'a Defense> {
    if response.action != InteractionKind::Defend {
        return None;
    }
    response.details.as_ref().and_then(|name| defenses.get(name))
}

/// Resolve one attack.
pub fn resolve(
    weapon: &Weapon,
    response: &Interaction,
    defenses: &BTreeMap<String, Defense>,
    rng: &mut dyn RandomSource,
    rules: &RulesConfig,
) -> BattleResult {
    let defense = raised_defense(response, defenses);

    let potential = match defense {
        Some(d) if d.kind.mitigates(weapon.kind) => {
            weapon.power.saturating_sub(d.power).max(Decimal::ZERO)
        }
        _ => weapon.power,
    };

    let draw = Decimal::try_from(rng.unit()).unwrap_or(Decimal::ZERO);
    let multiplier = rules.min_battle_damage_multiplier.min(draw).max(Decimal::ZERO);
    let damage = potential.saturating_mul(multiplier).floor();

    let attacker_cost = weapon.power.saturating_mul(rules.battle_energy_cost_rate);
    let defender_cost =
        defense.map_or(Decimal::ZERO, |d| d.power.saturating_mul(rules.battle_energy_cost_rate));

    BattleResult {
        attacker_energy_change: -attacker_cost,
        attacker_damage_change: Decimal::ZERO,
        defender_energy_change: -defender_cost,
        defender_damage_change: damage,
    }
}
