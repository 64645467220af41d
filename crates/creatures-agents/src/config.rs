//! Configuration constants and defaults for the rules of the arena.
//!
//! The [`RulesConfig`] struct bundles every tunable the tick engine uses
//! so that callers (engine setup, tests) can override defaults. It is
//! loaded from the `rules` section of `creatures-config.yaml`; the
//! [`ArenaBounds`] come from its `arena` section.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creatures_types::Vec2;

/// Every rule constant of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Energy endowed to every starting creature (default: 5000).
    #[serde(default = "default_initial_energy")]
    pub initial_energy: Decimal,

    /// Upper bound on alertness (default: 100).
    #[serde(default = "default_alertness")]
    pub max_alertness: u32,

    /// Alertness of a new creature (default: 100).
    #[serde(default = "default_alertness")]
    pub initial_alertness: u32,

    /// Age added per tick (default: 1).
    #[serde(default = "default_tick_age_increase")]
    pub tick_age_increase: u64,

    /// Alertness lost per tick (default: 1).
    #[serde(default = "default_tick_alertness_reduction")]
    pub tick_alertness_reduction: u32,

    /// Energy paid to the sink per tick (default: 0.5).
    #[serde(default = "default_tick_energy_reduction")]
    pub tick_energy_reduction: Decimal,

    /// Energy per unit of speed paid on every move (default: 1).
    #[serde(default = "default_velocity_energy_multiplier")]
    pub velocity_energy_multiplier: Decimal,

    /// Energy per unit of battle power paid on every move (default: 0.02).
    #[serde(default = "default_gear_movement_multiplier")]
    pub gear_movement_multiplier: Decimal,

    /// Energy per unit of weapon or defense power used in battle (default: 0.1).
    #[serde(default = "default_battle_energy_cost_rate")]
    pub battle_energy_cost_rate: Decimal,

    /// Alertness recovered by sleeping (default: 5).
    #[serde(default = "default_sleep_alertness_gain")]
    pub sleep_alertness_gain: u32,

    /// Bite size as a fraction of size (default: 0.2).
    #[serde(default = "default_bite_size_ratio")]
    pub bite_size_ratio: Decimal,

    /// Upper bound on the battle damage multiplier (default: 0.2).
    #[serde(default = "default_min_battle_damage_multiplier")]
    pub min_battle_damage_multiplier: Decimal,

    /// Cost of a mating attempt or a division, per unit of size (default: 0.05).
    #[serde(default = "default_mate_attempt_energy_rate")]
    pub mate_attempt_energy_rate: Decimal,

    /// Fraction of each parent's energy handed to a newborn (default: 0.2).
    #[serde(default = "default_mate_energy_transfer_rate")]
    pub mate_energy_transfer_rate: Decimal,

    /// One successful mating in this many (default: 10).
    #[serde(default = "default_mate_success_denominator")]
    pub mate_success_denominator: u32,

    /// Physics time step of one move (default: 0.5).
    #[serde(default = "default_move_time_step")]
    pub move_time_step: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            initial_energy: default_initial_energy(),
            max_alertness: default_alertness(),
            initial_alertness: default_alertness(),
            tick_age_increase: default_tick_age_increase(),
            tick_alertness_reduction: default_tick_alertness_reduction(),
            tick_energy_reduction: default_tick_energy_reduction(),
            velocity_energy_multiplier: default_velocity_energy_multiplier(),
            gear_movement_multiplier: default_gear_movement_multiplier(),
            battle_energy_cost_rate: default_battle_energy_cost_rate(),
            sleep_alertness_gain: default_sleep_alertness_gain(),
            bite_size_ratio: default_bite_size_ratio(),
            min_battle_damage_multiplier: default_min_battle_damage_multiplier(),
            mate_attempt_energy_rate: default_mate_attempt_energy_rate(),
            mate_energy_transfer_rate: default_mate_energy_transfer_rate(),
            mate_success_denominator: default_mate_success_denominator(),
            move_time_step: default_move_time_step(),
        }
    }
}

impl RulesConfig {
    /// Clamp an alertness value into `[0, max_alertness]`.
    pub fn clamp_alertness(&self, alertness: u32) -> u32 {
        alertness.min(self.max_alertness)
    }
}

const fn default_initial_energy() -> Decimal {
    Decimal::from_parts(5000, 0, 0, false, 0)
}

const fn default_alertness() -> u32 {
    100
}

const fn default_tick_age_increase() -> u64 {
    1
}

const fn default_tick_alertness_reduction() -> u32 {
    1
}

const fn default_tick_energy_reduction() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 1)
}

const fn default_velocity_energy_multiplier() -> Decimal {
    Decimal::ONE
}

const fn default_gear_movement_multiplier() -> Decimal {
    Decimal::from_parts(2, 0, 0, false, 2)
}

const fn default_battle_energy_cost_rate() -> Decimal {
    Decimal::from_parts(1, 0, 0, false, 1)
}

const fn default_sleep_alertness_gain() -> u32 {
    5
}

const fn default_bite_size_ratio() -> Decimal {
    Decimal::from_parts(2, 0, 0, false, 1)
}

const fn default_min_battle_damage_multiplier() -> Decimal {
    Decimal::from_parts(2, 0, 0, false, 1)
}

const fn default_mate_attempt_energy_rate() -> Decimal {
    Decimal::from_parts(5, 0, 0, false, 2)
}

const fn default_mate_energy_transfer_rate() -> Decimal {
    Decimal::from_parts(2, 0, 0, false, 1)
}

const fn default_mate_success_denominator() -> u32 {
    10
}

const fn default_move_time_step() -> f64 {
    0.5
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

/// The playable rectangle. A creature whose center leaves it falls off
/// the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_size(600.0, 600.0, 10.0)
    }
}

impl ArenaBounds {
    /// Bounds of a `width` x `height` world offset by `padding` on the
    /// top and left.
    pub fn from_size(width: f64, height: f64, padding: f64) -> Self {
        Self {
            left: padding,
            top: padding,
            right: padding + width,
            bottom: padding + height,
        }
    }

    /// Whether `point` lies inside the arena, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let rules = RulesConfig::default();
        assert_eq!(rules.initial_energy, dec!(5000));
        assert_eq!(rules.tick_energy_reduction, dec!(0.5));
        assert_eq!(rules.gear_movement_multiplier, dec!(0.02));
        assert_eq!(rules.battle_energy_cost_rate, dec!(0.1));
        assert_eq!(rules.bite_size_ratio, dec!(0.2));
        assert_eq!(rules.min_battle_damage_multiplier, dec!(0.2));
        assert_eq!(rules.mate_attempt_energy_rate, dec!(0.05));
        assert_eq!(rules.mate_energy_transfer_rate, dec!(0.2));
        assert_eq!(rules.mate_success_denominator, 10);
        assert_eq!(rules.max_alertness, 100);
    }

    #[test]
    fn empty_json_yields_defaults() {
        let rules: RulesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, RulesConfig::default());
    }

    #[test]
    fn alertness_is_clamped() {
        let rules = RulesConfig::default();
        assert_eq!(rules.clamp_alertness(250), 100);
        assert_eq!(rules.clamp_alertness(40), 40);
    }

    #[test]
    fn arena_contains_edges() {
        let arena = ArenaBounds::default();
        assert!(arena.contains(Vec2::new(10.0, 610.0)));
        assert!(!arena.contains(Vec2::new(9.9, 300.0)));
        assert!(!arena.contains(Vec2::new(300.0, 610.5)));
        assert!((arena.width() - 600.0).abs() < f64::EPSILON);
    }
}
