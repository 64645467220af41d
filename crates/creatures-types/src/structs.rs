//! Core value structs for the Creatures simulation.
//!
//! Covers creature state ([`AgentState`]), the read-only view handed to
//! other creatures ([`CreatureSnapshot`]), battle gear, interactions,
//! battle results and history rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::enums::{DefenseKind, EventCategory, InteractionKind, Status, TickAction, WeaponKind};
use crate::ids::CreatureId;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A 2D vector in arena coordinates (x right, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Construct a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Rotate counter-clockwise by `degrees` in the mathematical sense.
    #[must_use]
    pub fn rotate(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x.mul_add(cos, -(self.y * sin)),
            y: self.x.mul_add(sin, self.y * cos),
        }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    /// Multiply both components by `factor`.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// The rectangle a creature occupies, centered on its position.
///
/// Size is the footprint area and is fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Width in arena units.
    pub width: u32,
    /// Height in arena units.
    pub height: u32,
}

impl Footprint {
    /// Construct a footprint.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area of the footprint, which becomes the creature's size.
    pub fn area(self) -> Decimal {
        Decimal::from(u64::from(self.width).saturating_mul(u64::from(self.height)))
    }

    /// Whether both sides are non-zero.
    pub const fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Spatial state of a creature.
///
/// Behaviors may steer by writing `angle`, `acceleration`, `steering`
/// and `max_velocity` during their tick hook; the engine integrates the
/// rest when the creature moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Center of the footprint.
    pub position: Vec2,
    /// Velocity in the creature's own frame (x is forward).
    pub velocity: Vec2,
    /// Heading in degrees: 0 is right, 90 up, 180 left, 270 down.
    pub angle: f64,
    /// Forward acceleration per tick.
    pub acceleration: f64,
    /// Steering in degrees; positive turns left.
    pub steering: f64,
    /// Speed cap in arena units per tick.
    pub max_velocity: f64,
    /// Steering cap in degrees.
    pub max_steering: f64,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            acceleration: 1.0,
            steering: 0.0,
            max_velocity: 1.0,
            max_steering: 5.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Battle gear and interactions
// ---------------------------------------------------------------------------

/// A weapon attached to a creature. Immutable once attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    /// Damage type.
    pub kind: WeaponKind,
    /// Maximum inflictable damage, and the base of its energy cost.
    pub power: Decimal,
}

impl Weapon {
    /// Construct a weapon.
    pub const fn new(kind: WeaponKind, power: Decimal) -> Self {
        Self { kind, power }
    }
}

/// A defense attached to a creature. Immutable once attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defense {
    /// Mitigation type.
    pub kind: DefenseKind,
    /// Mitigation cap, and the base of its energy cost.
    pub power: Decimal,
}

impl Defense {
    /// Construct a defense.
    pub const fn new(kind: DefenseKind, power: Decimal) -> Self {
        Self { kind, power }
    }
}

/// A proposed or responding interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interaction {
    /// What to do.
    pub action: InteractionKind,
    /// Action-specific payload: a weapon or defense name, or nothing.
    pub details: Option<String>,
}

impl Interaction {
    /// An interaction with no details.
    pub const fn new(action: InteractionKind) -> Self {
        Self {
            action,
            details: None,
        }
    }

    /// An interaction naming a weapon or defense.
    pub fn with_details(action: InteractionKind, details: impl Into<String>) -> Self {
        Self {
            action,
            details: Some(details.into()),
        }
    }

    /// The neutral interaction.
    pub const fn ignore() -> Self {
        Self::new(InteractionKind::Ignore)
    }

    /// Details as a string slice, empty when absent.
    pub fn details_str(&self) -> &str {
        self.details.as_deref().unwrap_or("")
    }
}

/// Signed deltas produced by one battle. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleResult {
    /// Change to the attacker's energy (zero or negative).
    pub attacker_energy_change: Decimal,
    /// Change to the attacker's damage (always zero).
    pub attacker_damage_change: Decimal,
    /// Change to the defender's energy (zero or negative).
    pub defender_energy_change: Decimal,
    /// Change to the defender's damage (zero or positive).
    pub defender_damage_change: Decimal,
}

// ---------------------------------------------------------------------------
// Creature state
// ---------------------------------------------------------------------------

/// Mutable per-creature record owned by the entity registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Behavioral variant name (e.g. `"Berry"`).
    pub kind: String,
    /// Stable unique identifier.
    pub id: CreatureId,
    /// Footprint area; fixed at creation.
    pub size: Decimal,
    /// Largest bite this creature can take; fixed at creation.
    pub bite_size: Decimal,
    /// Ticks lived.
    pub age: u64,
    /// Current energy. May go negative just before death.
    pub energy: Decimal,
    /// Damage sustained; the creature dies once it reaches `size`.
    pub damage: Decimal,
    /// Alertness, kept within `[0, max_alertness]`.
    pub alertness: u32,
    /// Lifecycle status.
    pub status: Status,
    /// Occupied rectangle.
    pub footprint: Footprint,
    /// Spatial state.
    pub motion: Motion,
    /// Named weapons.
    pub weapons: BTreeMap<String, Weapon>,
    /// Named defenses.
    pub defenses: BTreeMap<String, Defense>,
    /// Last tick action the behavior returned.
    pub last_action: Option<TickAction>,
    /// Last interaction the behavior proposed or responded with.
    pub last_interaction: Option<Interaction>,
}

impl AgentState {
    /// A fresh creature with zero energy, zero damage and no gear.
    ///
    /// Size is the footprint area; bite size is `size * bite_ratio`.
    pub fn new(
        id: CreatureId,
        kind: impl Into<String>,
        footprint: Footprint,
        bite_ratio: Decimal,
        alertness: u32,
    ) -> Self {
        let size = footprint.area();
        Self {
            kind: kind.into(),
            id,
            size,
            bite_size: size.saturating_mul(bite_ratio),
            age: 0,
            energy: Decimal::ZERO,
            damage: Decimal::ZERO,
            alertness,
            status: Status::Awake,
            footprint,
            motion: Motion::default(),
            weapons: BTreeMap::new(),
            defenses: BTreeMap::new(),
            last_action: None,
            last_interaction: None,
        }
    }

    /// Sum of the power of every weapon and defense carried.
    pub fn battle_power(&self) -> Decimal {
        let weapons = self
            .weapons
            .values()
            .fold(Decimal::ZERO, |acc, w| acc.saturating_add(w.power));
        self.defenses
            .values()
            .fold(weapons, |acc, d| acc.saturating_add(d.power))
    }

    /// Undamaged size left to bite from.
    pub fn remaining_size(&self) -> Decimal {
        self.size.saturating_sub(self.damage).max(Decimal::ZERO)
    }

    /// Whether the creature is awake or asleep.
    pub const fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Copy of the fields other creatures may see.
    pub fn snapshot(&self) -> CreatureSnapshot {
        CreatureSnapshot {
            kind: self.kind.clone(),
            id: self.id,
            size: self.size,
            bite_size: self.bite_size,
            age: self.age,
            energy: self.energy,
            damage: self.damage,
            alertness: self.alertness,
            status: self.status,
            position: self.motion.position,
            velocity: self.motion.velocity,
            angle: self.motion.angle,
            acceleration: self.motion.acceleration,
        }
    }
}

/// Read-only copy of another creature's state, given to behavior hooks
/// during an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    /// Behavioral variant name.
    pub kind: String,
    /// Identifier.
    pub id: CreatureId,
    /// Footprint area.
    pub size: Decimal,
    /// Bite size.
    pub bite_size: Decimal,
    /// Ticks lived.
    pub age: u64,
    /// Energy at snapshot time.
    pub energy: Decimal,
    /// Damage at snapshot time.
    pub damage: Decimal,
    /// Alertness at snapshot time.
    pub alertness: u32,
    /// Status at snapshot time.
    pub status: Status,
    /// Position.
    pub position: Vec2,
    /// Velocity in the creature's own frame.
    pub velocity: Vec2,
    /// Heading in degrees.
    pub angle: f64,
    /// Forward acceleration.
    pub acceleration: f64,
}

/// Count and total energy of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindSummary {
    /// Number of creatures of this kind in the registry.
    pub count: u32,
    /// Sum of their energy.
    pub total_energy: Decimal,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// The other creature in a history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterpart {
    /// Kind of the other creature.
    pub kind: String,
    /// Identifier of the other creature.
    pub id: CreatureId,
}

/// One row of the simulation history.
///
/// Vitals are captured after the event's effects were applied; deltas
/// are signed (negative means lost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Filter category; not a column.
    pub category: EventCategory,
    /// Tick index.
    pub tick: u64,
    /// Subject kind.
    pub kind: String,
    /// Subject identifier.
    pub id: CreatureId,
    /// Action label (e.g. `"eat"`, `"mate response"`), possibly empty.
    pub action: String,
    /// Action details (weapon or defense name, damage type), possibly empty.
    pub action_details: String,
    /// Subject age.
    pub age: u64,
    /// Subject alertness.
    pub alertness: u32,
    /// Subject energy.
    pub energy: Decimal,
    /// Subject damage.
    pub damage: Decimal,
    /// Alertness change.
    pub alertness_delta: i64,
    /// Energy change.
    pub energy_delta: Decimal,
    /// Damage change.
    pub damage_delta: Decimal,
    /// Free-text outcome (e.g. `"ate"`, `"Out of energy"`).
    pub result: String,
    /// The other creature involved, if any.
    pub other: Option<Counterpart>,
}

impl HistoryRecord {
    /// Start a row for `subject`, copying its current vitals. Deltas are
    /// zero until set.
    pub fn for_subject(
        category: EventCategory,
        tick: u64,
        subject: &AgentState,
        action: impl Into<String>,
        result: impl Into<String>,
    ) -> Self {
        Self {
            category,
            tick,
            kind: subject.kind.clone(),
            id: subject.id,
            action: action.into(),
            action_details: String::new(),
            age: subject.age,
            alertness: subject.alertness,
            energy: subject.energy,
            damage: subject.damage,
            alertness_delta: 0,
            energy_delta: Decimal::ZERO,
            damage_delta: Decimal::ZERO,
            result: result.into(),
            other: None,
        }
    }

    /// Set the action details.
    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.action_details = details.into();
        self
    }

    /// Set the deltas.
    #[must_use]
    pub const fn deltas(mut self, alertness: i64, energy: Decimal, damage: Decimal) -> Self {
        self.alertness_delta = alertness;
        self.energy_delta = energy;
        self.damage_delta = damage;
        self
    }

    /// Name the other creature involved.
    #[must_use]
    pub fn against(mut self, other: &AgentState) -> Self {
        self.other = Some(Counterpart {
            kind: other.kind.clone(),
            id: other.id,
        });
        self
    }

    /// Whether another creature is involved.
    pub const fn has_other(&self) -> bool {
        self.other.is_some()
    }
}
