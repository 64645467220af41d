//! The capability interface every creature kind implements.
//!
//! A kind is a [`Behavior`] implementation plus the [`Blueprint`] it
//! stamps its creatures from. All five hooks are optional; the defaults
//! return the neutral value (`None`, nothing created, no reaction).
//!
//! Hooks return `Result<_, BehaviorError>`. The engine never propagates a
//! behavior error: [`absorb_fault`] logs it with the creature's kind and
//! id and substitutes the neutral default, so one misbehaving kind cannot
//! halt the arena.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use creatures_types::{
    AgentState, CreatureSnapshot, Defense, Footprint, Interaction, KindSummary, Motion, TickAction,
    Vec2, Weapon,
};

use crate::config::ArenaBounds;
use crate::error::{AgentError, BehaviorError};
use crate::random::RandomSource;

// ---------------------------------------------------------------------------
// Hook context
// ---------------------------------------------------------------------------

/// What a behavior hook may see besides its own creature.
#[derive(Debug)]
pub struct HookContext<'a> {
    /// Current tick.
    pub tick: u64,
    /// Playable rectangle.
    pub arena: ArenaBounds,
    /// Count and energy per kind, updated as creatures are born.
    pub population: &'a BTreeMap<String, KindSummary>,
    /// Shared random source.
    pub rng: &'a mut dyn RandomSource,
}

impl HookContext<'_> {
    /// Number of creatures of `kind` currently in the arena.
    pub fn population_of(&self, kind: &str) -> u32 {
        self.population.get(kind).map_or(0, |s| s.count)
    }
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// Pluggable decision logic for one creature.
///
/// `decide_tick` receives the creature mutably so it can steer (angle,
/// acceleration, steering, speed cap) and change status; engine-owned
/// health fields it writes are restored after the call. The other hooks
/// only read.
pub trait Behavior: core::fmt::Debug {
    /// Pick this tick's own action.
    fn decide_tick(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &mut AgentState,
    ) -> Result<Option<TickAction>, BehaviorError> {
        Ok(None)
    }

    /// Propose what to do to a creature this one collided with.
    fn propose_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
        _other: &CreatureSnapshot,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok(None)
    }

    /// Answer an `attack` or `mate` proposal from `other`.
    fn respond_to_interaction(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
        _other: &CreatureSnapshot,
        _proposed: &Interaction,
    ) -> Result<Option<Interaction>, BehaviorError> {
        Ok(None)
    }

    /// Produce an offspring for a division or a successful mating.
    fn create_offspring(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
    ) -> Result<Option<NewCreature>, BehaviorError> {
        Ok(None)
    }

    /// One-shot notice that this creature is dying.
    fn on_dying(
        &mut self,
        _ctx: &mut HookContext<'_>,
        _me: &AgentState,
    ) -> Result<(), BehaviorError> {
        Ok(())
    }
}

/// A behavior that never does anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inert;

impl Behavior for Inert {}

/// Log a behavior fault and fall back to the neutral value.
pub fn absorb_fault<T: Default>(
    result: Result<T, BehaviorError>,
    creature: &AgentState,
    hook: &'static str,
) -> T {
    result.unwrap_or_else(|error| {
        warn!(
            kind = %creature.kind,
            creature_id = %creature.id,
            hook,
            error = %error,
            "behavior fault, using neutral default"
        );
        T::default()
    })
}

// ---------------------------------------------------------------------------
// Creation requests
// ---------------------------------------------------------------------------

/// Everything needed to stamp a new creature.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Kind name.
    pub kind: String,
    /// Rectangle; its area becomes the size.
    pub footprint: Footprint,
    /// Initial spatial state. The position is replaced for offspring and
    /// for starting creatures without `fixed_position`.
    pub motion: Motion,
    /// Keep `motion.position` for a starting creature.
    pub fixed_position: bool,
    /// Named weapons.
    pub weapons: BTreeMap<String, Weapon>,
    /// Named defenses.
    pub defenses: BTreeMap<String, Defense>,
}

impl Blueprint {
    /// A gearless blueprint with default motion.
    pub fn new(kind: impl Into<String>, footprint: Footprint) -> Self {
        Self {
            kind: kind.into(),
            footprint,
            motion: Motion::default(),
            fixed_position: false,
            weapons: BTreeMap::new(),
            defenses: BTreeMap::new(),
        }
    }

    /// Set the speed cap.
    #[must_use]
    pub fn max_velocity(mut self, max_velocity: f64) -> Self {
        self.motion.max_velocity = max_velocity;
        self
    }

    /// Set the forward acceleration.
    #[must_use]
    pub fn acceleration(mut self, acceleration: f64) -> Self {
        self.motion.acceleration = acceleration;
        self
    }

    /// Set the initial velocity.
    #[must_use]
    pub fn velocity(mut self, velocity: Vec2) -> Self {
        self.motion.velocity = velocity;
        self
    }

    /// Pin the starting position.
    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.motion.position = position;
        self.fixed_position = true;
        self
    }

    /// Attach a weapon.
    #[must_use]
    pub fn weapon(mut self, name: impl Into<String>, weapon: Weapon) -> Self {
        self.weapons.insert(name.into(), weapon);
        self
    }

    /// Attach a defense.
    #[must_use]
    pub fn defense(mut self, name: impl Into<String>, defense: Defense) -> Self {
        self.defenses.insert(name.into(), defense);
        self
    }

    /// Reject blueprints the engine cannot simulate.
    pub fn validate(&self) -> Result<(), AgentError> {
        let reject = |reason: &str| AgentError::InvalidBlueprint {
            kind: self.kind.clone(),
            reason: reason.to_owned(),
        };
        if self.kind.trim().is_empty() {
            return Err(reject("kind name is empty"));
        }
        if !self.footprint.is_valid() {
            return Err(reject("footprint has a zero side"));
        }
        let m = &self.motion;
        let finite = [
            m.position.x,
            m.position.y,
            m.velocity.x,
            m.velocity.y,
            m.angle,
            m.acceleration,
            m.steering,
            m.max_velocity,
            m.max_steering,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(reject("motion contains a non-finite value"));
        }
        if m.max_velocity < 0.0 {
            return Err(reject("negative speed cap"));
        }
        let negative_weapon = self.weapons.values().any(|w| w.power < Decimal::ZERO);
        let negative_defense = self.defenses.values().any(|d| d.power < Decimal::ZERO);
        if negative_weapon || negative_defense {
            return Err(reject("negative gear power"));
        }
        Ok(())
    }
}

/// A creation request: the shape of the creature plus its behavior.
#[derive(Debug)]
pub struct NewCreature {
    /// Shape and gear.
    pub blueprint: Blueprint,
    /// Decision logic.
    pub behavior: Box<dyn Behavior>,
}

impl NewCreature {
    /// Pair a blueprint with a behavior.
    pub fn new(blueprint: Blueprint, behavior: impl Behavior + 'static) -> Self {
        Self {
            blueprint,
            behavior: Box::new(behavior),
        }
    }
}

/// What a kind contributes at start-up.
#[derive(Debug)]
pub enum Population {
    /// A single creature.
    One(NewCreature),
    /// Any number of creatures.
    Many(Vec<NewCreature>),
}

impl Population {
    /// Flatten into a list of creation requests.
    pub fn into_vec(self) -> Vec<NewCreature> {
        match self {
            Self::One(one) => vec![one],
            Self::Many(many) => many,
        }
    }

    /// Number of creation requests.
    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(many) => many.len(),
        }
    }

    /// Whether there are no creation requests.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
