//! The entity registry: sole owner of every creature in the arena.
//!
//! Creatures are kept in a `Vec` sorted by [`CreatureId`]. Ids come from a
//! monotonic counter, so that order is creation order and iteration is
//! stable within and across ticks.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use creatures_types::{AgentState, CreatureId, KindSummary};

use crate::behavior::{Behavior, NewCreature};
use crate::config::RulesConfig;
use crate::error::AgentError;
use crate::physics;

/// One creature: engine-owned state plus its decision logic.
#[derive(Debug)]
pub struct Creature {
    /// Engine-owned state.
    pub state: AgentState,
    /// Pluggable decision logic.
    pub behavior: Box<dyn Behavior>,
}

/// Owns the live set of creatures.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    creatures: Vec<Creature>,
    next_id: u64,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            creatures: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of creatures held, whatever their status.
    pub const fn len(&self) -> usize {
        self.creatures.len()
    }

    /// Whether the registry holds no creatures.
    pub const fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Validate a creation request and stamp a creature from it with a
    /// fresh id, zero energy and full initial alertness. The creature is
    /// not yet in the registry; see [`insert`](Self::insert).
    pub fn instantiate(
        &mut self,
        request: NewCreature,
        rules: &RulesConfig,
    ) -> Result<Creature, AgentError> {
        let NewCreature {
            blueprint,
            behavior,
        } = request;
        blueprint.validate()?;

        let id = CreatureId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let mut state = AgentState::new(
            id,
            blueprint.kind,
            blueprint.footprint,
            rules.bite_size_ratio,
            rules.clamp_alertness(rules.initial_alertness),
        );
        state.motion = blueprint.motion;
        state.weapons = blueprint.weapons;
        state.defenses = blueprint.defenses;
        Ok(Creature { state, behavior })
    }

    /// Put a creature into the registry, keeping id order.
    pub fn insert(&mut self, creature: Creature) {
        debug!(
            kind = %creature.state.kind,
            creature_id = %creature.state.id,
            "creature added"
        );
        let id = creature.state.id;
        let out_of_order = self.creatures.last().is_some_and(|last| last.state.id >= id);
        if out_of_order {
            let at = self.creatures.partition_point(|c| c.state.id < id);
            self.creatures.insert(at, creature);
        } else {
            self.creatures.push(creature);
        }
    }

    /// Instantiate and insert in one step.
    pub fn add(&mut self, request: NewCreature, rules: &RulesConfig) -> Result<CreatureId, AgentError> {
        let creature = self.instantiate(request, rules)?;
        let id = creature.state.id;
        self.insert(creature);
        Ok(id)
    }

    /// Remove a creature. Unknown ids are logged and ignored.
    pub fn remove(&mut self, id: CreatureId) -> Option<Creature> {
        match self.index_of(id) {
            Some(index) => Some(self.creatures.remove(index)),
            None => {
                warn!(creature_id = %id, "remove of unknown creature ignored");
                None
            }
        }
    }

    /// Look up a creature.
    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.index_of(id).and_then(|i| self.creatures.get(i))
    }

    /// Look up a creature mutably.
    pub fn get_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.index_of(id).and_then(|i| self.creatures.get_mut(i))
    }

    /// Look up a creature's state.
    pub fn state(&self, id: CreatureId) -> Option<&AgentState> {
        self.get(id).map(|c| &c.state)
    }

    /// Look up a creature mutably, or fail with [`AgentError::CreatureNotFound`].
    pub fn require_mut(&mut self, id: CreatureId) -> Result<&mut Creature, AgentError> {
        self.get_mut(id).ok_or(AgentError::CreatureNotFound(id))
    }

    /// Borrow two distinct creatures mutably at once.
    pub fn pair_mut(
        &mut self,
        a: CreatureId,
        b: CreatureId,
    ) -> Option<(&mut Creature, &mut Creature)> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        if i < j {
            let (left, right) = self.creatures.split_at_mut(j);
            Some((left.get_mut(i)?, right.first_mut()?))
        } else if j < i {
            let (left, right) = self.creatures.split_at_mut(i);
            let second = left.get_mut(j)?;
            Some((right.first_mut()?, second))
        } else {
            None
        }
    }

    /// [`pair_mut`](Self::pair_mut), failing with the first missing id.
    pub fn require_pair_mut(
        &mut self,
        a: CreatureId,
        b: CreatureId,
    ) -> Result<(&mut Creature, &mut Creature), AgentError> {
        if self.index_of(a).is_none() {
            return Err(AgentError::CreatureNotFound(a));
        }
        self.pair_mut(a, b).ok_or(AgentError::CreatureNotFound(b))
    }

    /// Creatures in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.creatures.iter()
    }

    /// Ids in iteration order.
    pub fn ids(&self) -> Vec<CreatureId> {
        self.creatures.iter().map(|c| c.state.id).collect()
    }

    /// Ids of awake or asleep creatures, other than `id`, whose footprint
    /// overlaps the footprint of `id`.
    pub fn colliding_with(&self, id: CreatureId) -> Vec<CreatureId> {
        let Some(me) = self.state(id) else {
            return Vec::new();
        };
        self.creatures
            .iter()
            .map(|c| &c.state)
            .filter(|other| other.id != id && other.is_live())
            .filter(|other| {
                physics::overlaps(
                    me.motion.position,
                    me.footprint,
                    other.motion.position,
                    other.footprint,
                )
            })
            .map(|other| other.id)
            .collect()
    }

    /// Count and total energy per kind, over every creature held.
    pub fn summarize_by_kind(&self) -> BTreeMap<String, KindSummary> {
        let mut summary: BTreeMap<String, KindSummary> = BTreeMap::new();
        for c in &self.creatures {
            let entry = summary.entry(c.state.kind.clone()).or_default();
            entry.count = entry.count.saturating_add(1);
            entry.total_energy = entry.total_energy.saturating_add(c.state.energy);
        }
        summary
    }

    /// Energy held by every creature, sink included.
    pub fn total_energy(&self) -> Decimal {
        self.creatures
            .iter()
            .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.state.energy))
    }

    fn index_of(&self, id: CreatureId) -> Option<usize> {
        self.creatures.binary_search_by_key(&id, |c| c.state.id).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use creatures_types::{Footprint, Status, Vec2};

    use super::*;
    use crate::behavior::{Blueprint, Inert};

    fn request(kind: &str, at: Vec2) -> NewCreature {
        NewCreature::new(Blueprint::new(kind, Footprint::new(10, 10)).at(at), Inert)
    }

    #[test]
    fn ids_follow_creation_order() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        let a = reg.add(request("Berry", Vec2::ZERO), &rules).unwrap();
        let b = reg.add(request("Berry", Vec2::ZERO), &rules).unwrap();
        assert!(a < b);
        assert_eq!(reg.ids(), vec![a, b]);
        let state = reg.state(a).unwrap();
        assert_eq!(state.size, dec!(100));
        assert_eq!(state.bite_size, dec!(20));
        assert_eq!(state.energy, Decimal::ZERO);
        assert_eq!(state.alertness, 100);
    }

    #[test]
    fn late_insert_keeps_order() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        let held = reg.instantiate(request("Nutril", Vec2::ZERO), &rules).unwrap();
        let later = reg.add(request("Nutril", Vec2::ZERO), &rules).unwrap();
        let early = held.state.id;
        reg.insert(held);
        assert_eq!(reg.ids(), vec![early, later]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        let a = reg.add(request("Gnub", Vec2::ZERO), &rules).unwrap();
        assert!(reg.remove(CreatureId(42)).is_none());
        assert_eq!(reg.len(), 1);
        assert!(reg.remove(a).is_some());
        assert!(reg.is_empty());
    }

    #[test]
    fn invalid_request_rejected() {
        let mut reg = EntityRegistry::new();
        let bad = NewCreature::new(Blueprint::new("Flat", Footprint::new(0, 4)), Inert);
        assert!(reg.add(bad, &RulesConfig::default()).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn pair_mut_both_orders() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        let a = reg.add(request("A", Vec2::ZERO), &rules).unwrap();
        let b = reg.add(request("B", Vec2::ZERO), &rules).unwrap();
        let (x, y) = reg.pair_mut(b, a).unwrap();
        assert_eq!(x.state.kind, "B");
        assert_eq!(y.state.kind, "A");
        assert!(reg.pair_mut(a, a).is_none());
        assert!(reg.require_pair_mut(a, CreatureId(9)).is_err());
    }

    #[test]
    fn collisions_skip_self_and_dead() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        let a = reg.add(request("A", Vec2::new(50.0, 50.0)), &rules).unwrap();
        let b = reg.add(request("B", Vec2::new(55.0, 52.0)), &rules).unwrap();
        let c = reg.add(request("C", Vec2::new(58.0, 50.0)), &rules).unwrap();
        let _far = reg.add(request("D", Vec2::new(200.0, 50.0)), &rules).unwrap();
        reg.get_mut(c).unwrap().state.status = Status::Dead;
        assert_eq!(reg.colliding_with(a), vec![b]);
    }

    #[test]
    fn summaries_by_kind() {
        let mut reg = EntityRegistry::new();
        let rules = RulesConfig::default();
        for _ in 0..3 {
            let id = reg.add(request("Berry", Vec2::ZERO), &rules).unwrap();
            reg.get_mut(id).unwrap().state.energy = dec!(10);
        }
        let id = reg.add(request("Korub", Vec2::ZERO), &rules).unwrap();
        reg.get_mut(id).unwrap().state.energy = dec!(7.5);

        let summary = reg.summarize_by_kind();
        assert_eq!(summary.get("Berry").unwrap().count, 3);
        assert_eq!(summary.get("Berry").unwrap().total_energy, dec!(30));
        assert_eq!(summary.get("Korub").unwrap().count, 1);
        assert_eq!(reg.total_energy(), dec!(37.5));
    }
}
