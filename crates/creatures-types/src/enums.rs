//! Enumeration types for the Creatures simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle status of a creature.
///
/// Creatures move `Awake <-> Asleep` under their own control. The engine
/// alone moves them to `Dying`, then `Dead`, then out of the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Active and able to initiate interactions.
    #[default]
    Awake,
    /// Sleeping; always unresponsive, but still collidable.
    Asleep,
    /// Marked for death this tick; receives the dying notification next reap.
    Dying,
    /// Notified; removed at the next reap.
    Dead,
}

impl Status {
    /// Whether the creature takes part in the per-agent loop and in
    /// interactions (awake or asleep).
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Awake | Self::Asleep)
    }

    /// Lower-case label used in history rows and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Awake => "awake",
            Self::Asleep => "asleep",
            Self::Dying => "dying",
            Self::Dead => "dead",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// The action a creature declares for its own tick, independent of
/// collisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickAction {
    /// Keep still. Also the neutral default when a behavior returns nothing.
    #[default]
    Still,
    /// Run one physics step and pay for it.
    Move,
    /// Recover alertness.
    Sleep,
    /// Split off one offspring.
    Divide,
}

impl TickAction {
    /// Lower-case label used in history rows and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Still => "still",
            Self::Move => "move",
            Self::Sleep => "sleep",
            Self::Divide => "divide",
        }
    }
}

impl core::fmt::Display for TickAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a creature proposes (or responds with) in an encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Do nothing. The neutral default for every interaction hook.
    #[default]
    Ignore,
    /// Attack with the weapon named in the details.
    Attack,
    /// Propose or accept mating.
    Mate,
    /// Take a bite out of the other creature.
    Eat,
    /// Raise the defense named in the details.
    Defend,
    /// Observe only.
    Look,
    /// No effect as an interaction.
    Sleep,
    /// No effect as an interaction.
    Move,
}

impl InteractionKind {
    /// Lower-case label used in history rows and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Attack => "attack",
            Self::Mate => "mate",
            Self::Eat => "eat",
            Self::Defend => "defend",
            Self::Look => "look",
            Self::Sleep => "sleep",
            Self::Move => "move",
        }
    }

    /// Whether the other party is asked to respond to this proposal.
    pub const fn invites_response(self) -> bool {
        matches!(self, Self::Attack | Self::Mate)
    }
}

impl core::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Battle gear
// ---------------------------------------------------------------------------

/// Damage type of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    /// Blunt force; stopped by a shell.
    Crush,
    /// Bite; stopped by a shell.
    Jaws,
    /// Toxin; neutralized by antivenom.
    Poison,
    /// Injected toxin; neutralized by antivenom.
    Venom,
}

impl WeaponKind {
    /// Lower-case label used in history rows and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crush => "crush",
            Self::Jaws => "jaws",
            Self::Poison => "poison",
            Self::Venom => "venom",
        }
    }
}

/// Mitigation type of a defense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseKind {
    /// Hard outer layer.
    Shell,
    /// Toxin resistance.
    Antivenom,
}

impl DefenseKind {
    /// Lower-case label used in history rows and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Antivenom => "antivenom",
        }
    }

    /// Whether this defense mitigates the given weapon type.
    ///
    /// `crush` and `jaws` are stopped only by `shell`; `poison` and
    /// `venom` only by `antivenom`.
    pub const fn mitigates(self, weapon: WeaponKind) -> bool {
        matches!(
            (weapon, self),
            (WeaponKind::Crush | WeaponKind::Jaws, Self::Shell)
                | (WeaponKind::Poison | WeaponKind::Venom, Self::Antivenom)
        )
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Category of a history row, used by the history filter toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// A move action (off by default).
    Move,
    /// A sleep action (off by default).
    Sleep,
    /// A creature started dying.
    Died,
    /// A creature divided.
    Divide,
    /// A mating attempt or response.
    Mate,
    /// Eating or being eaten.
    Eat,
    /// Attacking, being attacked, or defending.
    Attack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_stops_crush_and_jaws_only() {
        assert!(DefenseKind::Shell.mitigates(WeaponKind::Crush));
        assert!(DefenseKind::Shell.mitigates(WeaponKind::Jaws));
        assert!(!DefenseKind::Shell.mitigates(WeaponKind::Poison));
        assert!(!DefenseKind::Shell.mitigates(WeaponKind::Venom));
    }

    #[test]
    fn antivenom_stops_toxins_only() {
        assert!(DefenseKind::Antivenom.mitigates(WeaponKind::Poison));
        assert!(DefenseKind::Antivenom.mitigates(WeaponKind::Venom));
        assert!(!DefenseKind::Antivenom.mitigates(WeaponKind::Crush));
        assert!(!DefenseKind::Antivenom.mitigates(WeaponKind::Jaws));
    }

    #[test]
    fn only_attack_and_mate_invite_a_response() {
        assert!(InteractionKind::Attack.invites_response());
        assert!(InteractionKind::Mate.invites_response());
        assert!(!InteractionKind::Eat.invites_response());
        assert!(!InteractionKind::Defend.invites_response());
        assert!(!InteractionKind::Ignore.invites_response());
    }

    #[test]
    fn live_statuses() {
        assert!(Status::Awake.is_live());
        assert!(Status::Asleep.is_live());
        assert!(!Status::Dying.is_live());
        assert!(!Status::Dead.is_live());
    }

    #[test]
    fn weapon_kind_serde_is_lowercase() {
        let json = serde_json::to_string(&WeaponKind::Venom).ok();
        assert_eq!(json.as_deref(), Some("\"venom\""));
    }
}
