//! Journal rows recorded by the energy ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creatures_types::CreatureId;

/// Why energy moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferReason {
    /// Initial funding of a starting creature. Has no source.
    Genesis,
    /// Per-tick energy tax paid to the sink.
    Decay,
    /// Cost of a move step, gear surcharge included.
    Movement,
    /// Weapon cost paid by an attacker.
    Attack,
    /// Defense cost paid by a defender, or by an unprovoked defend.
    Defense,
    /// A bite taken out of another creature.
    Eat,
    /// Fixed cost of proposing to mate.
    MateAttempt,
    /// A parent's contribution to a newborn.
    MateFunding,
    /// Fixed cost of dividing.
    DivideCost,
    /// Half of a dividing parent's energy.
    DivideFunding,
    /// The whole energy of a creature that attacked the sink.
    SinkDrain,
    /// Whatever a dead creature still held at removal.
    Residue,
}

impl TransferReason {
    /// Upper-case label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Genesis => "GENESIS",
            Self::Decay => "DECAY",
            Self::Movement => "MOVEMENT",
            Self::Attack => "ATTACK",
            Self::Defense => "DEFENSE",
            Self::Eat => "EAT",
            Self::MateAttempt => "MATE_ATTEMPT",
            Self::MateFunding => "MATE_FUNDING",
            Self::DivideCost => "DIVIDE_COST",
            Self::DivideFunding => "DIVIDE_FUNDING",
            Self::SinkDrain => "SINK_DRAIN",
            Self::Residue => "RESIDUE",
        }
    }
}

impl core::fmt::Display for TransferReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One movement of energy.
///
/// `amount` is always strictly positive; a transfer requested with a
/// negative amount is journaled in the opposite direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    /// Position in the journal, never reused.
    pub sequence: u64,
    /// Tick in which the transfer happened.
    pub tick: u64,
    /// Debited creature; `None` for genesis.
    pub from: Option<CreatureId>,
    /// Credited creature.
    pub to: CreatureId,
    /// Energy moved.
    pub amount: Decimal,
    /// Why it moved.
    pub reason: TransferReason,
}

impl TransferEntry {
    /// Whether the row is internally consistent: positive amount, distinct
    /// endpoints, and a source on every non-genesis row.
    pub fn is_well_formed(&self) -> bool {
        if self.amount <= Decimal::ZERO {
            return false;
        }
        match (self.reason, self.from) {
            (TransferReason::Genesis, None) => true,
            (TransferReason::Genesis, Some(_)) | (_, None) => false,
            (_, Some(from)) => from != self.to,
        }
    }
}
