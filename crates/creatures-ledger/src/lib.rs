//! Zero-sum energy ledger for the Creatures arena simulation.
//!
//! Every unit of energy that moves between two creatures goes through
//! [`EnergyLedger::transfer`]. Energy enters the world once, when the
//! initial population is endowed, and never leaves it: creatures that die
//! hand their residue to the energy sink before removal.
//!
//! # Architecture
//!
//! - [`entry`] -- [`TransferEntry`] and [`TransferReason`]: one journal row per transfer.
//! - [`ledger`] -- The [`EnergyLedger`]: the transfer primitive and its journal.
//! - [`conservation`] -- Per-tick balance and world-total verification.
//!
//! # Conservation Law
//!
//! For every tick T:
//!
//! ```text
//! sum(energy of every creature, sink included) == sum(genesis endowments)
//! ```
//!
//! A violation produces a [`LedgerAnomaly`]. The ledger never panics; it
//! returns errors.
//!
//! # Usage
//!
//! ```
//! use creatures_ledger::{EnergyLedger, TransferReason};
//! use creatures_ledger::conservation::ConservationResult;
//! use creatures_types::{AgentState, CreatureId, Footprint};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = EnergyLedger::new();
//! let mut sun = AgentState::new(CreatureId(0), "Sun", Footprint::new(50, 50), Decimal::ZERO, 100);
//! let mut berry = AgentState::new(CreatureId(1), "Berry", Footprint::new(10, 10), Decimal::ZERO, 100);
//!
//! ledger.endow(0, &mut berry, Decimal::new(5000, 0)).ok();
//! ledger.transfer(1, &mut berry, &mut sun, Decimal::new(5, 1), TransferReason::Decay).ok();
//!
//! let total = berry.energy + sun.energy;
//! assert_eq!(ledger.verify_conservation(1, total), ConservationResult::Balanced);
//! ```

pub mod conservation;
pub mod entry;
pub mod ledger;

// Re-export primary types at crate root.
pub use conservation::ConservationResult;
pub use entry::{TransferEntry, TransferReason};
pub use ledger::EnergyLedger;

use rust_decimal::Decimal;

use creatures_types::CreatureId;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when moving energy.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Source and destination are the same creature.
    #[error("creature {id} cannot transfer energy to itself")]
    SelfTransfer {
        /// The creature on both sides.
        id: CreatureId,
    },

    /// Endowments must be strictly positive.
    #[error("endowment must be positive, got {amount}")]
    NonPositiveEndowment {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Decimal arithmetic left the representable range.
    #[error("energy arithmetic overflowed while moving {amount} from {from} to {to}")]
    Overflow {
        /// Source creature.
        from: CreatureId,
        /// Destination creature.
        to: CreatureId,
        /// Requested amount.
        amount: Decimal,
    },
}

// ---------------------------------------------------------------------------
// Anomaly type
// ---------------------------------------------------------------------------

/// A conservation law violation detected during tick verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerAnomaly {
    /// The tick where the anomaly was detected.
    pub tick: u64,
    /// Energy the world should hold (sum of endowments).
    pub expected_total: Decimal,
    /// Energy the world actually holds.
    pub observed_total: Decimal,
    /// Journal rows of this tick that failed validation.
    pub malformed_entries: usize,
    /// Human-readable description of the anomaly.
    pub message: String,
}

impl LedgerAnomaly {
    /// `observed - expected`; positive means energy appeared from nowhere.
    pub fn drift(&self) -> Decimal {
        self.observed_total.saturating_sub(self.expected_total)
    }
}

impl core::fmt::Display for LedgerAnomaly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}
