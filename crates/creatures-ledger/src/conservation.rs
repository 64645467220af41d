//! Conservation law verification for the energy ledger.
//!
//! Two checks run per tick:
//!
//! 1. Every journal row of the tick is well formed (positive amount,
//!    distinct endpoints, genesis rows only without a source).
//! 2. The energy the world holds, sink included, equals the total
//!    endowed at genesis.
//!
//! The first holds by construction for rows written by
//! [`EnergyLedger`](crate::EnergyLedger); the second catches any code path
//! that writes `energy` without going through the ledger.

use rust_decimal::Decimal;

use crate::{LedgerAnomaly, TransferEntry};

/// The result of a conservation check for a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConservationResult {
    /// The world holds exactly what was endowed.
    Balanced,
    /// Energy appeared or vanished, or a row is malformed.
    Anomaly(LedgerAnomaly),
}

impl ConservationResult {
    /// Whether the check passed.
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

/// Verify the conservation law for `tick`.
pub fn verify_conservation(
    tick: u64,
    entries: &[TransferEntry],
    expected_total: Decimal,
    observed_total: Decimal,
) -> ConservationResult {
    let malformed_entries = entries
        .iter()
        .filter(|e| e.tick == tick && !e.is_well_formed())
        .count();

    if malformed_entries == 0 && expected_total == observed_total {
        return ConservationResult::Balanced;
    }

    let drift = observed_total.saturating_sub(expected_total);
    ConservationResult::Anomaly(LedgerAnomaly {
        tick,
        expected_total,
        observed_total,
        malformed_entries,
        message: format!(
            "LEDGER_ANOMALY at tick {tick}: world holds {observed_total}, expected \
             {expected_total} (drift {drift}), {malformed_entries} malformed row(s)",
        ),
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use creatures_types::CreatureId;

    use super::*;
    use crate::TransferReason;

    fn row(tick: u64, from: u64, to: u64, amount: Decimal) -> TransferEntry {
        TransferEntry {
            sequence: 0,
            tick,
            from: Some(CreatureId(from)),
            to: CreatureId(to),
            amount,
            reason: TransferReason::Decay,
        }
    }

    #[test]
    fn balanced_world() {
        let entries = vec![row(1, 1, 0, dec!(0.5))];
        let result = verify_conservation(1, &entries, dec!(100), dec!(100));
        assert!(result.is_balanced());
    }

    #[test]
    fn drift_is_reported() {
        let result = verify_conservation(2, &[], dec!(100), dec!(101.5));
        match result {
            ConservationResult::Anomaly(anomaly) => {
                assert_eq!(anomaly.tick, 2);
                assert_eq!(anomaly.drift(), dec!(1.5));
                assert_eq!(anomaly.malformed_entries, 0);
            }
            ConservationResult::Balanced => panic!("expected anomaly"),
        }
    }

    #[test]
    fn malformed_rows_of_other_ticks_ignored() {
        let entries = vec![row(1, 3, 3, dec!(1)), row(2, 1, 0, dec!(1))];
        assert!(verify_conservation(2, &entries, dec!(10), dec!(10)).is_balanced());
        assert!(!verify_conservation(1, &entries, dec!(10), dec!(10)).is_balanced());
    }
}
