//! The energy ledger: the single place where creature energy changes.
//!
//! The [`EnergyLedger`] moves energy between two creatures and appends a
//! [`TransferEntry`] for every movement. It also remembers how much
//! energy was endowed at genesis so the world total can be checked after
//! every tick.
//!
//! # Design
//!
//! - **Zero-sum**: `from.energy -= amount; to.energy += amount`, nothing else.
//! - **Signed input**: a negative amount moves energy the other way.
//! - **Bounded journal**: old ticks can be pruned; the endowment total is kept.
//! - **Precision**: amounts are [`Decimal`], rounded to six places.

use rust_decimal::Decimal;
use tracing::trace;

use creatures_types::AgentState;

use crate::conservation::{self, ConservationResult};
use crate::{LedgerError, TransferEntry, TransferReason};

/// Decimal places kept on every transferred amount.
pub const AMOUNT_SCALE: u32 = 6;

/// Append-only journal of energy transfers plus the genesis total.
#[derive(Debug, Default)]
pub struct EnergyLedger {
    /// Journal rows, in insertion order.
    entries: Vec<TransferEntry>,
    /// Sequence number for the next row.
    next_sequence: u64,
    /// Sum of every genesis endowment.
    endowed: Decimal,
}

impl EnergyLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_sequence: 0,
            endowed: Decimal::ZERO,
        }
    }

    /// Number of rows currently held.
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal holds no rows.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total energy brought into the world by [`endow`](Self::endow).
    pub const fn endowed_total(&self) -> Decimal {
        self.endowed
    }

    /// All rows currently held, oldest first.
    pub fn entries(&self) -> &[TransferEntry] {
        &self.entries
    }

    /// Rows recorded during `tick`.
    pub fn entries_for_tick(&self, tick: u64) -> impl Iterator<Item = &TransferEntry> {
        self.entries.iter().filter(move |e| e.tick == tick)
    }

    /// Fund a starting creature from outside the world.
    ///
    /// This is the only way energy enters the simulation.
    pub fn endow(
        &mut self,
        tick: u64,
        to: &mut AgentState,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        let amount = amount.round_dp(AMOUNT_SCALE);
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveEndowment { amount });
        }
        let overflow = || LedgerError::Overflow {
            from: to.id,
            to: to.id,
            amount,
        };
        let credited = to.energy.checked_add(amount).ok_or_else(overflow)?;
        let endowed = self.endowed.checked_add(amount).ok_or_else(overflow)?;
        to.energy = credited;
        self.endowed = endowed;
        self.push(tick, None, to, amount, TransferReason::Genesis);
        Ok(())
    }

    /// Move `amount` of energy from `from` to `to`.
    ///
    /// A zero amount does nothing. A negative amount moves `|amount|`
    /// from `to` to `from`. Energy may go negative; the death check
    /// handles that afterwards.
    pub fn transfer(
        &mut self,
        tick: u64,
        from: &mut AgentState,
        to: &mut AgentState,
        amount: Decimal,
        reason: TransferReason,
    ) -> Result<(), LedgerError> {
        let amount = amount.round_dp(AMOUNT_SCALE);
        if amount.is_zero() {
            return Ok(());
        }
        if amount.is_sign_negative() {
            return self.transfer(tick, to, from, amount.abs(), reason);
        }
        if from.id == to.id {
            return Err(LedgerError::SelfTransfer { id: from.id });
        }

        let overflow = || LedgerError::Overflow {
            from: from.id,
            to: to.id,
            amount,
        };
        let debited = from.energy.checked_sub(amount).ok_or_else(overflow)?;
        let credited = to.energy.checked_add(amount).ok_or_else(overflow)?;
        from.energy = debited;
        to.energy = credited;

        trace!(
            tick,
            from = %from.id,
            to = %to.id,
            amount = %amount,
            reason = reason.as_str(),
            "energy transfer"
        );
        self.push(tick, Some(from), to, amount, reason);
        Ok(())
    }

    /// Drop journal rows older than `tick`. The endowment total is kept,
    /// so world-total checks stay valid.
    pub fn prune_before(&mut self, tick: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.tick >= tick);
        before.saturating_sub(self.entries.len())
    }

    /// Check the journal rows of `tick` and compare `observed_total`
    /// (the energy the world holds now, sink included) with the endowed
    /// total.
    pub fn verify_conservation(&self, tick: u64, observed_total: Decimal) -> ConservationResult {
        conservation::verify_conservation(tick, &self.entries, self.endowed, observed_total)
    }

    fn push(
        &mut self,
        tick: u64,
        from: Option<&AgentState>,
        to: &AgentState,
        amount: Decimal,
        reason: TransferReason,
    ) {
        self.entries.push(TransferEntry {
            sequence: self.next_sequence,
            tick,
            from: from.map(|f| f.id),
            to: to.id,
            amount,
            reason,
        });
        self.next_sequence = self.next_sequence.saturating_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use creatures_types::{CreatureId, Footprint};

    use super::*;

    fn creature(id: u64, energy: Decimal) -> AgentState {
        let mut c = AgentState::new(CreatureId(id), "Test", Footprint::new(10, 10), dec!(0.2), 100);
        c.energy = energy;
        c
    }

    #[test]
    fn transfer_is_zero_sum() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(100));
        let mut b = creature(2, dec!(50));
        ledger
            .transfer(3, &mut a, &mut b, dec!(12.5), TransferReason::Eat)
            .unwrap();
        assert_eq!(a.energy, dec!(87.5));
        assert_eq!(b.energy, dec!(62.5));
        assert_eq!(ledger.len(), 1);
        let row = ledger.entries().first().unwrap();
        assert_eq!(row.from, Some(CreatureId(1)));
        assert_eq!(row.to, CreatureId(2));
        assert_eq!(row.tick, 3);
    }

    #[test]
    fn negative_amount_reverses_direction() {
        let mut ledger = EnergyLedger::new();
        let mut dead = creature(1, dec!(-3));
        let mut sun = creature(0, dec!(1000));
        let residue = dead.energy;
        ledger
            .transfer(1, &mut dead, &mut sun, residue, TransferReason::Residue)
            .unwrap();
        assert_eq!(dead.energy, Decimal::ZERO);
        assert_eq!(sun.energy, dec!(997));
        let row = ledger.entries().first().unwrap();
        assert_eq!(row.from, Some(CreatureId(0)));
        assert_eq!(row.amount, dec!(3));
    }

    #[test]
    fn zero_amount_is_noop() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(10));
        let mut b = creature(2, dec!(10));
        ledger
            .transfer(1, &mut a, &mut b, Decimal::ZERO, TransferReason::Decay)
            .unwrap();
        assert!(ledger.is_empty());
        assert_eq!(a.energy, dec!(10));
    }

    #[test]
    fn self_transfer_rejected() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(10));
        let mut twin = a.clone();
        let result = ledger.transfer(1, &mut a, &mut twin, dec!(1), TransferReason::Eat);
        assert!(matches!(result, Err(LedgerError::SelfTransfer { .. })));
        assert_eq!(a.energy, dec!(10));
    }

    #[test]
    fn transfer_may_overdraw() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(1));
        let mut sun = creature(0, Decimal::ZERO);
        ledger
            .transfer(1, &mut a, &mut sun, dec!(4), TransferReason::Movement)
            .unwrap();
        assert_eq!(a.energy, dec!(-3));
    }

    #[test]
    fn endow_tracks_total() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, Decimal::ZERO);
        let mut b = creature(2, Decimal::ZERO);
        ledger.endow(0, &mut a, dec!(5000)).unwrap();
        ledger.endow(0, &mut b, dec!(5000)).unwrap();
        assert_eq!(ledger.endowed_total(), dec!(10000));
        assert!(ledger.endow(0, &mut a, dec!(-1)).is_err());
    }

    #[test]
    fn amounts_are_rounded() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(10));
        let mut b = creature(2, dec!(0));
        ledger
            .transfer(1, &mut a, &mut b, dec!(0.12345678), TransferReason::Movement)
            .unwrap();
        assert_eq!(b.energy, dec!(0.123457));
    }

    #[test]
    fn prune_keeps_recent_rows() {
        let mut ledger = EnergyLedger::new();
        let mut a = creature(1, dec!(10));
        let mut b = creature(2, dec!(0));
        for tick in 0..5 {
            ledger
                .transfer(tick, &mut a, &mut b, dec!(1), TransferReason::Decay)
                .unwrap();
        }
        assert_eq!(ledger.prune_before(3), 3);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries_for_tick(4).count(), 1);
    }
}
