//! Per-tick resolution context shared by interactions and actions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use creatures_ledger::ledger::AMOUNT_SCALE;
use creatures_ledger::{EnergyLedger, TransferReason};
use creatures_types::{AgentState, CreatureId, HistoryRecord, KindSummary, Status};

use crate::behavior::{HookContext, absorb_fault};
use crate::config::{ArenaBounds, RulesConfig};
use crate::error::AgentError;
use crate::physics;
use crate::random::RandomSource;
use crate::registry::{Creature, EntityRegistry};

/// Everything a tick's resolution steps share besides the registry.
#[derive(Debug)]
pub struct TickScope<'a> {
    /// Current tick.
    pub tick: u64,
    /// Rule constants.
    pub rules: &'a RulesConfig,
    /// Playable rectangle.
    pub arena: ArenaBounds,
    /// Id of the energy sink.
    pub sink: CreatureId,
    /// The transfer primitive.
    pub ledger: &'a mut EnergyLedger,
    /// Shared random source.
    pub rng: &'a mut dyn RandomSource,
    /// Per-kind counts and energy handed to hooks.
    pub population: &'a mut BTreeMap<String, KindSummary>,
    /// History rows produced so far this tick.
    pub events: Vec<HistoryRecord>,
    /// Creatures born this tick, in birth order.
    pub births: Vec<CreatureId>,
}

impl<'a> TickScope<'a> {
    /// Open a scope for `tick`.
    pub fn new(
        tick: u64,
        rules: &'a RulesConfig,
        arena: ArenaBounds,
        sink: CreatureId,
        ledger: &'a mut EnergyLedger,
        rng: &'a mut dyn RandomSource,
        population: &'a mut BTreeMap<String, KindSummary>,
    ) -> Self {
        Self {
            tick,
            rules,
            arena,
            sink,
            ledger,
            rng,
            population,
            events: Vec::new(),
            births: Vec::new(),
        }
    }

    /// The view handed to a behavior hook.
    pub fn hook(&mut self) -> HookContext<'_> {
        HookContext {
            tick: self.tick,
            arena: self.arena,
            population: &*self.population,
            rng: &mut *self.rng,
        }
    }

    /// Append a history row.
    pub fn record(&mut self, row: HistoryRecord) {
        self.events.push(row);
    }

    /// The responsiveness gate. Draws `0..=max_alertness`; a draw above
    /// the creature's alertness, or being asleep, means it does nothing.
    pub fn is_responsive(&mut self, state: &AgentState) -> bool {
        let draw = self
            .rng
            .int_inclusive(0, i64::from(self.rules.max_alertness));
        if draw > i64::from(state.alertness) {
            return false;
        }
        state.status != Status::Asleep
    }

    /// Move `amount` from creature `from` to the sink. Returns the amount
    /// actually charged, which is zero when `from` is the sink.
    pub fn pay_sink(
        &mut self,
        registry: &mut EntityRegistry,
        from: CreatureId,
        amount: Decimal,
        reason: TransferReason,
    ) -> Result<Decimal, AgentError> {
        if from == self.sink || amount.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let (payer, sink) = registry.require_pair_mut(from, self.sink)?;
        self.ledger
            .transfer(self.tick, &mut payer.state, &mut sink.state, amount, reason)?;
        Ok(amount.round_dp(AMOUNT_SCALE))
    }

    /// Ask `parent_id` for an offspring and stamp it, placed one footprint
    /// width from the parent at a random heading. The offspring has zero
    /// energy and is not yet in the registry.
    pub fn conceive(
        &mut self,
        registry: &mut EntityRegistry,
        parent_id: CreatureId,
    ) -> Result<Option<Creature>, AgentError> {
        let parent = registry.require_mut(parent_id)?;
        let requested = parent
            .behavior
            .create_offspring(&mut self.hook(), &parent.state);
        let Some(request) = absorb_fault(requested, &parent.state, "create_offspring") else {
            return Ok(None);
        };
        let parent_position = parent.state.motion.position;
        let parent_kind = parent.state.kind.clone();

        let mut baby = match registry.instantiate(request, self.rules) {
            Ok(baby) => baby,
            Err(error) => {
                warn!(
                    kind = %parent_kind,
                    creature_id = %parent_id,
                    hook = "create_offspring",
                    error = %error,
                    "behavior fault, offspring discarded"
                );
                return Ok(None);
            }
        };
        let heading = self.rng.int_inclusive(0, 360);
        let heading = i32::try_from(heading).map_or(0.0, f64::from);
        baby.state.motion.position =
            physics::offspring_position(parent_position, baby.state.footprint, heading);
        Ok(Some(baby))
    }

    /// Put a funded newborn into the registry and count it.
    pub fn deliver(&mut self, registry: &mut EntityRegistry, baby: Creature) {
        let summary = self.population.entry(baby.state.kind.clone()).or_default();
        summary.count = summary.count.saturating_add(1);
        summary.total_energy = summary.total_energy.saturating_add(baby.state.energy);
        debug!(
            tick = self.tick,
            kind = %baby.state.kind,
            creature_id = %baby.state.id,
            energy = %baby.state.energy,
            "creature born"
        );
        self.births.push(baby.state.id);
        registry.insert(baby);
    }
}
