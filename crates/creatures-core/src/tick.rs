//! The tick engine: one fully ordered pass over the arena.
//!
//! Each tick runs these phases in order:
//!
//! 1. **Reap** -- creatures marked dead hand their residual energy to the
//!    sun and leave the registry; creatures marked dying get their
//!    one-shot `on_dying` notice and become dead.
//! 2. **Sink reset** -- the sun is made awake, fully alert and undamaged.
//! 3. **Per-creature loop**, in creation order over the creatures present
//!    when the loop starts, skipping anything not awake or asleep:
//!    collisions and encounters, the sandboxed tick hook, the tick
//!    action, the boundary check, decay, and the death check.
//!
//! After the loop the ledger journal for the tick is verified against the
//! energy the world holds, and the surviving history rows go to the
//! recorder. Creatures born during the loop collide immediately but take
//! their first turn next tick.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, error};

use creatures_agents::{
    AgentError, ArenaBounds, Creature, DeathCause, EntityRegistry, NewCreature, RandomSource,
    RulesConfig, SunBehavior, TickScope, absorb_fault, apply_tick_action, health_death, off_edge,
    run_encounter, sun_blueprint,
};
use creatures_ledger::{ConservationResult, EnergyLedger, LedgerError, TransferReason};
use creatures_types::{
    AgentState, CreatureId, EventCategory, HistoryRecord, KindSummary, Status, Vec2,
};

use crate::config::SimulationConfig;
use crate::history::{HistoryError, HistoryFilter, HistoryRecorder};
use crate::plugin::{KindRegistry, SetupError};
use crate::sandbox;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A registry or resolution step failed.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// An energy transfer failed outside the resolution steps.
    #[error("ledger error: {source}")]
    Ledger {
        /// The underlying ledger error.
        #[from]
        source: LedgerError,
    },

    /// The history sink failed.
    #[error("history error: {source}")]
    History {
        /// The underlying history error.
        #[from]
        source: HistoryError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Awake or asleep creatures at the end of the tick, the sun excluded.
    pub alive: u32,
    /// Creatures born this tick.
    pub births: u32,
    /// Creatures that started dying this tick.
    pub deaths: u32,
    /// Dead creatures removed at the start of the tick.
    pub reaped: u32,
    /// Count and energy per kind at the end of the tick.
    pub population: BTreeMap<String, KindSummary>,
    /// Energy held by every creature, the sun included.
    pub total_energy: Decimal,
    /// Outcome of the conservation check.
    pub conservation: ConservationResult,
    /// History rows produced.
    pub events: usize,
    /// History rows that passed the filter and were recorded.
    pub recorded: usize,
}

/// What the starting population came to.
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Creatures added per kind.
    pub spawned: BTreeMap<String, u32>,
    /// Kinds that contributed nothing, with the reason.
    pub rejected: Vec<SetupError>,
}

/// Owns the arena and advances it one tick at a time.
#[derive(Debug)]
pub struct TickEngine {
    rules: RulesConfig,
    arena: ArenaBounds,
    filter: HistoryFilter,
    ledger_retention_ticks: u64,
    registry: EntityRegistry,
    ledger: EnergyLedger,
    rng: Box<dyn RandomSource>,
    sink: CreatureId,
    tick: u64,
}

impl TickEngine {
    /// Create an arena holding only the sun.
    pub fn new(config: &SimulationConfig, rng: Box<dyn RandomSource>) -> Result<Self, TickError> {
        let mut engine = Self {
            rules: config.rules.clone(),
            arena: config.arena.bounds(),
            filter: HistoryFilter::new(config.logging.clone()),
            ledger_retention_ticks: config.world.ledger_retention_ticks,
            registry: EntityRegistry::new(),
            ledger: EnergyLedger::new(),
            rng,
            sink: CreatureId(0),
            tick: 0,
        };
        engine.sink = engine.spawn(NewCreature::new(sun_blueprint(), SunBehavior))?;
        Ok(engine)
    }

    /// Replace the history filter.
    #[must_use]
    pub fn with_filter(mut self, filter: HistoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Add a starting creature: placed at a random point and heading
    /// unless its blueprint pins the position, then endowed with the
    /// initial energy.
    pub fn spawn(&mut self, request: NewCreature) -> Result<CreatureId, TickError> {
        let fixed = request.blueprint.fixed_position;
        let mut creature = self.registry.instantiate(request, &self.rules)?;
        if !fixed {
            let rng = &mut *self.rng;
            creature.state.motion.position = Vec2::new(
                self.arena.width().mul_add(rng.unit(), self.arena.left),
                self.arena.height().mul_add(rng.unit(), self.arena.top),
            );
            let heading = rng.int_inclusive(0, 360);
            creature.state.motion.angle = i32::try_from(heading).map_or(0.0, f64::from);
        }
        if self.rules.initial_energy > Decimal::ZERO {
            self.ledger
                .endow(self.tick, &mut creature.state, self.rules.initial_energy)?;
        }
        let id = creature.state.id;
        self.registry.insert(creature);
        Ok(id)
    }

    /// Build every registered kind's starting population. Rejected kinds
    /// are reported, not fatal.
    pub fn populate(
        &mut self,
        kinds: &mut KindRegistry,
        counts: &BTreeMap<String, u32>,
    ) -> Result<SetupReport, TickError> {
        let mut report = SetupReport::default();
        for (kind, outcome) in kinds.start_all(counts, self.arena, &mut *self.rng) {
            match outcome {
                Ok(population) => {
                    let mut added = 0_u32;
                    for request in population.into_vec() {
                        self.spawn(request)?;
                        added = added.saturating_add(1);
                    }
                    debug!(kind = %kind, count = added, "starting creatures added");
                    report.spawned.insert(kind, added);
                }
                Err(fault) => report.rejected.push(fault),
            }
        }
        Ok(report)
    }

    /// The next tick to run.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Id of the sun.
    pub const fn sink(&self) -> CreatureId {
        self.sink
    }

    /// The creatures.
    pub const fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// The creatures, mutably.
    pub const fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// The transfer journal.
    pub const fn ledger(&self) -> &EnergyLedger {
        &self.ledger
    }

    /// Rule constants in force.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Playable rectangle.
    pub const fn arena(&self) -> ArenaBounds {
        self.arena
    }

    /// Awake or asleep creatures, the sun excluded.
    pub fn alive(&self) -> u32 {
        let count = self
            .registry
            .iter()
            .filter(|c| c.state.id != self.sink && c.state.is_live())
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Run one tick and hand the rows that pass the filter to `history`.
    pub fn run_tick(
        &mut self,
        history: &mut dyn HistoryRecorder,
    ) -> Result<TickSummary, TickError> {
        let tick = self.tick;
        let reaped = self.reap(tick)?;

        let mut population = self.registry.summarize_by_kind();
        let mut scope = TickScope::new(
            tick,
            &self.rules,
            self.arena,
            self.sink,
            &mut self.ledger,
            &mut *self.rng,
            &mut population,
        );
        notify_dying(&mut scope, &mut self.registry)?;
        reset_sink(&mut self.registry, scope.sink, scope.rules)?;

        let mut deaths = 0_u32;
        for id in self.registry.ids() {
            if tick_creature(&mut scope, &mut self.registry, id)? {
                deaths = deaths.saturating_add(1);
            }
        }
        let births = u32::try_from(scope.births.len()).unwrap_or(u32::MAX);
        let events = scope.events;

        let total_energy = self.registry.total_energy();
        let conservation = self.ledger.verify_conservation(tick, total_energy);
        if let ConservationResult::Anomaly(anomaly) = &conservation {
            error!(
                tick,
                expected = %anomaly.expected_total,
                observed = %anomaly.observed_total,
                malformed = anomaly.malformed_entries,
                "energy conservation violated"
            );
        }

        let mut recorded = 0_usize;
        for row in events.iter().filter(|row| self.filter.allows(row)) {
            history.record(row)?;
            recorded = recorded.saturating_add(1);
        }

        if self.ledger_retention_ticks > 0 {
            self.ledger
                .prune_before(tick.saturating_sub(self.ledger_retention_ticks));
        }
        self.tick = tick.saturating_add(1);

        let summary = TickSummary {
            tick,
            alive: self.alive(),
            births,
            deaths,
            reaped,
            population: self.registry.summarize_by_kind(),
            total_energy,
            conservation,
            events: events.len(),
            recorded,
        };
        debug!(
            tick,
            alive = summary.alive,
            births,
            deaths,
            reaped,
            total_energy = %total_energy,
            "tick complete"
        );
        Ok(summary)
    }

    /// Remove dead creatures after moving their residual energy to the
    /// sun.
    fn reap(&mut self, tick: u64) -> Result<u32, TickError> {
        let dead: Vec<CreatureId> = self
            .registry
            .iter()
            .filter(|c| c.state.status == Status::Dead && c.state.id != self.sink)
            .map(|c| c.state.id)
            .collect();
        for id in &dead {
            let (corpse, sun) = self.registry.require_pair_mut(*id, self.sink)?;
            let residue = corpse.state.energy;
            self.ledger.transfer(
                tick,
                &mut corpse.state,
                &mut sun.state,
                residue,
                TransferReason::Residue,
            )?;
            debug!(tick, kind = %corpse.state.kind, creature_id = %id, residue = %residue, "creature removed");
            self.registry.remove(*id);
        }
        Ok(u32::try_from(dead.len()).unwrap_or(u32::MAX))
    }
}

// ---------------------------------------------------------------------------
// Phases
// ---------------------------------------------------------------------------

fn notify_dying(scope: &mut TickScope<'_>, registry: &mut EntityRegistry) -> Result<(), AgentError> {
    for id in registry.ids() {
        let Creature { state, behavior } = registry.require_mut(id)?;
        if state.status != Status::Dying {
            continue;
        }
        state.status = Status::Dead;
        let noticed = behavior.on_dying(&mut scope.hook(), state);
        absorb_fault(noticed, state, "on_dying");
    }
    Ok(())
}

fn reset_sink(
    registry: &mut EntityRegistry,
    sink: CreatureId,
    rules: &RulesConfig,
) -> Result<(), AgentError> {
    let sun = &mut registry.require_mut(sink)?.state;
    sun.status = Status::Awake;
    sun.alertness = rules.max_alertness;
    sun.damage = Decimal::ZERO;
    Ok(())
}

/// One creature's turn. Returns whether it started dying.
fn tick_creature(
    scope: &mut TickScope<'_>,
    registry: &mut EntityRegistry,
    id: CreatureId,
) -> Result<bool, AgentError> {
    if !registry.state(id).is_some_and(|s| s.is_live()) {
        return Ok(false);
    }

    for other in registry.colliding_with(id) {
        run_encounter(scope, registry, id, other)?;
    }

    let Creature { state, behavior } = registry.require_mut(id)?;
    let decided =
        sandbox::run_sandboxed_hook(state, |me| behavior.decide_tick(&mut scope.hook(), me));
    if let Some(action) = absorb_fault(decided, state, "decide_tick") {
        apply_tick_action(scope, registry, id, action)?;
    }

    if id == scope.sink {
        return Ok(false);
    }
    let rules = scope.rules;

    let state = &mut registry.require_mut(id)?.state;
    let fell = off_edge(&scope.arena, state.motion.position);
    if let Some(cause) = fell {
        mark_dying(scope, state, cause);
    }

    let state = &mut registry.require_mut(id)?.state;
    state.age = state.age.saturating_add(rules.tick_age_increase);
    state.alertness = rules.clamp_alertness(
        state
            .alertness
            .saturating_sub(rules.tick_alertness_reduction),
    );
    scope.pay_sink(registry, id, rules.tick_energy_reduction, TransferReason::Decay)?;

    if fell.is_some() {
        return Ok(true);
    }
    let state = &mut registry.require_mut(id)?.state;
    let Some(cause) = health_death(state) else {
        return Ok(false);
    };
    mark_dying(scope, state, cause);
    Ok(true)
}

fn mark_dying(scope: &mut TickScope<'_>, state: &mut AgentState, cause: DeathCause) {
    state.status = Status::Dying;
    debug!(
        tick = scope.tick,
        kind = %state.kind,
        creature_id = %state.id,
        cause = %cause,
        "creature dying"
    );
    let tick = scope.tick;
    scope.record(HistoryRecord::for_subject(
        EventCategory::Died,
        tick,
        state,
        "died",
        cause.result_text(),
    ));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use rust_decimal_macros::dec;

    use creatures_agents::{
        Behavior, BehaviorError, Blueprint, HookContext, Inert, ScriptedRandom, SeededRandom,
    };
    use creatures_types::{
        CreatureSnapshot, Footprint, Interaction, InteractionKind, TickAction, Weapon, WeaponKind,
    };

    use super::*;
    use crate::history::MemoryHistory;

    /// Tries to rewrite its own vitals every tick.
    #[derive(Debug)]
    struct Cheater;

    impl Behavior for Cheater {
        fn decide_tick(
            &mut self,
            _ctx: &mut HookContext<'_>,
            me: &mut AgentState,
        ) -> Result<Option<TickAction>, BehaviorError> {
            me.energy = dec!(999999);
            me.damage = Decimal::ZERO;
            me.alertness = 100;
            me.age = 0;
            Ok(Some(TickAction::Still))
        }
    }

    /// Counts its dying notices.
    #[derive(Debug)]
    struct Mortal(Rc<Cell<u32>>);

    impl Behavior for Mortal {
        fn on_dying(
            &mut self,
            _ctx: &mut HookContext<'_>,
            _me: &AgentState,
        ) -> Result<(), BehaviorError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    /// Fails every hook.
    #[derive(Debug)]
    struct Faulty;

    impl Behavior for Faulty {
        fn decide_tick(
            &mut self,
            _ctx: &mut HookContext<'_>,
            _me: &mut AgentState,
        ) -> Result<Option<TickAction>, BehaviorError> {
            Err(BehaviorError::Failed("tick exploded".to_owned()))
        }

        fn propose_interaction(
            &mut self,
            _ctx: &mut HookContext<'_>,
            _me: &AgentState,
            _other: &CreatureSnapshot,
        ) -> Result<Option<Interaction>, BehaviorError> {
            Err(BehaviorError::InvalidOutput("garbage".to_owned()))
        }
    }

    /// Eats whatever it bumps into, wanders, and divides now and then.
    #[derive(Debug)]
    struct Grazer;

    impl Behavior for Grazer {
        fn decide_tick(
            &mut self,
            ctx: &mut HookContext<'_>,
            me: &mut AgentState,
        ) -> Result<Option<TickAction>, BehaviorError> {
            me.motion.steering = f64::from(i32::try_from(ctx.rng.int_inclusive(-5, 5)).unwrap_or(0));
            Ok(Some(match ctx.rng.int_inclusive(0, 9) {
                0 => TickAction::Divide,
                1 => TickAction::Sleep,
                2 => TickAction::Still,
                _ => TickAction::Move,
            }))
        }

        fn propose_interaction(
            &mut self,
            ctx: &mut HookContext<'_>,
            _me: &AgentState,
            _other: &CreatureSnapshot,
        ) -> Result<Option<Interaction>, BehaviorError> {
            Ok(Some(match ctx.rng.int_inclusive(0, 2) {
                0 => Interaction::new(InteractionKind::Eat),
                1 => Interaction::new(InteractionKind::Mate),
                _ => Interaction::with_details(InteractionKind::Attack, "horn"),
            }))
        }

        fn respond_to_interaction(
            &mut self,
            _ctx: &mut HookContext<'_>,
            _me: &AgentState,
            _other: &CreatureSnapshot,
            proposed: &Interaction,
        ) -> Result<Option<Interaction>, BehaviorError> {
            Ok(Some(Interaction::new(proposed.action)))
        }

        fn create_offspring(
            &mut self,
            _ctx: &mut HookContext<'_>,
            me: &AgentState,
        ) -> Result<Option<NewCreature>, BehaviorError> {
            Ok(Some(NewCreature::new(grazer_blueprint(&me.kind), Self)))
        }
    }

    fn grazer_blueprint(kind: &str) -> Blueprint {
        Blueprint::new(kind, Footprint::new(12, 12))
            .max_velocity(3.0)
            .weapon("horn", Weapon::new(WeaponKind::Jaws, dec!(40)))
    }

    fn engine() -> TickEngine {
        TickEngine::new(&SimulationConfig::default(), Box::new(ScriptedRandom::new())).unwrap()
    }

    fn at(kind: &str, x: f64, y: f64, behavior: impl Behavior + 'static) -> NewCreature {
        NewCreature::new(
            Blueprint::new(kind, Footprint::new(10, 10)).at(Vec2::new(x, y)),
            behavior,
        )
    }

    fn state(engine: &TickEngine, id: CreatureId) -> &AgentState {
        engine.registry().state(id).unwrap()
    }

    #[test]
    fn sun_is_created_and_endowed() {
        let engine = engine();
        assert_eq!(engine.registry().len(), 1);
        let sun = state(&engine, engine.sink());
        assert_eq!(sun.kind, "Sun");
        assert_eq!(sun.energy, dec!(5000));
        assert_eq!(engine.alive(), 0);
    }

    #[test]
    fn tick_hook_cannot_rewrite_vitals() {
        let mut engine = engine();
        let id = engine.spawn(at("Cheat", 300.0, 300.0, Cheater)).unwrap();
        engine.registry_mut().get_mut(id).unwrap().state.alertness = 50;
        let mut history = MemoryHistory::new();
        engine.run_tick(&mut history).unwrap();

        let s = state(&engine, id);
        assert_eq!(s.energy, dec!(4999.5));
        assert_eq!(s.age, 1);
        assert_eq!(s.alertness, 49);
        assert_eq!(s.last_action, Some(TickAction::Still));
    }

    #[test]
    fn damage_death_runs_through_dying_and_dead() {
        let mut engine = engine();
        let notices = Rc::new(Cell::new(0));
        let id = engine
            .spawn(at("Mortal", 300.0, 300.0, Mortal(Rc::clone(&notices))))
            .unwrap();
        engine.registry_mut().get_mut(id).unwrap().state.damage = dec!(100);
        let mut history = MemoryHistory::new();

        let first = engine.run_tick(&mut history).unwrap();
        assert_eq!(first.deaths, 1);
        assert_eq!(state(&engine, id).status, Status::Dying);
        assert_eq!(history.with_result("Too much damage").count(), 1);

        engine.run_tick(&mut history).unwrap();
        assert_eq!(state(&engine, id).status, Status::Dead);
        assert_eq!(notices.get(), 1);

        let third = engine.run_tick(&mut history).unwrap();
        assert_eq!(third.reaped, 1);
        assert!(engine.registry().get(id).is_none());
        assert_eq!(notices.get(), 1);
        assert_eq!(state(&engine, engine.sink()).energy, dec!(10000));
        assert!(third.conservation.is_balanced());
    }

    #[test]
    fn starving_creature_dies_out_of_energy() {
        let mut config = SimulationConfig::default();
        config.rules.initial_energy = dec!(0.4);
        let mut engine = TickEngine::new(&config, Box::new(ScriptedRandom::new())).unwrap();
        let id = engine.spawn(at("Gnub", 300.0, 300.0, Inert)).unwrap();
        let mut history = MemoryHistory::new();
        let summary = engine.run_tick(&mut history).unwrap();

        assert_eq!(state(&engine, id).status, Status::Dying);
        assert_eq!(state(&engine, id).energy, dec!(-0.1));
        assert_eq!(history.with_result("Out of energy").count(), 1);
        assert!(summary.conservation.is_balanced());

        engine.run_tick(&mut history).unwrap();
        let last = engine.run_tick(&mut history).unwrap();
        assert!(engine.registry().get(id).is_none());
        assert_eq!(last.total_energy, dec!(0.8));
    }

    #[test]
    fn leaving_the_arena_is_one_death() {
        let mut config = SimulationConfig::default();
        config.rules.initial_energy = dec!(0.4);
        let mut engine = TickEngine::new(&config, Box::new(ScriptedRandom::new())).unwrap();
        let id = engine.spawn(at("Gnub", 700.0, 300.0, Inert)).unwrap();
        let mut history = MemoryHistory::new();
        engine.run_tick(&mut history).unwrap();

        assert_eq!(state(&engine, id).status, Status::Dying);
        let deaths: Vec<_> = history
            .rows()
            .iter()
            .filter(|r| r.category == EventCategory::Died)
            .collect();
        assert_eq!(deaths.len(), 1);
        assert_eq!(deaths[0].result, "Fell off edge");
    }

    #[test]
    fn faulty_behavior_only_decays() {
        let mut engine = engine();
        let bad = engine.spawn(at("Faulty", 300.0, 300.0, Faulty)).unwrap();
        let good = engine.spawn(at("Gnub", 305.0, 300.0, Inert)).unwrap();
        let mut history = MemoryHistory::new();
        let summary = engine.run_tick(&mut history).unwrap();

        assert_eq!(state(&engine, bad).energy, dec!(4999.5));
        assert_eq!(state(&engine, good).energy, dec!(4999.5));
        assert_eq!(state(&engine, good).age, 1);
        assert_eq!(summary.alive, 2);
    }

    #[test]
    fn sun_is_reset_each_tick() {
        let mut engine = engine();
        let sink = engine.sink();
        {
            let sun = &mut engine.registry_mut().get_mut(sink).unwrap().state;
            sun.damage = dec!(2400);
            sun.alertness = 3;
            sun.status = Status::Asleep;
        }
        let mut history = MemoryHistory::new();
        engine.run_tick(&mut history).unwrap();
        let sun = state(&engine, sink);
        assert_eq!(sun.damage, Decimal::ZERO);
        assert_eq!(sun.alertness, 100);
        assert_eq!(sun.status, Status::Awake);
        assert_eq!(sun.energy, dec!(5000));
    }

    #[test]
    fn newborns_wait_a_tick() {
        #[derive(Debug)]
        struct Splitter;

        impl Behavior for Splitter {
            fn decide_tick(
                &mut self,
                _ctx: &mut HookContext<'_>,
                me: &mut AgentState,
            ) -> Result<Option<TickAction>, BehaviorError> {
                Ok((me.age == 0).then_some(TickAction::Divide))
            }

            fn create_offspring(
                &mut self,
                _ctx: &mut HookContext<'_>,
                me: &AgentState,
            ) -> Result<Option<NewCreature>, BehaviorError> {
                Ok(Some(NewCreature::new(
                    Blueprint::new(me.kind.clone(), me.footprint),
                    Self,
                )))
            }
        }

        let mut engine = engine();
        let parent = engine.spawn(at("Berry", 300.0, 300.0, Splitter)).unwrap();
        let mut history = MemoryHistory::new();
        let summary = engine.run_tick(&mut history).unwrap();

        assert_eq!(summary.births, 1);
        let baby = engine.registry().iter().last().unwrap();
        assert_ne!(baby.state.id, parent);
        assert_eq!(baby.state.age, 0);
        assert_eq!(state(&engine, parent).age, 1);
        assert_eq!(history.with_result("divided").count(), 1);
        assert!(summary.conservation.is_balanced());
    }

    #[test]
    fn sun_rows_are_filtered_by_default() {
        let mut engine = engine();
        let mut history = MemoryHistory::new();
        let summary = engine.run_tick(&mut history).unwrap();
        assert_eq!(summary.events, 1);
        assert_eq!(summary.recorded, 0);
        assert!(history.rows().is_empty());

        let mut engine = engine.with_filter(HistoryFilter::keep_all());
        let summary = engine.run_tick(&mut history).unwrap();
        assert_eq!(summary.recorded, 1);
        assert_eq!(history.rows()[0].kind, "Sun");
        assert_eq!(history.rows()[0].action, "move");
    }

    #[test]
    fn energy_is_conserved_in_a_busy_arena() {
        let mut engine =
            TickEngine::new(&SimulationConfig::default(), Box::new(SeededRandom::new(11))).unwrap();
        for _ in 0..40 {
            engine
                .spawn(NewCreature::new(grazer_blueprint("Grazer"), Grazer))
                .unwrap();
        }
        let endowed = engine.ledger().endowed_total();
        let mut history = MemoryHistory::new();
        for _ in 0..60 {
            let summary = engine.run_tick(&mut history).unwrap();
            assert!(
                summary.conservation.is_balanced(),
                "tick {}: {:?}",
                summary.tick,
                summary.conservation
            );
            assert_eq!(summary.total_energy, endowed);
        }
        assert!(!history.rows().is_empty());
    }

    #[test]
    fn setup_report_counts_and_rejects() {
        let mut kinds = KindRegistry::new();
        kinds
            .register_kind("Gnub", |ctx: &mut crate::plugin::StartContext<'_>| {
                Ok(creatures_agents::Population::Many(
                    (0..ctx.count)
                        .map(|_| NewCreature::new(Blueprint::new("Gnub", Footprint::new(15, 15)), Inert))
                        .collect(),
                ))
            })
            .unwrap();
        kinds
            .register_kind("Broken", |_ctx: &mut crate::plugin::StartContext<'_>| {
                Err(BehaviorError::Failed("no".to_owned()))
            })
            .unwrap();

        let mut engine = engine();
        let counts = BTreeMap::from([("Gnub".to_owned(), 3), ("Broken".to_owned(), 3)]);
        let report = engine.populate(&mut kinds, &counts).unwrap();
        assert_eq!(report.spawned.get("Gnub"), Some(&3));
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(engine.alive(), 3);
        assert_eq!(engine.ledger().endowed_total(), dec!(20000));
        for creature in engine.registry().iter() {
            assert!(engine.arena().contains(creature.state.motion.position));
        }
    }
}
