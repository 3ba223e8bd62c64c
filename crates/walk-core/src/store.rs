//! The agent state store.
//!
//! One mutable state container orchestrates casting, movement, and the
//! resource economy, and exposes the action surface consumed by UI and
//! persistence collaborators. All mutation happens on a single logical
//! thread; collaborators observe state through snapshots and the event
//! buffer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::time::Duration;

use walk_events::{
    generate_snapshot_id, CubePos, EngineSnapshot, Event, EventDetail, PlacementSnapshot,
    ResourceCause,
};

use crate::cast::{Cast, Reading};
use crate::config::EngineConfig;
use crate::economy::{resolve_reading_end, Counters, CycleTracker};
use crate::grid::{CubeCoord, SpiralGrid};
use crate::hexagrams::Trigram;
use crate::map_data::SpiralMap;
use crate::movement::{Movement, MovementPhase, StepOutcome};
use crate::placement::{PlacementKind, PlacementLayer};
use crate::plan::MovementPlan;

/// Result of a cast action.
#[derive(Debug, Clone, PartialEq)]
pub enum CastOutcome {
    /// A plan was committed and is ready to step
    PlanReady(Reading),
    /// Earthly and heavenly resolved to the same hexagram; no plan
    Degenerate(Reading),
    /// The reading is parked until the user confirms a choice
    Held(Reading),
    /// A previous plan is still in flight
    Busy,
}

/// Result of a drain action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The plan drained to empty
    Drained { steps: usize },
    /// Another drain is already running
    AlreadyDraining,
    /// Nothing to drain
    Empty,
}

/// A trigram scattered onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrigramHex {
    pub trigram: Trigram,
    pub hex: CubePos,
}

/// The engine behind the action surface.
pub struct Engine {
    config: EngineConfig,
    grid: SpiralGrid,
    map: SpiralMap,
    known_gates: BTreeSet<u32>,
    rng: SmallRng,

    actor: CubeCoord,
    movement: Movement,
    counters: Counters,
    cycle: CycleTracker,
    placements: PlacementLayer,
    trigram_hexes: Vec<TrigramHex>,
    selected: Option<CubePos>,
    pending_reading: Option<Reading>,
    current_reading: Option<Reading>,
    listening: bool,
    draining: bool,
    game_started_at: Option<u64>,

    events: Vec<Event>,
    next_sequence: u64,
    snapshot_sequence: u64,
}

impl Engine {
    /// Builds an engine from configuration with an empty spiral map.
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        let grid = SpiralGrid::build(config.grid.radius);
        let listening = config.behavior.listening;
        Self {
            config,
            grid,
            map: SpiralMap::new(),
            known_gates: BTreeSet::new(),
            rng: SmallRng::seed_from_u64(seed),
            actor: CubeCoord::ORIGIN,
            movement: Movement::new(),
            counters: Counters::new(),
            cycle: CycleTracker::new(),
            placements: PlacementLayer::new(),
            trigram_hexes: Vec::new(),
            selected: None,
            pending_reading: None,
            current_reading: None,
            listening,
            draining: false,
            game_started_at: None,
            events: Vec::new(),
            next_sequence: 0,
            snapshot_sequence: 0,
        }
    }

    /// Builds an engine with default configuration.
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(EngineConfig::default(), seed)
    }

    /// Installs persisted map data and refreshes the known-gate set.
    pub fn set_map(&mut self, map: SpiralMap) {
        self.known_gates = map.aspect_gates();
        self.map = map;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &SpiralGrid {
        &self.grid
    }

    pub fn map(&self) -> &SpiralMap {
        &self.map
    }

    pub fn known_gates(&self) -> &BTreeSet<u32> {
        &self.known_gates
    }

    pub fn actor(&self) -> CubeCoord {
        self.actor
    }

    pub fn phase(&self) -> MovementPhase {
        self.movement.phase()
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn visited_gates(&self) -> &BTreeSet<u32> {
        self.cycle.visited()
    }

    pub fn selected(&self) -> Option<CubePos> {
        self.selected
    }

    pub fn current_reading(&self) -> Option<&Reading> {
        self.current_reading.as_ref()
    }

    pub fn remaining_steps(&self) -> usize {
        self.movement.plan().len()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    pub fn trigram_hexes(&self) -> &[TrigramHex] {
        &self.trigram_hexes
    }

    fn push_event(&mut self, detail: EventDetail) {
        self.next_sequence += 1;
        self.events.push(Event::new(self.next_sequence, detail));
    }

    /// Takes everything emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // --- casting ---

    /// Casts a new reading. With the listening flag set the reading is
    /// held until `confirm_cast_choice`; otherwise it commits straight
    /// to a movement plan.
    pub fn cast_reading(&mut self) -> CastOutcome {
        let cast = Cast::generate(&mut self.rng);
        self.apply_cast(cast)
    }

    /// Runs a concrete cast through derivation and plan commitment.
    pub fn apply_cast(&mut self, cast: Cast) -> CastOutcome {
        if self.movement.phase() != MovementPhase::Idle || !self.movement.plan().is_empty() {
            return CastOutcome::Busy;
        }

        let reading = Reading::derive(&cast);
        self.push_event(EventDetail::ReadingCast {
            lines: cast.values().to_vec(),
            earthly: reading.earthly.clone(),
            heavenly: reading.heavenly.clone(),
            changing_lines: reading.changing_lines.clone(),
        });

        if reading.is_degenerate() {
            // A still reading produces no movement; the current cell
            // becomes the focus instead.
            self.push_event(EventDetail::ReadingDegenerate {
                hexagram: reading.earthly.clone(),
            });
            self.select_cell(Some(self.actor.to_pos()));
            self.current_reading = Some(reading.clone());
            return CastOutcome::Degenerate(reading);
        }

        if self.listening {
            self.push_event(EventDetail::ReadingHeld {
                changing_lines: reading.changing_lines.clone(),
            });
            self.pending_reading = Some(reading.clone());
            return CastOutcome::Held(reading);
        }

        self.commit_reading(reading.clone());
        CastOutcome::PlanReady(reading)
    }

    /// Commits a held reading after the user's choice. Returns false
    /// when nothing was pending.
    pub fn confirm_cast_choice(&mut self) -> bool {
        match self.pending_reading.take() {
            Some(reading) => {
                self.listening = false;
                self.commit_reading(reading);
                true
            }
            None => false,
        }
    }

    fn commit_reading(&mut self, reading: Reading) {
        let plan = MovementPlan::from_changing_lines(&reading.changing_lines);
        self.movement.begin(plan, self.actor);
        self.current_reading = Some(reading);
    }

    // --- stepping ---

    /// Executes one step of the plan. Synchronous and atomic; a fall
    /// leaves the machine in `Falling` for the caller or the async
    /// wrappers to settle.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = self
            .movement
            .step(&mut self.actor, &self.grid, &self.map, &mut self.cycle);
        match outcome {
            StepOutcome::NoPlan => {}
            StepOutcome::Advanced {
                from,
                to,
                direction,
                gate,
                plan_complete,
            } => {
                self.push_event(EventDetail::StepTaken {
                    from: from.to_pos(),
                    to: to.to_pos(),
                    direction: direction.index(),
                    remaining: self.movement.plan().len(),
                });
                if let Some(crossing) = gate {
                    self.push_event(EventDetail::GateCrossed {
                        spiral_index: crossing.spiral_index,
                        gate: crossing.gate,
                    });
                }
                if plan_complete {
                    self.push_event(EventDetail::PlanCompleted {
                        gate_visited: self.movement.gate_visited(),
                    });
                    self.resolve_reading_end();
                }
            }
            StepOutcome::Fell {
                from, attempted, ..
            } => {
                self.push_event(EventDetail::FellOffGrid {
                    from: from.to_pos(),
                    attempted: attempted.to_pos(),
                });
                let (jing_from, jing_to) = self.counters.lose_jing();
                if jing_from != jing_to {
                    self.push_event(EventDetail::JingChanged {
                        from: jing_from,
                        to: jing_to,
                        cause: ResourceCause::Fall,
                    });
                }
                self.resolve_reading_end();
            }
        }
        outcome
    }

    fn resolve_reading_end(&mut self) {
        let resolution = resolve_reading_end(
            &mut self.counters,
            &mut self.cycle,
            self.movement.gate_visited(),
            &self.known_gates,
        );

        if let Some((from, to)) = resolution.gate_bonus {
            if from != to {
                self.push_event(EventDetail::QiChanged {
                    from,
                    to,
                    cause: ResourceCause::GateBonus,
                });
            }
            self.select_cell(Some(self.actor.to_pos()));
        }
        if let Some(remaining) = resolution.interval_remaining {
            self.push_event(EventDetail::IntervalTicked { remaining });
        }
        if let Some((from, to)) = resolution.interval_penalty {
            if from != to {
                self.push_event(EventDetail::QiChanged {
                    from,
                    to,
                    cause: ResourceCause::IntervalPenalty,
                });
            }
        }
        if let Some((from, to)) = resolution.depletion_penalty {
            if from != to {
                self.push_event(EventDetail::JingChanged {
                    from,
                    to,
                    cause: ResourceCause::Depletion,
                });
            }
        }
        if let Some((from, to)) = resolution.cycle_bonus {
            self.push_event(EventDetail::CycleCompleted {
                gates: resolution.completed_gates.clone(),
            });
            if from != to {
                self.push_event(EventDetail::JingChanged {
                    from,
                    to,
                    cause: ResourceCause::CycleBonus,
                });
            }
        }

        if self.config.behavior.auto_mode {
            self.reset();
        }
    }

    /// Completes a fall: the actor resets to the origin.
    pub fn settle_fall(&mut self) {
        if self.movement.phase() == MovementPhase::Falling {
            self.movement.settle_fall(&mut self.actor);
            self.push_event(EventDetail::Respawned {
                at: self.actor.to_pos(),
            });
        }
    }

    /// Ends the respawn window.
    pub fn settle_respawn(&mut self) {
        self.movement.settle_respawn();
    }

    async fn settle_fall_after_windows(&mut self) {
        tokio::time::sleep(Duration::from_millis(self.config.pacing.fall_ms)).await;
        self.settle_fall();
        tokio::time::sleep(Duration::from_millis(self.config.pacing.respawn_ms)).await;
        self.settle_respawn();
    }

    /// Executes one step and, when it falls, walks the fall and respawn
    /// windows so the phase ordering stays observable.
    pub async fn advance_one_step(&mut self) -> StepOutcome {
        let outcome = self.step();
        if matches!(outcome, StepOutcome::Fell { .. }) {
            self.settle_fall_after_windows().await;
        }
        outcome
    }

    /// Drains the plan one step at a time with the configured pacing.
    /// A second drain while one runs is a no-op, and the plan length is
    /// re-checked before every step so a reset during the drain is
    /// honored before the next step fires.
    pub async fn advance_all(&mut self) -> DrainOutcome {
        if self.draining {
            return DrainOutcome::AlreadyDraining;
        }
        if self.movement.plan().is_empty() {
            return DrainOutcome::Empty;
        }

        self.draining = true;
        let mut steps = 0usize;
        while !self.movement.plan().is_empty() {
            let outcome = self.step();
            steps += 1;
            if matches!(outcome, StepOutcome::Fell { .. }) {
                self.settle_fall_after_windows().await;
                break;
            }
            if self.movement.plan().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(self.config.pacing.step_ms)).await;
        }
        self.draining = false;
        DrainOutcome::Drained { steps }
    }

    // --- other actions ---

    /// Clears cast and plan state. The actor position and counters
    /// persist; an in-flight fall still settles on its own.
    pub fn reset(&mut self) {
        self.movement.clear();
        self.pending_reading = None;
        self.current_reading = None;
        self.listening = false;
    }

    /// Unconditional clamped Qi gain from external sensory
    /// collaborators.
    pub fn charge_qi(&mut self) {
        let (from, to) = self.counters.gain_qi();
        if from != to {
            self.push_event(EventDetail::QiChanged {
                from,
                to,
                cause: ResourceCause::Charge,
            });
        }
    }

    /// Gates the next cast behind a user choice.
    pub fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }

    pub fn select_cell(&mut self, at: Option<CubePos>) {
        self.selected = at;
        self.push_event(EventDetail::CellSelected { at });
    }

    pub fn place_item(&mut self, at: CubePos, kind: PlacementKind, item: impl Into<String>) {
        let item = item.into();
        self.placements.place(at, kind, item.clone());
        self.push_event(EventDetail::ItemPlaced {
            at,
            category: kind.as_str().to_string(),
            item,
        });
    }

    /// Scatters the eight trigrams over distinct non-center cells.
    pub fn cast_trigrams(&mut self) -> &[TrigramHex] {
        let mut available: Vec<CubePos> = self
            .grid
            .cells()
            .iter()
            .filter(|cell| cell.index != 0)
            .map(|cell| cell.coord.to_pos())
            .collect();
        let mut placed = Vec::new();
        for trigram in Trigram::ALL {
            if available.is_empty() {
                break;
            }
            let pick = self.rng.gen_range(0..available.len());
            let hex = available.swap_remove(pick);
            placed.push(TrigramHex { trigram, hex });
        }
        self.trigram_hexes = placed;
        &self.trigram_hexes
    }

    /// Records the session clock start. Informational only; persisting
    /// the value belongs to the calling collaborator.
    pub fn start_game_clock(&mut self, now_ms: u64) {
        self.game_started_at = Some(now_ms);
        self.push_event(EventDetail::ClockStarted { at_ms: now_ms });
    }

    /// Installs a previously persisted clock value.
    pub fn set_game_clock(&mut self, started_at: Option<u64>) {
        self.game_started_at = started_at;
    }

    // --- snapshots ---

    pub fn snapshot(&mut self, reason: &str) -> EngineSnapshot {
        self.snapshot_sequence += 1;
        EngineSnapshot {
            snapshot_id: generate_snapshot_id(self.snapshot_sequence),
            reason: reason.to_string(),
            actor: self.actor.to_pos(),
            phase: self.movement.phase().as_str().to_string(),
            qi: self.counters.qi,
            jing: self.counters.jing,
            consulting_interval: self.counters.consulting_interval,
            remaining_plan: self.movement.plan().direction_indices(),
            highlighted: self
                .movement
                .highlighted()
                .iter()
                .map(|coord| coord.to_pos())
                .collect(),
            visited_gates: self.cycle.visited().iter().copied().collect(),
            selected: self.selected,
            listening: self.listening,
            draining: self.draining,
            game_started_at: self.game_started_at,
            placements: self
                .placements
                .iter()
                .map(|(at, placement)| PlacementSnapshot {
                    at: *at,
                    kind: placement.kind.as_str().to_string(),
                    item: placement.item.clone(),
                })
                .collect(),
        }
    }
}
