//! The step-wise movement state machine.
//!
//! A plan drains one direction at a time against the grid. Landing off
//! the addressable grid is a modeled outcome, not an error: the machine
//! passes through `Falling` and `Respawning` before control returns,
//! and a fall must be observable before the respawn.

use crate::economy::CycleTracker;
use crate::grid::{CubeCoord, Direction, SpiralGrid};
use crate::map_data::SpiralMap;
use crate::plan::MovementPlan;

/// Movement phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPhase {
    Idle,
    Stepping,
    Falling,
    Respawning,
}

impl MovementPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            MovementPhase::Idle => "idle",
            MovementPhase::Stepping => "stepping",
            MovementPhase::Falling => "falling",
            MovementPhase::Respawning => "respawning",
        }
    }
}

/// An aspect-gate crossing observed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateCrossing {
    pub spiral_index: u32,
    pub gate: u32,
}

/// Result of executing one step of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No plan to consume
    NoPlan,
    Advanced {
        from: CubeCoord,
        to: CubeCoord,
        direction: Direction,
        gate: Option<GateCrossing>,
        plan_complete: bool,
    },
    /// The step left the addressable grid
    Fell {
        from: CubeCoord,
        attempted: CubeCoord,
        direction: Direction,
    },
}

/// Plan execution state for the single actor.
#[derive(Debug, Clone)]
pub struct Movement {
    phase: MovementPhase,
    plan: MovementPlan,
    highlighted: Vec<CubeCoord>,
    gate_visited: bool,
}

impl Default for Movement {
    fn default() -> Self {
        Self::new()
    }
}

impl Movement {
    pub fn new() -> Self {
        Self {
            phase: MovementPhase::Idle,
            plan: MovementPlan::default(),
            highlighted: Vec::new(),
            gate_visited: false,
        }
    }

    pub fn phase(&self) -> MovementPhase {
        self.phase
    }

    pub fn plan(&self) -> &MovementPlan {
        &self.plan
    }

    /// Cells the unconsumed plan tail will visit.
    pub fn highlighted(&self) -> &[CubeCoord] {
        &self.highlighted
    }

    /// Whether an aspect gate was crossed during the current plan.
    pub fn gate_visited(&self) -> bool {
        self.gate_visited
    }

    /// Installs a fresh plan. The per-plan gate flag resets here.
    pub fn begin(&mut self, plan: MovementPlan, from: CubeCoord) {
        self.highlighted = replay_path(from, plan.iter());
        self.gate_visited = false;
        self.phase = if plan.is_empty() {
            MovementPhase::Idle
        } else {
            MovementPhase::Stepping
        };
        self.plan = plan;
    }

    /// Executes the head of the plan against the grid.
    pub fn step(
        &mut self,
        actor: &mut CubeCoord,
        grid: &SpiralGrid,
        map: &SpiralMap,
        cycle: &mut CycleTracker,
    ) -> StepOutcome {
        let Some(direction) = self.plan.pop() else {
            return StepOutcome::NoPlan;
        };
        self.phase = MovementPhase::Stepping;
        let from = *actor;
        let target = from.add(direction.delta());

        let Some(index) = grid.index_of(target) else {
            self.plan.clear();
            self.highlighted.clear();
            self.phase = MovementPhase::Falling;
            return StepOutcome::Fell {
                from,
                attempted: target,
                direction,
            };
        };

        *actor = target;
        let gate = map
            .get(index)
            .filter(|tag| tag.is_aspect())
            .map(|tag| GateCrossing {
                spiral_index: index,
                gate: tag.gate,
            });
        if let Some(crossing) = gate {
            self.gate_visited = true;
            cycle.record(crossing.gate);
        }

        // The remaining highlight replays the unconsumed tail forward
        // from the new position.
        self.highlighted = replay_path(target, self.plan.iter());

        let plan_complete = self.plan.is_empty();
        if plan_complete {
            self.phase = MovementPhase::Idle;
        }
        StepOutcome::Advanced {
            from,
            to: target,
            direction,
            gate,
            plan_complete,
        }
    }

    /// Completes a fall: the actor resets to the origin and the respawn
    /// window begins.
    pub fn settle_fall(&mut self, actor: &mut CubeCoord) {
        if self.phase == MovementPhase::Falling {
            *actor = CubeCoord::ORIGIN;
            self.phase = MovementPhase::Respawning;
        }
    }

    /// Ends the respawn window.
    pub fn settle_respawn(&mut self) {
        if self.phase == MovementPhase::Respawning {
            self.phase = MovementPhase::Idle;
        }
    }

    /// Drops any queued steps and highlight without touching the actor.
    /// An in-flight fall still settles through its own transitions.
    pub fn clear(&mut self) {
        self.plan.clear();
        self.highlighted.clear();
        if self.phase == MovementPhase::Stepping {
            self.phase = MovementPhase::Idle;
        }
    }
}

fn replay_path<'a>(
    from: CubeCoord,
    steps: impl Iterator<Item = &'a Direction>,
) -> Vec<CubeCoord> {
    let mut path = Vec::new();
    let mut at = from;
    for direction in steps {
        at = at.add(direction.delta());
        path.push(at);
    }
    path
}
