//! Bounded Qi/Jing counters and end-of-reading resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed economy bounds.
pub mod economy_constants {
    /// Upper clamp for both counters
    pub const COUNTER_MAX: u8 = 3;
    /// Readings between interval penalties
    pub const CONSULTING_INTERVAL: u8 = 6;
    /// Starting Qi
    pub const INITIAL_QI: u8 = 3;
    /// Starting Jing
    pub const INITIAL_JING: u8 = 3;
}

use economy_constants::*;

fn raise(value: u8) -> u8 {
    (value + 1).min(COUNTER_MAX)
}

fn lower(value: u8) -> u8 {
    value.saturating_sub(1)
}

/// The two bounded counters plus the consulting-interval countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub qi: u8,
    pub jing: u8,
    pub consulting_interval: u8,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            qi: INITIAL_QI,
            jing: INITIAL_JING,
            consulting_interval: CONSULTING_INTERVAL,
        }
    }
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamped increment; returns (before, after).
    pub fn gain_qi(&mut self) -> (u8, u8) {
        let from = self.qi;
        self.qi = raise(from);
        (from, self.qi)
    }

    pub fn lose_qi(&mut self) -> (u8, u8) {
        let from = self.qi;
        self.qi = lower(from);
        (from, self.qi)
    }

    pub fn gain_jing(&mut self) -> (u8, u8) {
        let from = self.jing;
        self.jing = raise(from);
        (from, self.jing)
    }

    pub fn lose_jing(&mut self) -> (u8, u8) {
        let from = self.jing;
        self.jing = lower(from);
        (from, self.jing)
    }
}

/// Per-cycle record of visited aspect gates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleTracker {
    visited: BTreeSet<u32>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, gate: u32) {
        self.visited.insert(gate);
    }

    pub fn visited(&self) -> &BTreeSet<u32> {
        &self.visited
    }

    /// True when every gate of a non-empty set has been visited.
    pub fn covers(&self, gates: &BTreeSet<u32>) -> bool {
        !gates.is_empty() && gates.iter().all(|gate| self.visited.contains(gate))
    }

    pub fn reset(&mut self) {
        self.visited.clear();
    }
}

/// Which branches fired during end-of-reading resolution. Each field
/// carries the (before, after) counter values where a counter moved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingResolution {
    /// Qi change from crossing an aspect gate during the plan
    pub gate_bonus: Option<(u8, u8)>,
    /// Interval value after a tick that did not expire
    pub interval_remaining: Option<u8>,
    /// Qi change from interval expiry
    pub interval_penalty: Option<(u8, u8)>,
    /// Jing change when Qi sits at zero after the penalty
    pub depletion_penalty: Option<(u8, u8)>,
    /// Jing change from covering every known gate
    pub cycle_bonus: Option<(u8, u8)>,
    /// Gates making up the completed cycle
    pub completed_gates: Vec<u32>,
}

/// End-of-reading resolution, invoked exactly once when a plan fully
/// drains, whether by natural completion or a fall.
pub fn resolve_reading_end(
    counters: &mut Counters,
    cycle: &mut CycleTracker,
    gate_visited: bool,
    known_gates: &BTreeSet<u32>,
) -> ReadingResolution {
    let mut resolution = ReadingResolution::default();

    if gate_visited {
        resolution.gate_bonus = Some(counters.gain_qi());
    } else {
        counters.consulting_interval = counters.consulting_interval.saturating_sub(1);
        if counters.consulting_interval == 0 {
            resolution.interval_penalty = Some(counters.lose_qi());
            counters.consulting_interval = CONSULTING_INTERVAL;
            if counters.qi == 0 {
                resolution.depletion_penalty = Some(counters.lose_jing());
            }
        } else {
            resolution.interval_remaining = Some(counters.consulting_interval);
        }
    }

    // Full-cycle completion is independent of the branch above.
    if cycle.covers(known_gates) {
        resolution.completed_gates = known_gates.iter().copied().collect();
        resolution.cycle_bonus = Some(counters.gain_jing());
        cycle.reset();
    }

    resolution
}
