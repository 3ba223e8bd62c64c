//! Event Types
//!
//! Typed records of everything the engine does: casts, steps, falls,
//! resource changes. Events are append-only data consumed by logging
//! and rendering collaborators.

use serde::{Deserialize, Serialize};

use crate::pos::CubePos;

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}

/// Primary event type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Cast,
    Movement,
    Gate,
    Resource,
    Placement,
    Session,
}

/// Why a resource counter changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCause {
    /// An aspect gate was crossed during the plan
    GateBonus,
    /// The consulting interval ran out
    IntervalPenalty,
    /// Qi landed on zero after an interval penalty
    Depletion,
    /// The actor fell off the grid
    Fall,
    /// Every known aspect gate was visited
    CycleBonus,
    /// External charge action
    Charge,
}

/// Event payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    /// A six-line reading was cast
    ReadingCast {
        /// Line values bottom to top, each in {6,7,8,9}
        lines: Vec<u8>,
        earthly: String,
        heavenly: String,
        changing_lines: Vec<u8>,
    },
    /// Earthly and heavenly resolved to the same hexagram; no plan
    ReadingDegenerate { hexagram: String },
    /// The reading is parked until the user confirms a choice
    ReadingHeld { changing_lines: Vec<u8> },
    /// One step of the plan was executed
    StepTaken {
        from: CubePos,
        to: CubePos,
        /// Direction index 0-5
        direction: u8,
        remaining: usize,
    },
    /// The step landed on an aspect-tagged cell
    GateCrossed { spiral_index: u32, gate: u32 },
    /// The step left the addressable grid
    FellOffGrid { from: CubePos, attempted: CubePos },
    /// The actor was reset to the origin after a fall
    Respawned { at: CubePos },
    /// The plan drained to empty
    PlanCompleted { gate_visited: bool },
    QiChanged { from: u8, to: u8, cause: ResourceCause },
    JingChanged { from: u8, to: u8, cause: ResourceCause },
    /// The consulting interval counted down without expiring
    IntervalTicked { remaining: u8 },
    /// Every known aspect gate was visited at least once
    CycleCompleted { gates: Vec<u32> },
    CellSelected { at: Option<CubePos> },
    ItemPlaced { at: CubePos, category: String, item: String },
    ClockStarted { at_ms: u64 },
}

impl EventDetail {
    /// The category this payload belongs to.
    pub fn event_type(&self) -> EventType {
        match self {
            EventDetail::ReadingCast { .. }
            | EventDetail::ReadingDegenerate { .. }
            | EventDetail::ReadingHeld { .. } => EventType::Cast,
            EventDetail::StepTaken { .. }
            | EventDetail::FellOffGrid { .. }
            | EventDetail::Respawned { .. }
            | EventDetail::PlanCompleted { .. } => EventType::Movement,
            EventDetail::GateCrossed { .. } | EventDetail::CycleCompleted { .. } => EventType::Gate,
            EventDetail::QiChanged { .. }
            | EventDetail::JingChanged { .. }
            | EventDetail::IntervalTicked { .. } => EventType::Resource,
            EventDetail::ItemPlaced { .. } => EventType::Placement,
            EventDetail::CellSelected { .. } | EventDetail::ClockStarted { .. } => {
                EventType::Session
            }
        }
    }
}

/// A single engine event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub sequence: u64,
    pub event_type: EventType,
    #[serde(flatten)]
    pub detail: EventDetail,
}

impl Event {
    /// Builds an event, deriving its ID and category.
    pub fn new(sequence: u64, detail: EventDetail) -> Self {
        Self {
            event_id: generate_event_id(sequence),
            sequence,
            event_type: detail.event_type(),
            detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_format() {
        assert_eq!(generate_event_id(1), "evt_00000001");
        assert_eq!(generate_event_id(42), "evt_00000042");
    }

    #[test]
    fn test_event_type_derived_from_detail() {
        let event = Event::new(
            7,
            EventDetail::GateCrossed {
                spiral_index: 3,
                gate: 13,
            },
        );
        assert_eq!(event.event_type, EventType::Gate);
        assert_eq!(event.event_id, "evt_00000007");
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = Event::new(
            1,
            EventDetail::StepTaken {
                from: CubePos::new(0, 0),
                to: CubePos::new(0, 1),
                direction: 3,
                remaining: 2,
            },
        );

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event_type":"movement""#));
        assert!(json.contains(r#""kind":"step_taken""#));

        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_resource_cause_naming() {
        let json = serde_json::to_string(&ResourceCause::IntervalPenalty).unwrap();
        assert_eq!(json, r#""interval_penalty""#);
    }

    #[test]
    fn test_fall_event_round_trip() {
        let event = Event::new(
            9,
            EventDetail::FellOffGrid {
                from: CubePos::new(0, -5),
                attempted: CubePos::new(0, -6),
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type, EventType::Movement);
        assert_eq!(parsed, event);
    }
}
