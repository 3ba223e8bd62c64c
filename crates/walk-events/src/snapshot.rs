//! Snapshot Types
//!
//! Serialization structs for engine state snapshots, used by rendering
//! and persistence collaborators.

use serde::{Deserialize, Serialize};

use crate::pos::CubePos;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// An item occupying a cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSnapshot {
    pub at: CubePos,
    pub kind: String,
    pub item: String,
}

/// Complete engine state at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub snapshot_id: String,
    pub reason: String,
    pub actor: CubePos,
    pub phase: String,
    pub qi: u8,
    pub jing: u8,
    pub consulting_interval: u8,
    /// Direction indices of the unconsumed plan tail
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remaining_plan: Vec<u8>,
    /// Cells the unconsumed tail will visit
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlighted: Vec<CubePos>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub visited_gates: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<CubePos>,
    #[serde(default)]
    pub listening: bool,
    #[serde(default)]
    pub draining: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_started_at: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placements: Vec<PlacementSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_snapshot_json() -> &'static str {
        r#"{
            "snapshot_id": "snap_000001",
            "reason": "reading_end",
            "actor": {"q": 0, "r": 1},
            "phase": "idle",
            "qi": 3,
            "jing": 2,
            "consulting_interval": 5
        }"#
    }

    #[test]
    fn test_snapshot_id_format() {
        assert_eq!(generate_snapshot_id(3), "snap_000003");
    }

    #[test]
    fn test_optional_fields_default() {
        let snapshot: EngineSnapshot = serde_json::from_str(minimal_snapshot_json()).unwrap();
        assert!(snapshot.remaining_plan.is_empty());
        assert!(snapshot.highlighted.is_empty());
        assert!(snapshot.visited_gates.is_empty());
        assert!(snapshot.selected.is_none());
        assert!(!snapshot.listening);
        assert!(!snapshot.draining);
        assert!(snapshot.game_started_at.is_none());
        assert!(snapshot.placements.is_empty());
    }

    #[test]
    fn test_empty_collections_not_serialized() {
        let snapshot: EngineSnapshot = serde_json::from_str(minimal_snapshot_json()).unwrap();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("remaining_plan"));
        assert!(!json.contains("placements"));
        assert!(json.contains(r#""phase":"idle""#));
    }
}
