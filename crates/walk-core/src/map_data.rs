//! Persisted spiral-map cell tags.
//!
//! Collaborators persist a sparse map from spiral index to a gate tag.
//! Absent or malformed data degrades to an empty map; the engine never
//! fails over it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Provenance of a cell tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagSource {
    Aspect,
    Intermediate,
}

/// Tag carried by one spiral index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTag {
    pub gate: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<TagSource>,
}

impl CellTag {
    /// Only aspect-tagged cells feed the gate economy.
    pub fn is_aspect(&self) -> bool {
        self.source == Some(TagSource::Aspect)
    }
}

/// Sparse spiral-index -> tag map loaded once per session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpiralMap {
    entries: HashMap<u32, CellTag>,
}

impl SpiralMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, CellTag)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parses the persisted entry array
    /// `[{"index": 12, "gate": 25, "source": "aspect"}, ...]`.
    /// Entries without a numeric index and gate are skipped; anything
    /// unparseable degrades to an empty map.
    pub fn from_json_str(content: &str) -> SpiralMap {
        let values: Vec<serde_json::Value> = match serde_json::from_str(content) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Failed to parse spiral map data: {}", e);
                return SpiralMap::default();
            }
        };

        let mut entries = HashMap::new();
        for value in values {
            let Some(index) = value.get("index").and_then(|v| v.as_u64()) else {
                continue;
            };
            let Some(gate) = value.get("gate").and_then(|v| v.as_u64()) else {
                continue;
            };
            let source = value
                .get("source")
                .and_then(|v| v.as_str())
                .and_then(|s| match s {
                    "aspect" => Some(TagSource::Aspect),
                    "intermediate" => Some(TagSource::Intermediate),
                    _ => None,
                });
            entries.insert(
                index as u32,
                CellTag {
                    gate: gate as u32,
                    source,
                },
            );
        }
        SpiralMap { entries }
    }

    /// Loads from a file. A missing or unreadable file degrades to an
    /// empty map.
    pub fn load(path: &Path) -> SpiralMap {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_json_str(&content),
            Err(e) => {
                tracing::warn!(
                    "Failed to read spiral map data from {}: {}",
                    path.display(),
                    e
                );
                SpiralMap::default()
            }
        }
    }

    pub fn get(&self, index: u32) -> Option<&CellTag> {
        self.entries.get(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of every gate tagged as an aspect gate.
    pub fn aspect_gates(&self) -> BTreeSet<u32> {
        self.entries
            .values()
            .filter(|tag| tag.is_aspect())
            .map(|tag| tag.gate)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_entries() {
        let map = SpiralMap::from_json_str(
            r#"[
                {"index": 1, "gate": 41, "source": "aspect"},
                {"index": 2, "gate": 19, "source": "intermediate"},
                {"index": 10, "gate": 7}
            ]"#,
        );
        assert_eq!(map.len(), 3);
        assert!(map.get(1).unwrap().is_aspect());
        assert!(!map.get(2).unwrap().is_aspect());
        assert_eq!(map.get(10).unwrap().source, None);
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        assert!(SpiralMap::from_json_str("not json at all").is_empty());
        assert!(SpiralMap::from_json_str(r#"{"index": 1}"#).is_empty());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let map = SpiralMap::from_json_str(
            r#"[
                {"index": "three", "gate": 41},
                {"gate": 41},
                {"index": 4},
                {"index": 5, "gate": 13, "source": "mystery"},
                {"index": 6, "gate": 2, "source": "aspect"}
            ]"#,
        );
        assert_eq!(map.len(), 2);
        // An unknown source string degrades to an untagged entry
        assert_eq!(map.get(5).unwrap().source, None);
        assert!(map.get(6).unwrap().is_aspect());
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let map = SpiralMap::load(Path::new("no/such/file.json"));
        assert!(map.is_empty());
    }

    #[test]
    fn test_aspect_gate_set() {
        let map = SpiralMap::from_entries([
            (
                1,
                CellTag {
                    gate: 41,
                    source: Some(TagSource::Aspect),
                },
            ),
            (
                3,
                CellTag {
                    gate: 13,
                    source: Some(TagSource::Aspect),
                },
            ),
            (
                5,
                CellTag {
                    gate: 19,
                    source: Some(TagSource::Intermediate),
                },
            ),
        ]);
        let gates: Vec<u32> = map.aspect_gates().into_iter().collect();
        assert_eq!(gates, vec![13, 41]);
    }
}
