//! Cell placements.
//!
//! One item occupies a cell at a time; placing onto an occupied cell
//! replaces the previous item regardless of kind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use walk_events::CubePos;

/// Category of a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    Environment,
    Object,
    Furniture,
    Structure,
}

impl PlacementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementKind::Environment => "environment",
            PlacementKind::Object => "object",
            PlacementKind::Furniture => "furniture",
            PlacementKind::Structure => "structure",
        }
    }
}

/// An item occupying a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PlacementKind,
    pub item: String,
}

/// Placement registry keyed by cell.
#[derive(Debug, Clone, Default)]
pub struct PlacementLayer {
    items: HashMap<CubePos, Placement>,
}

impl PlacementLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an item, returning whatever it displaced.
    pub fn place(
        &mut self,
        at: CubePos,
        kind: PlacementKind,
        item: impl Into<String>,
    ) -> Option<Placement> {
        self.items.insert(
            at,
            Placement {
                kind,
                item: item.into(),
            },
        )
    }

    pub fn remove(&mut self, at: CubePos) -> Option<Placement> {
        self.items.remove(&at)
    }

    pub fn get(&self, at: CubePos) -> Option<&Placement> {
        self.items.get(&at)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CubePos, &Placement)> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_get() {
        let mut layer = PlacementLayer::new();
        let at = CubePos::new(1, -1);
        assert!(layer.place(at, PlacementKind::Object, "bell").is_none());
        assert_eq!(layer.get(at).unwrap().item, "bell");
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_new_kind_replaces_old() {
        let mut layer = PlacementLayer::new();
        let at = CubePos::new(0, 2);
        layer.place(at, PlacementKind::Furniture, "mat");
        let displaced = layer.place(at, PlacementKind::Environment, "garden");
        assert_eq!(displaced.unwrap().kind, PlacementKind::Furniture);
        assert_eq!(layer.get(at).unwrap().kind, PlacementKind::Environment);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut layer = PlacementLayer::new();
        let at = CubePos::new(-2, 0);
        layer.place(at, PlacementKind::Structure, "shrine");
        assert!(layer.remove(at).is_some());
        assert!(layer.is_empty());
    }
}
