//! Persisted actor coordinate.

use serde::{Deserialize, Serialize};

/// Axial coordinate pair as persisted. The third cube axis is derived,
/// so only `q` and `r` travel over the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubePos {
    pub q: i32,
    pub r: i32,
}

impl CubePos {
    /// The grid center, where the actor respawns.
    pub const ORIGIN: CubePos = CubePos { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Derived third cube axis.
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_axis_closes_the_sum() {
        let pos = CubePos::new(3, -5);
        assert_eq!(pos.q + pos.r + pos.s(), 0);
        assert_eq!(CubePos::ORIGIN.s(), 0);
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_string(&CubePos::new(-2, 4)).unwrap();
        assert_eq!(json, r#"{"q":-2,"r":4}"#);
    }
}
