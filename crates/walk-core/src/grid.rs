//! Cube-coordinate hex geometry and the spiral-addressed grid.
//!
//! The grid is defined by a hand-authored spiral layout table, not a
//! formula: a cell exists exactly when its spiral index has a table
//! entry within the radius bound.

use serde::{Deserialize, Serialize};

use walk_events::CubePos;

/// Integer cube coordinate. `q + r + s == 0` holds after every
/// construction path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubeCoord {
    pub const ORIGIN: CubeCoord = CubeCoord { q: 0, r: 0, s: 0 };

    /// Builds from axial components, deriving the third axis.
    pub fn from_axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    pub fn from_pos(pos: CubePos) -> Self {
        Self::from_axial(pos.q, pos.r)
    }

    /// The persisted two-axis form.
    pub fn to_pos(self) -> CubePos {
        CubePos::new(self.q, self.r)
    }

    /// Rounds fractional cube components to the nearest integer
    /// coordinate. When plain rounding breaks the zero-sum invariant,
    /// the component with the largest rounding error is recomputed from
    /// the other two.
    pub fn round(qf: f64, rf: f64, sf: f64) -> Self {
        let mut q = qf.round();
        let mut r = rf.round();
        let mut s = sf.round();
        if q + r + s != 0.0 {
            let q_diff = (q - qf).abs();
            let r_diff = (r - rf).abs();
            let s_diff = (s - sf).abs();
            if q_diff > r_diff && q_diff > s_diff {
                q = -r - s;
            } else if r_diff > s_diff {
                r = -q - s;
            } else {
                s = -q - r;
            }
        }
        Self {
            q: q as i32,
            r: r as i32,
            s: s as i32,
        }
    }

    /// Component-wise sum. Integer inputs make the shared rounding path
    /// exact; it is reused here for uniformity.
    pub fn add(self, other: CubeCoord) -> CubeCoord {
        CubeCoord::round(
            (self.q + other.q) as f64,
            (self.r + other.r) as f64,
            (self.s + other.s) as f64,
        )
    }
}

/// The six hex directions, ordered and indexed 0-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    Northeast,
    Southeast,
    South,
    Southwest,
    Northwest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::Northeast,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::Northwest,
    ];

    /// Position in the canonical direction order.
    pub fn index(self) -> u8 {
        match self {
            Direction::North => 0,
            Direction::Northeast => 1,
            Direction::Southeast => 2,
            Direction::South => 3,
            Direction::Southwest => 4,
            Direction::Northwest => 5,
        }
    }

    pub fn from_index(index: u8) -> Option<Direction> {
        Self::ALL.get(index as usize).copied()
    }

    /// Unit cube offset for one step in this direction.
    pub fn delta(self) -> CubeCoord {
        match self {
            Direction::North => CubeCoord { q: 0, r: -1, s: 1 },
            Direction::Northeast => CubeCoord { q: 1, r: -1, s: 0 },
            Direction::Southeast => CubeCoord { q: 1, r: 0, s: -1 },
            Direction::South => CubeCoord { q: 0, r: 1, s: -1 },
            Direction::Southwest => CubeCoord { q: -1, r: 1, s: 0 },
            Direction::Northwest => CubeCoord { q: -1, r: 0, s: 1 },
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::Northeast => "NE",
            Direction::Southeast => "SE",
            Direction::South => "S",
            Direction::Southwest => "SW",
            Direction::Northwest => "NW",
        }
    }
}

/// Hand-authored spiral layout: spiral index -> axial (q, r).
/// The layout is canonical data; do not derive it from ring formulas.
const SPIRAL_COORDS: [(i32, i32); 91] = [
    (0, 0),
    (-1, 1),
    (0, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-2, 2),
    (-1, 2),
    (0, 2),
    (1, 1),
    (2, 0),
    (2, -1),
    (2, -2),
    (1, -2),
    (0, -2),
    (-1, -1),
    (-2, 0),
    (-2, 1),
    (-3, 3),
    (-2, 3),
    (-1, 3),
    (0, 3),
    (1, 2),
    (2, 1),
    (3, 0),
    (3, -1),
    (3, -2),
    (3, -3),
    (2, -3),
    (1, -3),
    (0, -3),
    (-1, -2),
    (-2, -1),
    (-3, 0),
    (-3, 1),
    (-3, 2),
    (-4, 4),
    (-3, 4),
    (-2, 4),
    (-1, 4),
    (0, 4),
    (1, 3),
    (2, 2),
    (3, 1),
    (4, 0),
    (4, -1),
    (4, -2),
    (4, -3),
    (4, -4),
    (3, -4),
    (2, -4),
    (1, -4),
    (0, -4),
    (-1, -3),
    (-2, -2),
    (-3, -1),
    (-4, 0),
    (-4, 1),
    (-4, 2),
    (-4, 3),
    (-5, 5),
    (-4, 5),
    (-3, 5),
    (-2, 5),
    (-1, 5),
    (0, 5),
    (1, 4),
    (2, 3),
    (3, 2),
    (4, 1),
    (5, 0),
    (5, -1),
    (5, -2),
    (5, -3),
    (5, -4),
    (5, -5),
    (4, -5),
    (3, -5),
    (2, -5),
    (1, -5),
    (0, -5),
    (-1, -4),
    (-2, -3),
    (-3, -2),
    (-4, -1),
    (-5, 0),
    (-5, 1),
    (-5, 2),
    (-5, 3),
    (-5, 4),
];

/// Highest spiral index addressable within `radius` rings.
pub fn max_index_for_radius(radius: u32) -> u32 {
    radius * (radius + 1) * 3
}

/// A grid cell: spiral index plus cube position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub index: u32,
    pub coord: CubeCoord,
}

/// The addressable grid. Cells are exactly the spiral-table entries up
/// to the radius bound; indices with no table entry are simply absent.
#[derive(Debug, Clone)]
pub struct SpiralGrid {
    cells: Vec<GridCell>,
}

impl SpiralGrid {
    pub fn build(radius: u32) -> SpiralGrid {
        let max_index = max_index_for_radius(radius);
        let mut cells = Vec::new();
        for index in 0..=max_index {
            if let Some(&(q, r)) = SPIRAL_COORDS.get(index as usize) {
                cells.push(GridCell {
                    index,
                    coord: CubeCoord::from_axial(q, r),
                });
            }
        }
        SpiralGrid { cells }
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Spiral index of the cell at `coord`, if it is on the grid.
    pub fn index_of(&self, coord: CubeCoord) -> Option<u32> {
        self.cells
            .iter()
            .find(|cell| cell.coord == coord)
            .map(|cell| cell.index)
    }

    pub fn contains(&self, coord: CubeCoord) -> bool {
        self.index_of(coord).is_some()
    }

    pub fn cell_at_index(&self, index: u32) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.index == index)
    }
}

/// Flat-top hex center in pixel space.
pub fn to_pixel(cube: CubeCoord, size: f64) -> (f64, f64) {
    let sqrt3 = 3.0_f64.sqrt();
    let x = size * (1.5 * cube.q as f64);
    let y = size * (sqrt3 / 2.0 * cube.q as f64 + sqrt3 * cube.r as f64);
    (x, y)
}

/// Nearest hex under a pixel position.
pub fn pixel_to_cube(x: f64, y: f64, size: f64) -> CubeCoord {
    let sqrt3 = 3.0_f64.sqrt();
    let q = (2.0 / 3.0 * x) / size;
    let r = (-1.0 / 3.0 * x + sqrt3 / 3.0 * y) / size;
    CubeCoord::round(q, r, -q - r)
}
