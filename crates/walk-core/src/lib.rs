//! Divination-driven hex-grid movement engine.
//!
//! A stochastic oracle cast becomes a directional movement plan, which
//! is replayed step by step over a fixed spiral-addressed hex grid
//! while a bounded Qi/Jing economy reacts to the path taken.

pub mod cast;
pub mod config;
pub mod economy;
pub mod grid;
pub mod hexagrams;
pub mod logger;
pub mod map_data;
pub mod movement;
pub mod placement;
pub mod plan;
pub mod store;

pub use cast::{toss_coins, Cast, CastLine, Reading};
pub use config::{default_config_toml, ConfigError, EngineConfig};
pub use economy::{resolve_reading_end, Counters, CycleTracker};
pub use grid::{
    max_index_for_radius, pixel_to_cube, to_pixel, CubeCoord, Direction, GridCell, SpiralGrid,
};
pub use logger::EventLogger;
pub use map_data::{CellTag, SpiralMap, TagSource};
pub use movement::{GateCrossing, Movement, MovementPhase, StepOutcome};
pub use placement::{Placement, PlacementKind, PlacementLayer};
pub use plan::{line_direction, MovementPlan};
pub use store::{CastOutcome, DrainOutcome, Engine, TrigramHex};
