//! Shared event and snapshot types for the oracle-walk engine.
//!
//! This crate contains pure data structures with no engine logic.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod pos;
pub mod snapshot;

// Re-export coordinate type
pub use pos::CubePos;

// Re-export event types
pub use event::{generate_event_id, Event, EventDetail, EventType, ResourceCause};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, EngineSnapshot, PlacementSnapshot};
