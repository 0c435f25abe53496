//! Map and game-state types.
//!
//! Contains the core data structures for fields, regions, turn snapshots,
//! and the action vocabulary.

pub mod action;
pub mod map;
pub mod state;

pub use action::Action;
pub use map::{Field, FieldId, MapError, MapModel, PriorityHalf, Region, RegionId};
pub use state::{Owner, SnapshotError, TurnPhase, TurnReport, TurnSnapshot};
