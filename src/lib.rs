//! Hegemon engine library.
//!
//! Exposes the map representation, turn snapshot, evaluator, planner,
//! protocol, and self-play modules for use by integration tests and the
//! binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod plan;
pub mod protocol;
pub mod selfplay;
pub mod sim;
