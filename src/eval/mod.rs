//! Field and region evaluation.
//!
//! Scores fields and regions from the engine's perspective so the planner
//! can rank pick candidates, deployment targets, and move targets.

pub(crate) mod heuristic;

pub use heuristic::{
    best_slot, field_score, frontier_exposure, is_frontier, max_adjacent_enemy_troops,
    region_score, score_fields, score_regions, vulnerability,
};
