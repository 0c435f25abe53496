//! In-process self-play rules.
//!
//! Implements the referee's game rules (combat, per-turn economy,
//! starting-field priority, and the match loop) so two planner instances
//! can play full games without an external referee. Used by the `selfplay`
//! binary and integration-level tests; the per-turn engine path never
//! touches this module.

pub mod combat;
pub mod economy;
pub mod game;
pub mod mapgen;

pub use game::{play_match, MatchOutcome, Player, SimError};
pub use mapgen::{starting_picks, symmetric_map, GeneratedMap};
