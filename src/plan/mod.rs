//! Turn planning.
//!
//! Turns evaluator scores into concrete actions for the current phase:
//! starting-field picks, troop deployment, and troop movement. The planner
//! is a pure function of (map, snapshot); the phase enum makes the
//! dispatch exhaustive at compile time.

pub mod deploy;
pub mod movement;
pub mod pick;

use crate::board::action::Action;
use crate::board::map::MapModel;
use crate::board::state::{TurnPhase, TurnSnapshot};

/// Decides the actions for one turn. Never returns an empty list.
pub fn decide(map: &MapModel, snap: &TurnSnapshot) -> Vec<Action> {
    match snap.phase {
        TurnPhase::ChooseStartingFields => vec![pick::choose(map, snap)],
        TurnPhase::DeployTroops => deploy::deployments(map, snap),
        TurnPhase::MoveTroops => movement::movements(map, snap),
    }
}
