//! Engine state management.
//!
//! Owns the immutable map for the process lifetime and runs one decision
//! cycle per turn: validate the referee's report into a snapshot, plan,
//! encode, write. The engine keeps no per-turn state; everything mutable
//! lives in the snapshot and dies with the turn.

use std::io::Write;

use crate::board::map::{MapError, MapModel};
use crate::board::state::{SnapshotError, TurnReport, TurnSnapshot};
use crate::plan;
use crate::protocol::encode::format_actions;
use crate::protocol::input::MapSetup;

/// Errors raised during a decision cycle.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("write to referee failed")]
    Io(#[from] std::io::Error),
}

/// Holds the map for the lifetime of the process.
pub struct Engine {
    map: MapModel,
}

impl Engine {
    /// Builds the engine from the referee's setup block.
    pub fn from_setup(setup: &MapSetup) -> Result<Engine, MapError> {
        let map = MapModel::build(
            &setup.regions,
            &setup.fields,
            &setup.connections,
            setup.priority,
        )?;
        Ok(Engine { map })
    }

    /// The immutable map this engine plays on.
    pub fn map(&self) -> &MapModel {
        &self.map
    }

    /// Runs one full decision cycle and writes the action line.
    pub fn handle_turn<W: Write>(&self, report: &TurnReport, out: &mut W) -> Result<(), EngineError> {
        let snap = TurnSnapshot::from_report(&self.map, report)?;
        let actions = plan::decide(&self.map, &snap);
        writeln!(out, "{}", format_actions(&actions))?;
        out.flush()?;
        Ok(())
    }
}
