//! Per-turn game state.
//!
//! Holds the snapshot of ownership and troop counts the referee reports at
//! the start of each turn. A snapshot is rebuilt from scratch every turn
//! and discarded once the actions are emitted; the only state carried
//! across turns is the immutable map.

use super::map::{FieldId, MapModel};

/// Field ownership from this engine's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Neutral,
    Me,
    Enemy,
}

impl Owner {
    /// Parses the wire code (0 neutral, 1 me, 2 enemy).
    pub fn from_code(code: u32) -> Option<Owner> {
        match code {
            0 => Some(Owner::Neutral),
            1 => Some(Owner::Me),
            2 => Some(Owner::Enemy),
            _ => None,
        }
    }

    /// Returns the wire code for this owner.
    pub const fn code(self) -> u32 {
        match self {
            Owner::Neutral => 0,
            Owner::Me => 1,
            Owner::Enemy => 2,
        }
    }
}

/// The phase of the current turn, as announced by the referee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    ChooseStartingFields,
    DeployTroops,
    MoveTroops,
}

impl TurnPhase {
    /// Parses the wire name of a turn phase.
    pub fn from_name(name: &str) -> Option<TurnPhase> {
        match name {
            "CHOOSE_STARTING_FIELDS" => Some(TurnPhase::ChooseStartingFields),
            "DEPLOY_TROOPS" => Some(TurnPhase::DeployTroops),
            "MOVE_TROOPS" => Some(TurnPhase::MoveTroops),
            _ => None,
        }
    }

    /// Returns the wire name of this turn phase.
    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::ChooseStartingFields => "CHOOSE_STARTING_FIELDS",
            TurnPhase::DeployTroops => "DEPLOY_TROOPS",
            TurnPhase::MoveTroops => "MOVE_TROOPS",
        }
    }
}

/// Errors raised when a turn report does not fit the map.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("turn lists {got} fields but the map has {expected}")]
    InvalidState { expected: usize, got: usize },

    #[error("turn references unknown field id: {0}")]
    UnknownField(FieldId),

    #[error("turn lists field id {0} more than once")]
    DuplicateField(FieldId),
}

/// One turn of referee input, before it is checked against the map.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub phase: TurnPhase,
    pub my_fields: u32,
    pub enemy_fields: u32,
    pub deployable: u32,
    pub enemy_deployable: u32,
    pub picks_left: u32,
    pub enemy_picks_left: u32,
    pub fields: Vec<(FieldId, u32, Owner)>,
}

/// The validated view of one turn, indexed by map slot.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    pub phase: TurnPhase,
    pub my_fields: u32,
    pub enemy_fields: u32,
    pub deployable: u32,
    pub enemy_deployable: u32,
    pub picks_left: u32,
    pub enemy_picks_left: u32,
    owners: Vec<Owner>,
    troops: Vec<u32>,
}

impl TurnSnapshot {
    /// Validates a turn report against the map and indexes it by slot.
    pub fn from_report(map: &MapModel, report: &TurnReport) -> Result<TurnSnapshot, SnapshotError> {
        if report.fields.len() != map.field_count() {
            return Err(SnapshotError::InvalidState {
                expected: map.field_count(),
                got: report.fields.len(),
            });
        }

        let mut owners = vec![Owner::Neutral; map.field_count()];
        let mut troops = vec![0u32; map.field_count()];
        let mut filled = vec![false; map.field_count()];

        for &(id, count, owner) in &report.fields {
            let slot = map
                .slot_of(id)
                .map_err(|_| SnapshotError::UnknownField(id))?;
            if filled[slot] {
                return Err(SnapshotError::DuplicateField(id));
            }
            filled[slot] = true;
            owners[slot] = owner;
            troops[slot] = count;
        }

        Ok(TurnSnapshot {
            phase: report.phase,
            my_fields: report.my_fields,
            enemy_fields: report.enemy_fields,
            deployable: report.deployable,
            enemy_deployable: report.enemy_deployable,
            picks_left: report.picks_left,
            enemy_picks_left: report.enemy_picks_left,
            owners,
            troops,
        })
    }

    /// Owner of the field at a slot.
    pub fn owner(&self, slot: usize) -> Owner {
        self.owners[slot]
    }

    /// Troop count of the field at a slot.
    pub fn troops(&self, slot: usize) -> u32 {
        self.troops[slot]
    }

    /// Slots of all fields with the given owner, in setup order.
    pub fn fields_of(&self, owner: Owner) -> impl Iterator<Item = usize> + '_ {
        self.owners
            .iter()
            .enumerate()
            .filter(move |(_, o)| **o == owner)
            .map(|(slot, _)| slot)
    }
}
