//! Referee input parsing.
//!
//! The referee writes whitespace-delimited integers and keywords over
//! newline-framed text. A token scanner over `BufRead` consumes them: one
//! setup block at startup describing the map, then one turn block per
//! decision cycle. Token boundaries never carry meaning beyond separation,
//! so lines and spaces are treated alike.

use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use crate::board::map::{FieldId, PriorityHalf, RegionId};
use crate::board::state::{Owner, TurnPhase, TurnReport};

/// Errors raised while consuming referee input.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("read from referee failed")]
    Io(#[from] std::io::Error),

    #[error("input ended in the middle of a block")]
    UnexpectedEof,

    #[error("expected an integer, got '{0}'")]
    InvalidInteger(String),

    #[error("unknown turn type: '{0}'")]
    UnknownTurnType(String),

    #[error("unknown priority marker: '{0}'")]
    UnknownPriority(String),

    #[error("unknown owner code: {0}")]
    UnknownOwnerCode(u32),
}

/// A whitespace-token scanner over buffered input.
pub struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        TokenReader {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, ParseError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }

    /// Returns the next token, treating end of input as an error.
    fn require_token(&mut self) -> Result<String, ParseError> {
        self.next_token()?.ok_or(ParseError::UnexpectedEof)
    }

    /// Reads and parses the next token as a number.
    fn require_num<T: FromStr>(&mut self) -> Result<T, ParseError> {
        let token = self.require_token()?;
        token.parse().map_err(|_| ParseError::InvalidInteger(token))
    }
}

/// The raw setup block, before map validation.
#[derive(Debug, Clone)]
pub struct MapSetup {
    pub regions: Vec<(RegionId, u32)>,
    pub fields: Vec<(FieldId, RegionId)>,
    pub connections: Vec<(FieldId, FieldId)>,
    pub priority: PriorityHalf,
}

/// Reads the one-time setup block: regions, fields, connections, and the
/// priority-half marker.
pub fn read_setup<R: BufRead>(reader: &mut TokenReader<R>) -> Result<MapSetup, ParseError> {
    let region_count: usize = reader.require_num()?;
    let mut regions = Vec::with_capacity(region_count);
    for _ in 0..region_count {
        let id: RegionId = reader.require_num()?;
        let bonus: u32 = reader.require_num()?;
        regions.push((id, bonus));
    }

    let field_count: usize = reader.require_num()?;
    let mut fields = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        let id: FieldId = reader.require_num()?;
        let region: RegionId = reader.require_num()?;
        fields.push((id, region));
    }

    let connection_count: usize = reader.require_num()?;
    let mut connections = Vec::with_capacity(connection_count);
    for _ in 0..connection_count {
        let source: FieldId = reader.require_num()?;
        let target: FieldId = reader.require_num()?;
        connections.push((source, target));
    }

    let priority = match reader.require_token()?.as_str() {
        "LOWER" => PriorityHalf::Lower,
        "UPPER" => PriorityHalf::Upper,
        other => return Err(ParseError::UnknownPriority(other.to_owned())),
    };

    Ok(MapSetup {
        regions,
        fields,
        connections,
        priority,
    })
}

/// Reads one turn block.
///
/// Returns `Ok(None)` on a clean end of input before the block starts;
/// running dry inside a block is an `UnexpectedEof` error.
pub fn read_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
) -> Result<Option<TurnReport>, ParseError> {
    let phase_token = match reader.next_token()? {
        Some(token) => token,
        None => return Ok(None),
    };
    let phase =
        TurnPhase::from_name(&phase_token).ok_or(ParseError::UnknownTurnType(phase_token))?;

    let my_fields: u32 = reader.require_num()?;
    let enemy_fields: u32 = reader.require_num()?;
    let deployable: u32 = reader.require_num()?;
    let enemy_deployable: u32 = reader.require_num()?;
    let picks_left: u32 = reader.require_num()?;
    let enemy_picks_left: u32 = reader.require_num()?;

    let field_count: usize = reader.require_num()?;
    let mut fields = Vec::with_capacity(field_count);
    for _ in 0..field_count {
        let id: FieldId = reader.require_num()?;
        let troops: u32 = reader.require_num()?;
        let code: u32 = reader.require_num()?;
        let owner = Owner::from_code(code).ok_or(ParseError::UnknownOwnerCode(code))?;
        fields.push((id, troops, owner));
    }

    Ok(Some(TurnReport {
        phase,
        my_fields,
        enemy_fields,
        deployable,
        enemy_deployable,
        picks_left,
        enemy_picks_left,
        fields,
    }))
}
