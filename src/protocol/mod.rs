//! Referee protocol handling.
//!
//! This module implements both directions of the referee's line-oriented
//! protocol: the token reader for the setup and per-turn input blocks, and
//! the encoder/parser for the action vocabulary written back per turn.

pub mod encode;
pub mod input;

pub use encode::{format_action, format_actions, parse_action, parse_actions, ActionParseError};
pub use input::{read_setup, read_turn, MapSetup, ParseError, TokenReader};
