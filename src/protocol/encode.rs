//! Wire encoding of actions.
//!
//! Renders planner actions into the referee's command vocabulary and
//! parses the same vocabulary back. Encoding cannot fail; parsing reports
//! structured errors and exists for the self-play referee and tests, not
//! the per-turn hot path.

use crate::board::action::Action;

/// Errors raised while parsing an action string.
#[derive(Debug, thiserror::Error)]
pub enum ActionParseError {
    #[error("empty action")]
    Empty,

    #[error("unknown action verb: '{0}'")]
    UnknownVerb(String),

    #[error("{verb} is missing an argument")]
    MissingArgument { verb: &'static str },

    #[error("invalid integer '{token}' in {verb}")]
    InvalidInteger { verb: &'static str, token: String },
}

/// Renders a single action.
pub fn format_action(action: &Action) -> String {
    match action {
        Action::Pick { field } => format!("PICK {}", field),
        Action::Random => "RANDOM".to_owned(),
        Action::Deploy { field, troops } => format!("DEPLOY {} {}", field, troops),
        Action::Move { from, to, troops } => format!("MOVE {} {} {}", from, to, troops),
        Action::Wait => "WAIT".to_owned(),
    }
}

/// Renders a turn's actions as one output line, joined with `;`.
/// An empty slice renders as `WAIT`.
pub fn format_actions(actions: &[Action]) -> String {
    if actions.is_empty() {
        return "WAIT".to_owned();
    }
    actions
        .iter()
        .map(format_action)
        .collect::<Vec<_>>()
        .join(";")
}

fn parse_num_arg(
    verb: &'static str,
    tokens: &[&str],
    index: usize,
) -> Result<u32, ActionParseError> {
    let token = tokens
        .get(index)
        .ok_or(ActionParseError::MissingArgument { verb })?;
    token.parse().map_err(|_| ActionParseError::InvalidInteger {
        verb,
        token: (*token).to_owned(),
    })
}

/// Parses a single action string.
pub fn parse_action(text: &str) -> Result<Action, ActionParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let verb = *tokens.first().ok_or(ActionParseError::Empty)?;

    match verb {
        "PICK" => Ok(Action::Pick {
            field: parse_num_arg("PICK", &tokens, 1)?,
        }),
        "RANDOM" => Ok(Action::Random),
        "DEPLOY" => Ok(Action::Deploy {
            field: parse_num_arg("DEPLOY", &tokens, 1)?,
            troops: parse_num_arg("DEPLOY", &tokens, 2)?,
        }),
        "MOVE" => Ok(Action::Move {
            from: parse_num_arg("MOVE", &tokens, 1)?,
            to: parse_num_arg("MOVE", &tokens, 2)?,
            troops: parse_num_arg("MOVE", &tokens, 3)?,
        }),
        "WAIT" => Ok(Action::Wait),
        other => Err(ActionParseError::UnknownVerb(other.to_owned())),
    }
}

/// Parses a `;`-joined line of actions.
pub fn parse_actions(line: &str) -> Result<Vec<Action>, ActionParseError> {
    line.split(';').map(parse_action).collect()
}
