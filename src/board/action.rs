//! The action vocabulary.
//!
//! One variant per command the referee accepts. The planner produces these;
//! the encoder renders them onto the wire.

use super::map::FieldId;

/// A single command in the referee's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Claim a specific starting field: `PICK 7`
    Pick { field: FieldId },

    /// Let the referee assign the next random starting field: `RANDOM`
    Random,

    /// Place troops on an owned field: `DEPLOY 7 3`
    Deploy { field: FieldId, troops: u32 },

    /// Move troops along a connection: `MOVE 2 7 5`
    Move {
        from: FieldId,
        to: FieldId,
        troops: u32,
    },

    /// Do nothing this turn: `WAIT`
    Wait,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_variants_are_distinct() {
        let deploy = Action::Deploy { field: 1, troops: 3 };
        let moved = Action::Move {
            from: 1,
            to: 2,
            troops: 3,
        };
        assert_ne!(deploy, moved);
        assert_ne!(Action::Wait, Action::Random);
    }

    #[test]
    fn actions_compare_by_payload() {
        assert_eq!(
            Action::Pick { field: 4 },
            Action::Pick { field: 4 }
        );
        assert_ne!(
            Action::Pick { field: 4 },
            Action::Pick { field: 5 }
        );
    }
}
