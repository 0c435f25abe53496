//! Starting-field selection.
//!
//! One action per pick turn. The first pick is restricted to our priority
//! half of the id space, so a simultaneous conflict with the opponent
//! cannot cost us the field.

use crate::board::action::Action;
use crate::board::map::MapModel;
use crate::board::state::{Owner, TurnSnapshot};
use crate::eval::{best_slot, score_fields};

/// Chooses the starting-field action for this turn.
///
/// Picks the highest-scoring neutral field while picks remain; falls back
/// to `RANDOM` when no picks are left or no neutral field exists.
pub fn choose(map: &MapModel, snap: &TurnSnapshot) -> Action {
    if snap.picks_left == 0 {
        return Action::Random;
    }

    let scores = score_fields(map, snap);
    let first_pick = snap.fields_of(Owner::Me).next().is_none();

    let candidate = if first_pick {
        // prefer the safe half; a symmetric map always has neutral fields
        // there on the first pick, but fall back rather than stall
        best_slot(
            map,
            snap.fields_of(Owner::Neutral)
                .filter(|&slot| map.in_priority_half(map.field(slot).id)),
            &scores,
        )
        .or_else(|| best_slot(map, snap.fields_of(Owner::Neutral), &scores))
    } else {
        best_slot(map, snap.fields_of(Owner::Neutral), &scores)
    };

    match candidate {
        Some(slot) => Action::Pick {
            field: map.field(slot).id,
        },
        None => Action::Random,
    }
}
