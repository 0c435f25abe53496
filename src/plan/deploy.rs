//! Troop deployment.
//!
//! Spends the entire deployable budget every deploy turn: frontier fields
//! receive shares proportional to their deploy weight (vulnerability
//! clamped at zero), and the integer remainder goes to the best-scoring
//! frontier field, so the emitted deployments always sum to the budget
//! exactly.

use crate::board::action::Action;
use crate::board::map::MapModel;
use crate::board::state::{Owner, TurnSnapshot};
use crate::eval::{best_slot, is_frontier, score_fields, vulnerability};

/// Plans the deployments for this turn.
pub fn deployments(map: &MapModel, snap: &TurnSnapshot) -> Vec<Action> {
    let budget = snap.deployable;
    if budget == 0 {
        return vec![Action::Wait];
    }

    let mut owned: Vec<usize> = snap.fields_of(Owner::Me).collect();
    if owned.is_empty() {
        return vec![Action::Wait];
    }
    owned.sort_by_key(|&slot| map.field(slot).id);

    let scores = score_fields(map, snap);
    let frontier: Vec<usize> = owned
        .iter()
        .copied()
        .filter(|&slot| is_frontier(map, snap, slot))
        .collect();

    if frontier.is_empty() {
        // nothing borders hostile territory; stack the best field we have
        return match best_slot(map, owned.into_iter(), &scores) {
            Some(best) => vec![Action::Deploy {
                field: map.field(best).id,
                troops: budget,
            }],
            None => vec![Action::Wait],
        };
    }

    let weights: Vec<f64> = frontier
        .iter()
        .map(|&slot| vulnerability(map, snap, slot).max(0.0))
        .collect();
    let total: f64 = weights.iter().sum();

    let mut shares = vec![0u32; frontier.len()];
    if total > 0.0 {
        for (i, weight) in weights.iter().enumerate() {
            shares[i] = (f64::from(budget) * weight / total).floor() as u32;
        }
    }

    let spent: u32 = shares.iter().sum();
    let remainder = budget - spent;
    if remainder > 0 {
        if let Some(best) = best_slot(map, frontier.iter().copied(), &scores) {
            if let Some(i) = frontier.iter().position(|&slot| slot == best) {
                shares[i] += remainder;
            }
        }
    }

    frontier
        .iter()
        .zip(&shares)
        .filter(|(_, &troops)| troops > 0)
        .map(|(&slot, &troops)| Action::Deploy {
            field: map.field(slot).id,
            troops,
        })
        .collect()
}
