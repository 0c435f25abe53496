//! Troop movement.
//!
//! Each owned field keeps enough troops to hold its ground (at least one,
//! or the strongest adjacent enemy stack) and pushes the surplus at the
//! most attractive adjacent target it can actually overrun. At most one
//! move per source field.

use crate::board::action::Action;
use crate::board::map::MapModel;
use crate::board::state::{Owner, TurnSnapshot};
use crate::eval::max_adjacent_enemy_troops;

/// Bonus applied to enemy-owned move targets over neutral ones.
const ENEMY_TARGET_BONUS: f64 = 4.0;

/// Plans the movements for this turn.
pub fn movements(map: &MapModel, snap: &TurnSnapshot) -> Vec<Action> {
    let mut owned: Vec<usize> = snap.fields_of(Owner::Me).collect();
    owned.sort_by_key(|&slot| map.field(slot).id);

    let mut actions = Vec::new();
    for &slot in &owned {
        let kept = max_adjacent_enemy_troops(map, snap, slot).max(1);
        let troops = snap.troops(slot);
        if troops <= kept {
            continue;
        }
        let surplus = troops - kept;

        let mut best: Option<usize> = None;
        let mut best_score = f64::NEG_INFINITY;
        for &neighbor in map.neighbors(slot) {
            if snap.owner(neighbor) == Owner::Me {
                continue;
            }
            // only attack garrisons the surplus outnumbers
            if surplus <= snap.troops(neighbor) {
                continue;
            }
            let bonus = if snap.owner(neighbor) == Owner::Enemy {
                ENEMY_TARGET_BONUS
            } else {
                0.0
            };
            let score = bonus - f64::from(snap.troops(neighbor));
            let better = match best {
                None => true,
                Some(current) => {
                    score > best_score
                        || (score == best_score
                            && map.field(neighbor).id < map.field(current).id)
                }
            };
            if better {
                best = Some(neighbor);
                best_score = score;
            }
        }

        if let Some(target) = best {
            actions.push(Action::Move {
                from: map.field(slot).id,
                to: map.field(target).id,
                troops: surplus,
            });
        }
    }

    if actions.is_empty() {
        vec![Action::Wait]
    } else {
        actions
    }
}
