//! Heuristic field and region scoring.
//!
//! A field's score is a weighted sum of three features: the bonus troops of
//! its region scaled by how much of the region we already hold, how exposed
//! the field is to adjacent enemy stacks, and how vulnerable our garrison
//! is against the strongest neighbor. All scoring is a pure function of
//! (map, snapshot) and runs in O(fields + edges) per turn.
//!
//! Ties are broken by lowest field id at every selection site, so two runs
//! over the same snapshot always rank fields identically.

use crate::board::map::MapModel;
use crate::board::state::{Owner, TurnSnapshot};

/// Weight of the region-bonus component of a field score.
const REGION_WEIGHT: f64 = 1.0;

/// Weight of the frontier-exposure component.
const FRONTIER_WEIGHT: f64 = 0.5;

/// Weight of the vulnerability component.
const VULNERABILITY_WEIGHT: f64 = 0.25;

/// Largest troop count on an adjacent enemy field, 0 when no enemy borders.
pub fn max_adjacent_enemy_troops(map: &MapModel, snap: &TurnSnapshot, slot: usize) -> u32 {
    map.neighbors(slot)
        .iter()
        .filter(|&&n| snap.owner(n) == Owner::Enemy)
        .map(|&n| snap.troops(n))
        .max()
        .unwrap_or(0)
}

/// Number of adjacent enemy-owned fields.
pub fn frontier_exposure(map: &MapModel, snap: &TurnSnapshot, slot: usize) -> u32 {
    map.neighbors(slot)
        .iter()
        .filter(|&&n| snap.owner(n) == Owner::Enemy)
        .count() as u32
}

/// Returns true if the field at `slot` borders at least one field we do
/// not own. Only meaningful for owned fields.
pub fn is_frontier(map: &MapModel, snap: &TurnSnapshot, slot: usize) -> bool {
    map.neighbors(slot).iter().any(|&n| snap.owner(n) != Owner::Me)
}

/// How exposed our garrison at `slot` is: the strongest adjacent enemy
/// stack minus our own troops. Zero for fields we do not own.
pub fn vulnerability(map: &MapModel, snap: &TurnSnapshot, slot: usize) -> f64 {
    if snap.owner(slot) != Owner::Me {
        return 0.0;
    }
    f64::from(max_adjacent_enemy_troops(map, snap, slot)) - f64::from(snap.troops(slot))
}

/// Scores one field.
pub fn field_score(map: &MapModel, snap: &TurnSnapshot, slot: usize) -> f64 {
    let region = map.region_of(slot);
    let region_part = f64::from(region.bonus_troops) * region.owned_fraction(snap, Owner::Me);

    REGION_WEIGHT * region_part
        + FRONTIER_WEIGHT * f64::from(frontier_exposure(map, snap, slot))
        + VULNERABILITY_WEIGHT * vulnerability(map, snap, slot)
}

/// Scores every field, indexed by slot.
pub fn score_fields(map: &MapModel, snap: &TurnSnapshot) -> Vec<f64> {
    (0..map.field_count())
        .map(|slot| field_score(map, snap, slot))
        .collect()
}

/// Scores one region: its bonus scaled by our control fraction.
pub fn region_score(map: &MapModel, snap: &TurnSnapshot, region_idx: usize) -> f64 {
    let region = &map.regions()[region_idx];
    f64::from(region.bonus_troops) * region.owned_fraction(snap, Owner::Me)
}

/// Scores every region, indexed in setup order.
pub fn score_regions(map: &MapModel, snap: &TurnSnapshot) -> Vec<f64> {
    (0..map.regions().len())
        .map(|idx| region_score(map, snap, idx))
        .collect()
}

/// Picks the best-scoring slot from `candidates`, breaking score ties by
/// lowest field id. Returns `None` for an empty candidate set.
pub fn best_slot(
    map: &MapModel,
    candidates: impl Iterator<Item = usize>,
    scores: &[f64],
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for slot in candidates {
        match best {
            None => best = Some(slot),
            Some(current) => {
                let better = scores[slot] > scores[current]
                    || (scores[slot] == scores[current]
                        && map.field(slot).id < map.field(current).id);
                if better {
                    best = Some(slot);
                }
            }
        }
    }
    best
}
