//! Symmetric random maps for self-play.
//!
//! Generates mirrored two-half maps shaped like the referee's: field `i`
//! in the lower half pairs with `i + half` in the upper half, every edge
//! has its mirror image, and regions are contiguous runs of equal layout
//! in both halves. Two bridge edges connect the halves.

use rand::Rng;

use crate::board::map::{FieldId, RegionId};

/// Fields per region run.
const REGION_RUN: u32 = 3;

/// Fraction of the map each player may pick as starting fields.
const STARTING_PICK_RATE: f32 = 0.2;

/// A generated map in raw setup form, ready for `MapModel::build`.
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    pub regions: Vec<(RegionId, u32)>,
    pub fields: Vec<(FieldId, RegionId)>,
    pub connections: Vec<(FieldId, FieldId)>,
}

/// Number of starting picks each player gets on a map of the given size.
pub fn starting_picks(field_count: u32) -> u32 {
    ((field_count as f32 * STARTING_PICK_RATE) as u32).clamp(2, 5)
}

/// Generates a mirrored map with `half_fields` fields per half.
///
/// The lower half takes ids `0..half`, the upper half `half..2*half`;
/// the mirror of field `i` is `i + half`.
pub fn symmetric_map(half_fields: u32, rng: &mut impl Rng) -> GeneratedMap {
    let half = half_fields.max(2);

    // regions: contiguous runs, mirrored between the halves
    let lower_regions = half.div_ceil(REGION_RUN);
    let mut regions = Vec::with_capacity(2 * lower_regions as usize);
    for r in 0..lower_regions {
        let members = (half - r * REGION_RUN).min(REGION_RUN);
        let bonus = members + rng.gen_range(0..=1);
        regions.push((r, bonus));
        regions.push((r + lower_regions, bonus));
    }

    let mut fields = Vec::with_capacity(2 * half as usize);
    for i in 0..half {
        fields.push((i, i / REGION_RUN));
    }
    for i in 0..half {
        fields.push((i + half, i / REGION_RUN + lower_regions));
    }

    // a chain through each half keeps both sides connected
    let mut connections = Vec::new();
    for i in 0..half - 1 {
        connections.push((i, i + 1));
        connections.push((i + half, i + half + 1));
    }

    // random chords, mirrored so the halves stay identical
    for _ in 0..half / 2 {
        let a = rng.gen_range(0..half);
        let b = rng.gen_range(0..half);
        if a != b {
            connections.push((a, b));
            connections.push((a + half, b + half));
        }
    }

    // bridges between a field and its mirror are themselves symmetric
    connections.push((0, half));
    connections.push((half - 1, 2 * half - 1));

    GeneratedMap {
        regions,
        fields,
        connections,
    }
}
