//! Per-turn troop economy.
//!
//! Computes the deploy budget a player receives at the start of each
//! deploy phase: a flat base, a field-count bonus, bonuses for fully
//! controlled regions, the rounding-loss carry from combat, and a one-off
//! bonus on the first deployment.

/// Troops every player receives each deploy phase.
pub const BASE_TROOPS_PER_TURN: u32 = 5;

/// Extra troops granted on the first deployment of a match.
pub const FIRST_DEPLOYMENT_BONUS: u32 = 10;

/// Field-count bonus rate, a shade above one third.
pub const FIELD_COUNT_RATE: f32 = 0.334;

/// Computes a player's deploy budget for this turn.
pub fn deployable_troops(
    owned_fields: u32,
    region_bonus: u32,
    rounding_loss: f32,
    first_deployment: bool,
) -> u32 {
    let field_bonus = (owned_fields as f32 * FIELD_COUNT_RATE) as u32;
    let first_bonus = if first_deployment {
        FIRST_DEPLOYMENT_BONUS
    } else {
        0
    };
    BASE_TROOPS_PER_TURN + field_bonus + region_bonus + rounding_loss.floor() as u32 + first_bonus
}
