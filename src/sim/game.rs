//! Match loop.
//!
//! Drives two planner instances through a full game: the pick phase with
//! id-priority conflict resolution, then alternating deploy and move
//! phases under the referee's combat and economy rules. Each player plans
//! against its own perspective of the shared board.

use rand::Rng;

use crate::board::action::Action;
use crate::board::map::{FieldId, MapError, MapModel, PriorityHalf};
use crate::board::state::{Owner, SnapshotError, TurnPhase, TurnReport, TurnSnapshot};
use crate::plan;

use super::combat::{self, NEUTRAL_GARRISON};
use super::economy;
use super::mapgen::{starting_picks, GeneratedMap};

/// Errors raised while simulating a match.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Absolute player identity; the engine-facing `Owner` is relative to a
/// viewpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub winner: Option<Player>,
    pub turns: u32,
    pub final_fields: [u32; 2],
}

/// Mutable board state during a match, indexed by map slot.
struct MatchState {
    owners: Vec<Option<Player>>,
    troops: Vec<u32>,
    rounding_loss: [f32; 2],
}

impl MatchState {
    fn field_count_of(&self, player: Player) -> u32 {
        self.owners
            .iter()
            .filter(|&&owner| owner == Some(player))
            .count() as u32
    }

    fn owner_seen_by(&self, slot: usize, viewer: Player) -> Owner {
        match self.owners[slot] {
            None => Owner::Neutral,
            Some(p) if p == viewer => Owner::Me,
            Some(_) => Owner::Enemy,
        }
    }
}

/// Plays one full match on a generated map.
pub fn play_match(
    gen: &GeneratedMap,
    max_turns: u32,
    rng: &mut impl Rng,
) -> Result<MatchOutcome, SimError> {
    // each player plans against its own priority half of the same board
    let maps = [
        MapModel::build(
            &gen.regions,
            &gen.fields,
            &gen.connections,
            PriorityHalf::Lower,
        )?,
        MapModel::build(
            &gen.regions,
            &gen.fields,
            &gen.connections,
            PriorityHalf::Upper,
        )?,
    ];
    let board = &maps[0];
    let n = board.field_count();

    let mut state = MatchState {
        owners: vec![None; n],
        troops: vec![0; n],
        rounding_loss: [0.0; 2],
    };

    let picks = starting_picks(n as u32);
    let mut picks_left = [picks, picks];
    run_pick_phase(board, &maps, &mut state, &mut picks_left, rng)?;

    for slot in 0..n {
        if state.owners[slot].is_none() {
            state.troops[slot] = NEUTRAL_GARRISON;
        }
    }

    let mut turns = 0;
    if state.field_count_of(Player::One) > 0 && state.field_count_of(Player::Two) > 0 {
        for turn in 1..=max_turns {
            turns = turn;
            run_deploy_phase(&maps, &mut state, turn == 1)?;
            run_move_phase(board, &maps, &mut state)?;
            if state.field_count_of(Player::One) == 0
                || state.field_count_of(Player::Two) == 0
            {
                break;
            }
        }
    }

    let final_fields = [
        state.field_count_of(Player::One),
        state.field_count_of(Player::Two),
    ];
    let winner = if final_fields[0] > final_fields[1] {
        Some(Player::One)
    } else if final_fields[1] > final_fields[0] {
        Some(Player::Two)
    } else {
        None
    };

    Ok(MatchOutcome {
        winner,
        turns,
        final_fields,
    })
}

/// Builds the turn input one player would receive from the referee.
fn report_for(
    maps: &[MapModel; 2],
    state: &MatchState,
    player: Player,
    phase: TurnPhase,
    budgets: [u32; 2],
    picks_left: [u32; 2],
) -> TurnReport {
    let board = &maps[player.index()];
    let me = player.index();
    let them = player.opponent().index();
    let fields = board
        .fields()
        .iter()
        .enumerate()
        .map(|(slot, field)| (field.id, state.troops[slot], state.owner_seen_by(slot, player)))
        .collect();

    TurnReport {
        phase,
        my_fields: state.field_count_of(player),
        enemy_fields: state.field_count_of(player.opponent()),
        deployable: budgets[me],
        enemy_deployable: budgets[them],
        picks_left: picks_left[me],
        enemy_picks_left: picks_left[them],
        fields,
    }
}

/// Runs one player's planner over the current state.
fn decide_for(
    maps: &[MapModel; 2],
    state: &MatchState,
    player: Player,
    phase: TurnPhase,
    budgets: [u32; 2],
    picks_left: [u32; 2],
) -> Result<Vec<Action>, SimError> {
    let board = &maps[player.index()];
    let report = report_for(maps, state, player, phase, budgets, picks_left);
    let snap = TurnSnapshot::from_report(board, &report)?;
    Ok(plan::decide(board, &snap))
}

fn run_pick_phase(
    board: &MapModel,
    maps: &[MapModel; 2],
    state: &mut MatchState,
    picks_left: &mut [u32; 2],
    rng: &mut impl Rng,
) -> Result<(), SimError> {
    while picks_left[0] > 0 || picks_left[1] > 0 {
        let mut choices: [Option<FieldId>; 2] = [None, None];
        for player in [Player::One, Player::Two] {
            let i = player.index();
            if picks_left[i] == 0 {
                continue;
            }
            let actions = decide_for(
                maps,
                state,
                player,
                TurnPhase::ChooseStartingFields,
                [0, 0],
                *picks_left,
            )?;
            choices[i] = match actions.first() {
                Some(Action::Pick { field }) => Some(*field),
                _ => pick_random_neutral(board, state, rng),
            };
        }

        // same field: the id's priority half decides, the loser keeps the pick
        if let (Some(first), Some(second)) = (choices[0], choices[1]) {
            if first == second {
                let winner = if board.in_priority_half(first) {
                    Player::One
                } else {
                    Player::Two
                };
                settle_pick(board, state, picks_left, winner, first)?;
                continue;
            }
        }

        for player in [Player::One, Player::Two] {
            let i = player.index();
            if picks_left[i] == 0 {
                continue;
            }
            match choices[i] {
                Some(field) => settle_pick(board, state, picks_left, player, field)?,
                // no neutral field remains for this player; the pick is forfeited
                None => picks_left[i] -= 1,
            }
        }
    }
    Ok(())
}

fn settle_pick(
    board: &MapModel,
    state: &mut MatchState,
    picks_left: &mut [u32; 2],
    player: Player,
    field: FieldId,
) -> Result<(), SimError> {
    let slot = board.slot_of(field)?;
    if state.owners[slot].is_none() {
        state.owners[slot] = Some(player);
        state.troops[slot] = 1;
    }
    picks_left[player.index()] -= 1;
    Ok(())
}

fn pick_random_neutral(
    board: &MapModel,
    state: &MatchState,
    rng: &mut impl Rng,
) -> Option<FieldId> {
    let neutral: Vec<usize> = (0..board.field_count())
        .filter(|&slot| state.owners[slot].is_none())
        .collect();
    if neutral.is_empty() {
        return None;
    }
    Some(board.field(neutral[rng.gen_range(0..neutral.len())]).id)
}

fn run_deploy_phase(
    maps: &[MapModel; 2],
    state: &mut MatchState,
    first_deployment: bool,
) -> Result<(), SimError> {
    let board = &maps[0];
    let budgets = [
        budget_for(board, state, Player::One, first_deployment),
        budget_for(board, state, Player::Two, first_deployment),
    ];
    // the carry is granted with this budget and never taken further
    state.rounding_loss = [0.0, 0.0];

    for player in [Player::One, Player::Two] {
        let actions = decide_for(maps, state, player, TurnPhase::DeployTroops, budgets, [0, 0])?;
        for action in actions {
            if let Action::Deploy { field, troops } = action {
                let slot = board.slot_of(field)?;
                if state.owners[slot] == Some(player) {
                    state.troops[slot] += troops;
                }
            }
        }
    }
    Ok(())
}

fn budget_for(board: &MapModel, state: &MatchState, player: Player, first: bool) -> u32 {
    let owned = state.field_count_of(player);
    // a region pays its bonus only while fully held
    let region_bonus: u32 = board
        .regions()
        .iter()
        .filter(|region| {
            region
                .members()
                .iter()
                .all(|&slot| state.owners[slot] == Some(player))
        })
        .map(|region| region.bonus_troops)
        .sum();
    economy::deployable_troops(owned, region_bonus, state.rounding_loss[player.index()], first)
}

fn run_move_phase(
    board: &MapModel,
    maps: &[MapModel; 2],
    state: &mut MatchState,
) -> Result<(), SimError> {
    let mut queues: [Vec<(FieldId, FieldId, u32)>; 2] = [Vec::new(), Vec::new()];
    for player in [Player::One, Player::Two] {
        let actions = decide_for(maps, state, player, TurnPhase::MoveTroops, [0, 0], [0, 0])?;
        queues[player.index()] = actions
            .iter()
            .filter_map(|action| match action {
                Action::Move { from, to, troops } => Some((*from, *to, *troops)),
                _ => None,
            })
            .collect();
    }

    resolve_head_on(board, state, &mut queues)?;

    // interleave the rest so neither side finishes a whole turn first
    let longest = queues[0].len().max(queues[1].len());
    for i in 0..longest {
        for player in [Player::One, Player::Two] {
            if let Some(&(from, to, troops)) = queues[player.index()].get(i) {
                execute_move(board, state, player, from, to, troops)?;
            }
        }
    }
    Ok(())
}

/// Finds move pairs that cross the same connection in opposite directions
/// and resolves them as a mutual attack before ordinary execution.
fn resolve_head_on(
    board: &MapModel,
    state: &mut MatchState,
    queues: &mut [Vec<(FieldId, FieldId, u32)>; 2],
) -> Result<(), SimError> {
    let mut i = 0;
    while i < queues[0].len() {
        let (a_from, a_to, a_troops) = queues[0][i];
        let mirrored = queues[1]
            .iter()
            .position(|&(b_from, b_to, _)| b_from == a_to && b_to == a_from);
        let Some(j) = mirrored else {
            i += 1;
            continue;
        };
        let (b_from, b_to, b_troops) = queues[1][j];
        queues[0].remove(i);
        queues[1].remove(j);

        let a_slot = board.slot_of(a_from)?;
        let b_slot = board.slot_of(b_from)?;
        // each side fights with what is actually still on its field
        let a_army = a_troops.min(state.troops[a_slot]);
        let b_army = b_troops.min(state.troops[b_slot]);
        if a_army == 0 || b_army == 0 {
            if a_army > 0 {
                execute_move(board, state, Player::One, a_from, a_to, a_army)?;
            }
            if b_army > 0 {
                execute_move(board, state, Player::Two, b_from, b_to, b_army)?;
            }
            continue;
        }

        let outcome = combat::resolve_mutual_attack(a_army, b_army);
        state.troops[a_slot] = state.troops[a_slot].saturating_sub(outcome.first_killed);
        state.troops[b_slot] = state.troops[b_slot].saturating_sub(outcome.second_killed);
        state.rounding_loss[Player::One.index()] += outcome.first_overkill;
        state.rounding_loss[Player::Two.index()] += outcome.second_overkill;

        // only an uncontested survivor pushes on; two survivors both fall back
        if outcome.first_left > 0 && outcome.second_left == 0 {
            execute_move(board, state, Player::One, a_from, a_to, outcome.first_left)?;
        } else if outcome.second_left > 0 && outcome.first_left == 0 {
            execute_move(board, state, Player::Two, b_from, b_to, outcome.second_left)?;
        }
    }
    Ok(())
}

fn execute_move(
    board: &MapModel,
    state: &mut MatchState,
    mover: Player,
    from: FieldId,
    to: FieldId,
    troops: u32,
) -> Result<(), SimError> {
    let from_slot = board.slot_of(from)?;
    let to_slot = board.slot_of(to)?;
    // the source may have fallen earlier in this phase
    if state.owners[from_slot] != Some(mover) {
        return Ok(());
    }
    let moving = troops.min(state.troops[from_slot]);
    if moving == 0 {
        return Ok(());
    }

    if state.owners[to_slot] == Some(mover) {
        state.troops[from_slot] -= moving;
        state.troops[to_slot] += moving;
        return Ok(());
    }

    let outcome = combat::resolve_attack(moving, state.troops[to_slot]);
    state.troops[from_slot] -= outcome.attackers_killed;
    state.troops[to_slot] = outcome.defenders_left;
    state.rounding_loss[mover.index()] += outcome.attacker_overkill;
    if let Some(defender) = state.owners[to_slot] {
        state.rounding_loss[defender.index()] += outcome.defender_overkill;
    }
    if outcome.conquered {
        state.troops[from_slot] -= outcome.attackers_left;
        state.troops[to_slot] = outcome.attackers_left;
        state.owners[to_slot] = Some(mover);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mapgen::symmetric_map;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn line_map() -> GeneratedMap {
        GeneratedMap {
            regions: vec![(0, 3), (1, 3)],
            fields: vec![(0, 0), (1, 0), (2, 1), (3, 1)],
            connections: vec![(0, 1), (1, 2), (2, 3)],
        }
    }

    #[test]
    fn opponents_have_opposite_perspectives() {
        let state = MatchState {
            owners: vec![Some(Player::One), Some(Player::Two), None],
            troops: vec![1, 2, 0],
            rounding_loss: [0.0; 2],
        };
        assert_eq!(state.owner_seen_by(0, Player::One), Owner::Me);
        assert_eq!(state.owner_seen_by(0, Player::Two), Owner::Enemy);
        assert_eq!(state.owner_seen_by(1, Player::One), Owner::Enemy);
        assert_eq!(state.owner_seen_by(2, Player::One), Owner::Neutral);
    }

    #[test]
    fn matches_on_tiny_maps_complete() {
        let mut rng = SmallRng::seed_from_u64(1);
        let outcome = play_match(&line_map(), 30, &mut rng).unwrap();
        assert!(outcome.turns <= 30);
        assert!(outcome.final_fields[0] + outcome.final_fields[1] <= 4);
    }

    #[test]
    fn matches_on_generated_maps_complete() {
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let map = symmetric_map(8, &mut rng);
            let outcome = play_match(&map, 40, &mut rng).unwrap();
            assert!(outcome.turns <= 40);
            assert!(outcome.final_fields[0] + outcome.final_fields[1] <= 16);
        }
    }

    #[test]
    fn winner_agrees_with_field_counts() {
        for seed in 0..5 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let map = symmetric_map(6, &mut rng);
            let outcome = play_match(&map, 40, &mut rng).unwrap();
            match outcome.winner {
                Some(Player::One) => {
                    assert!(outcome.final_fields[0] > outcome.final_fields[1])
                }
                Some(Player::Two) => {
                    assert!(outcome.final_fields[1] > outcome.final_fields[0])
                }
                None => assert_eq!(outcome.final_fields[0], outcome.final_fields[1]),
            }
        }
    }

    #[test]
    fn matches_are_deterministic_per_seed() {
        let run = |seed: u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            let map = symmetric_map(6, &mut rng);
            play_match(&map, 40, &mut rng).unwrap()
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn conquest_transfers_ownership() {
        let map = MapModel::build(
            &[(0, 3)],
            &[(0, 0), (1, 0)],
            &[(0, 1)],
            PriorityHalf::Lower,
        )
        .unwrap();
        let mut state = MatchState {
            owners: vec![Some(Player::One), Some(Player::Two)],
            troops: vec![10, 1],
            rounding_loss: [0.0; 2],
        };
        execute_move(&map, &mut state, Player::One, 0, 1, 9).unwrap();
        assert_eq!(state.owners[1], Some(Player::One));
        assert!(state.troops[1] > 0);
    }

    #[test]
    fn failed_attack_keeps_the_defender() {
        let map = MapModel::build(
            &[(0, 3)],
            &[(0, 0), (1, 0)],
            &[(0, 1)],
            PriorityHalf::Lower,
        )
        .unwrap();
        let mut state = MatchState {
            owners: vec![Some(Player::One), Some(Player::Two)],
            troops: vec![2, 8],
            rounding_loss: [0.0; 2],
        };
        execute_move(&map, &mut state, Player::One, 0, 1, 1).unwrap();
        assert_eq!(state.owners[1], Some(Player::Two));
    }

    #[test]
    fn transfers_between_own_fields_fight_nobody() {
        let map = MapModel::build(
            &[(0, 3)],
            &[(0, 0), (1, 0)],
            &[(0, 1)],
            PriorityHalf::Lower,
        )
        .unwrap();
        let mut state = MatchState {
            owners: vec![Some(Player::One), Some(Player::One)],
            troops: vec![5, 1],
            rounding_loss: [0.0; 2],
        };
        execute_move(&map, &mut state, Player::One, 0, 1, 4).unwrap();
        assert_eq!(state.troops[0], 1);
        assert_eq!(state.troops[1], 5);
        assert_eq!(state.rounding_loss, [0.0, 0.0]);
    }

    #[test]
    fn head_on_moves_fight_in_the_middle() {
        let map = MapModel::build(
            &[(0, 3)],
            &[(0, 0), (1, 0)],
            &[(0, 1)],
            PriorityHalf::Lower,
        )
        .unwrap();
        let mut state = MatchState {
            owners: vec![Some(Player::One), Some(Player::Two)],
            troops: vec![5, 5],
            rounding_loss: [0.0; 2],
        };
        let mut queues = [vec![(0u32, 1u32, 5u32)], vec![(1u32, 0u32, 5u32)]];
        resolve_head_on(&map, &mut state, &mut queues).unwrap();
        assert!(queues[0].is_empty());
        assert!(queues[1].is_empty());
        // both armies lose ceil(3.0) = 3 and fall back
        assert_eq!(state.troops, vec![2, 2]);
        assert_eq!(state.owners[0], Some(Player::One));
        assert_eq!(state.owners[1], Some(Player::Two));
    }

    #[test]
    fn head_on_survivor_continues_the_attack() {
        let map = MapModel::build(
            &[(0, 3)],
            &[(0, 0), (1, 0)],
            &[(0, 1)],
            PriorityHalf::Lower,
        )
        .unwrap();
        let mut state = MatchState {
            owners: vec![Some(Player::One), Some(Player::Two)],
            troops: vec![10, 1],
            rounding_loss: [0.0; 2],
        };
        let mut queues = [vec![(0u32, 1u32, 10u32)], vec![(1u32, 0u32, 1u32)]];
        resolve_head_on(&map, &mut state, &mut queues).unwrap();
        // One loses ceil(0.6) = 1, Two loses 1: the survivors take the field
        assert_eq!(state.owners[1], Some(Player::One));
    }
}
