//! Parallel self-play match generation.
//!
//! Plays full matches between two planner instances on generated symmetric
//! maps, one rayon task per match, and aggregates the outcomes. Nothing is
//! shared between matches and individual games are not recorded; only the
//! aggregate summary leaves this module.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use crate::sim::{play_match, symmetric_map, MatchOutcome, Player};

/// Configuration for a self-play run.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of matches to play.
    pub num_matches: usize,
    /// Fields per map half.
    pub half_fields: u32,
    /// Turn cap per match.
    pub max_turns: u32,
    /// Number of parallel threads.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_matches: 20,
            half_fields: 10,
            max_turns: 60,
            threads: 4,
            seed: 0,
        }
    }
}

/// Aggregate results of a self-play run.
#[derive(Debug, Clone, Serialize)]
pub struct SelfPlaySummary {
    pub matches: usize,
    pub first_player_wins: usize,
    pub second_player_wins: usize,
    pub draws: usize,
    pub avg_turns: f64,
}

/// Plays the configured number of matches in parallel.
pub fn run_self_play(config: &SelfPlayConfig) -> SelfPlaySummary {
    let base_seed = if config.seed == 0 {
        SmallRng::from_entropy().gen()
    } else {
        config.seed
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build thread pool");

    let outcomes: Vec<MatchOutcome> = pool.install(|| {
        (0..config.num_matches)
            .into_par_iter()
            .map(|i| {
                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                let map = symmetric_map(config.half_fields, &mut rng);
                play_match(&map, config.max_turns, &mut rng)
                    .expect("generated maps are playable")
            })
            .collect()
    });

    summarize(&outcomes)
}

/// Folds match outcomes into a summary.
pub fn summarize(outcomes: &[MatchOutcome]) -> SelfPlaySummary {
    let first_player_wins = outcomes
        .iter()
        .filter(|o| o.winner == Some(Player::One))
        .count();
    let second_player_wins = outcomes
        .iter()
        .filter(|o| o.winner == Some(Player::Two))
        .count();
    let draws = outcomes.len() - first_player_wins - second_player_wins;
    let avg_turns = if outcomes.is_empty() {
        0.0
    } else {
        outcomes.iter().map(|o| f64::from(o.turns)).sum::<f64>() / outcomes.len() as f64
    };

    SelfPlaySummary {
        matches: outcomes.len(),
        first_player_wins,
        second_player_wins,
        draws,
        avg_turns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(winner: Option<Player>, turns: u32) -> MatchOutcome {
        MatchOutcome {
            winner,
            turns,
            final_fields: [0, 0],
        }
    }

    #[test]
    fn summary_counts_wins_and_draws() {
        let outcomes = vec![
            outcome(Some(Player::One), 10),
            outcome(Some(Player::Two), 20),
            outcome(Some(Player::One), 30),
            outcome(None, 40),
        ];
        let summary = summarize(&outcomes);
        assert_eq!(summary.matches, 4);
        assert_eq!(summary.first_player_wins, 2);
        assert_eq!(summary.second_player_wins, 1);
        assert_eq!(summary.draws, 1);
        assert_eq!(summary.avg_turns, 25.0);
    }

    #[test]
    fn empty_run_summarizes_to_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.avg_turns, 0.0);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = SelfPlayConfig {
            num_matches: 3,
            half_fields: 6,
            max_turns: 30,
            threads: 1,
            seed: 7,
        };
        let a = run_self_play(&config);
        let b = run_self_play(&config);
        assert_eq!(a.first_player_wins, b.first_player_wins);
        assert_eq!(a.second_player_wins, b.second_player_wins);
        assert_eq!(a.avg_turns, b.avg_turns);
    }

    #[test]
    fn summary_serializes_to_json() {
        let summary = summarize(&[outcome(Some(Player::One), 12)]);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"first_player_wins\":1"));
        assert!(json.contains("\"matches\":1"));
    }
}
