//! Self-play CLI.
//!
//! Plays matches between two planner instances on generated symmetric maps
//! and prints a JSON summary of the outcomes to stdout.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --matches N     Number of matches to play (default: 20)
//!   --fields N      Fields per map half (default: 10)
//!   --max-turns N   Turn cap per match (default: 60)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --quiet         Suppress progress output

use std::env;
use std::time::Instant;

use hegemon::selfplay::{run_self_play, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--matches" => {
                i += 1;
                config.num_matches = args[i].parse().expect("invalid --matches value");
            }
            "--fields" => {
                i += 1;
                config.half_fields = args[i].parse().expect("invalid --fields value");
            }
            "--max-turns" => {
                i += 1;
                config.max_turns = args[i].parse().expect("invalid --max-turns value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !quiet {
        eprintln!(
            "Self-play: {} matches, {} fields per half, turn cap {}, {} threads",
            config.num_matches, config.half_fields, config.max_turns, config.threads
        );
    }

    let start = Instant::now();
    let summary = run_self_play(&config);
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} matches in {:.1}s ({} / {} / {} draws)",
            summary.matches,
            elapsed.as_secs_f64(),
            summary.first_player_wins,
            summary.second_player_wins,
            summary.draws
        );
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --matches N     Number of matches to play (default: 20)");
    eprintln!("  --fields N      Fields per map half (default: 10)");
    eprintln!("  --max-turns N   Turn cap per match (default: 60)");
    eprintln!("  --threads N     Number of parallel threads (default: 4)");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --quiet         Suppress progress output");
    eprintln!("  --help          Show this help");
}
