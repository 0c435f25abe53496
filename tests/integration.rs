//! Integration tests for the hegemon binary.
//!
//! Drives the compiled engine over a full scripted session: setup block on
//! stdin, one turn block per cycle, one action line per turn on stdout,
//! clean exit at end of input.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Feeds a scripted session to the engine and collects stdout lines.
fn run_engine(input: &str) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_hegemon");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start hegemon");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    stdin.write_all(input.as_bytes()).unwrap();
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// The two-region, four-field line map from the setup block onwards.
const SETUP: &str = "\
2
1 5
2 3
4
1 1
2 1
3 2
4 2
3
1 2
2 3
3 4
LOWER
";

const PICK_TURN: &str = "\
CHOOSE_STARTING_FIELDS
1 2
0 0
1 1
4
1 3 1
2 0 0
3 2 2
4 1 2
";

const DEPLOY_TURN: &str = "\
DEPLOY_TROOPS
2 2
6 5
0 0
4
1 3 1
2 1 1
3 2 2
4 1 2
";

const MOVE_TURN: &str = "\
MOVE_TROOPS
2 2
0 0
0 0
4
1 1 1
2 6 1
3 2 2
4 1 2
";

const QUIET_MOVE_TURN: &str = "\
MOVE_TROOPS
2 2
0 0
0 0
4
1 1 1
2 2 1
3 2 2
4 5 2
";

#[test]
fn full_session_emits_one_line_per_turn() {
    let input = format!("{SETUP}{PICK_TURN}{DEPLOY_TURN}{MOVE_TURN}{QUIET_MOVE_TURN}");
    let lines = run_engine(&input);
    assert_eq!(lines, vec!["PICK 2", "DEPLOY 2 6", "MOVE 2 3 4", "WAIT"]);
}

#[test]
fn pick_turn_takes_the_open_field() {
    let input = format!("{SETUP}{PICK_TURN}");
    let lines = run_engine(&input);
    assert_eq!(lines, vec!["PICK 2"]);
}

#[test]
fn deploy_turn_spends_the_whole_budget() {
    let input = format!("{SETUP}{DEPLOY_TURN}");
    let lines = run_engine(&input);
    assert_eq!(lines.len(), 1);

    let total: u32 = lines[0]
        .split(';')
        .map(|cmd| {
            let parts: Vec<&str> = cmd.split_whitespace().collect();
            assert_eq!(parts[0], "DEPLOY");
            parts[2].parse::<u32>().unwrap()
        })
        .sum();
    assert_eq!(total, 6);
}

#[test]
fn blocked_move_turn_waits() {
    let input = format!("{SETUP}{QUIET_MOVE_TURN}");
    let lines = run_engine(&input);
    assert_eq!(lines, vec!["WAIT"]);
}

#[test]
fn first_pick_respects_lower_priority() {
    let open_board = "\
CHOOSE_STARTING_FIELDS
0 0
0 0
2 2
4
1 0 0
2 0 0
3 0 0
4 0 0
";
    let input = format!("{SETUP}{open_board}");
    let lines = run_engine(&input);
    assert_eq!(lines, vec!["PICK 1"]);
}

#[test]
fn first_pick_respects_upper_priority() {
    let upper_setup = SETUP.replace("LOWER", "UPPER");
    let open_board = "\
CHOOSE_STARTING_FIELDS
0 0
0 0
2 2
4
1 0 0
2 0 0
3 0 0
4 0 0
";
    let input = format!("{upper_setup}{open_board}");
    let lines = run_engine(&input);
    assert_eq!(lines, vec!["PICK 3"]);
}

#[test]
fn end_of_input_after_setup_is_a_clean_exit() {
    let lines = run_engine(SETUP);
    assert!(lines.is_empty());
}

#[test]
fn unknown_turn_type_stops_the_loop() {
    let input = format!("{SETUP}END_TURN\n");
    let lines = run_engine(&input);
    assert!(lines.is_empty());
}

#[test]
fn turn_with_wrong_field_count_stops_the_loop() {
    let truncated = "\
MOVE_TROOPS
2 2
0 0
0 0
2
1 1 1
2 2 1
";
    let input = format!("{SETUP}{truncated}");
    let lines = run_engine(&input);
    assert!(lines.is_empty());
}
