//! Hegemon -- a territory-control engine speaking the referee's protocol.
//!
//! Reads the setup block once and then one turn block per cycle from
//! stdin, writing one action line per turn to stdout. Runs until input is
//! exhausted. Protocol violations are fail-fast: the diagnostic goes to
//! stderr and the loop stops.

use std::io::{self, BufWriter};

use hegemon::engine::Engine;
use hegemon::protocol::input::{read_setup, read_turn, TokenReader};

fn main() {
    let stdin = io::stdin();
    let mut reader = TokenReader::new(stdin.lock());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let setup = match read_setup(&mut reader) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("setup: {}", e);
            return;
        }
    };

    let engine = match Engine::from_setup(&setup) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("setup: {}", e);
            return;
        }
    };

    loop {
        let report = match read_turn(&mut reader) {
            Ok(Some(report)) => report,
            Ok(None) => break,
            Err(e) => {
                eprintln!("turn: {}", e);
                break;
            }
        };
        if let Err(e) = engine.handle_turn(&report, &mut out) {
            eprintln!("turn: {}", e);
            break;
        }
    }
}
