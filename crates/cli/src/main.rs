//! sift: load a corpus directory and answer keyword queries.
//!
//! Two modes:
//! - **REPL mode**: `sift [flags]`, interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "the cat" | sift`, one query per stdin line

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::{self, IsTerminal};
use std::process;

use tracing::Level;

use commands::build_cli;
use state::{load_config, SessionState};

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let state = match SessionState::open(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Failed to load corpus: {}", e);
            process::exit(1);
        }
    };

    if io::stdin().is_terminal() {
        repl::run_repl(&state);
    } else {
        let stdin = io::stdin();
        let exit_code = repl::run_pipe(&state, stdin.lock(), &mut io::stdout());
        process::exit(exit_code);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}
