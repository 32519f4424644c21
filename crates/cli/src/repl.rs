//! Query loop with rustyline.
//!
//! Interactive mode: prompt, history, meta-commands.
//! Pipe mode: read queries from stdin, one per line.

use std::io::{self, BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::format::{format_results, format_stats};
use crate::parse::{classify_line, LineAction, MetaCommand};
use crate::state::SessionState;

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run the interactive REPL.
pub fn run_repl(state: &SessionState) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("(error) failed to start line editor: {}", e);
            return;
        }
    };

    let history_path = history_file();
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    println!(
        "{} document(s) indexed with the {} engine. Type .help for commands.",
        state.documents(),
        state.engine_kind().as_str()
    );

    let stdout = io::stdout();
    loop {
        match rl.readline("sift> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim());
                }
                match handle_line(state, &line, &mut stdout.lock()) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => {
                        eprintln!("(error) {}", e);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: show a new prompt
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D: exit
                break;
            }
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        let _ = rl.save_history(path);
    }
}

/// Run in pipe mode: answer each line of `input` on `output`.
///
/// Returns the process exit code.
pub fn run_pipe<R: BufRead, W: Write>(state: &SessionState, input: R, output: &mut W) -> i32 {
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("(error) failed to read input: {}", e);
                return 1;
            }
        };
        match handle_line(state, &line, output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => {
                eprintln!("(error) {}", e);
                return 1;
            }
        }
    }
    0
}

/// Answer one input line.
pub fn handle_line<W: Write>(state: &SessionState, line: &str, out: &mut W) -> io::Result<Flow> {
    match classify_line(line) {
        LineAction::Skip => {}
        LineAction::Query(query) => {
            let results = state.search(query);
            writeln!(out, "{}", format_results(&results))?;
        }
        LineAction::Meta(MetaCommand::Quit) => return Ok(Flow::Quit),
        LineAction::Meta(MetaCommand::Help) => print_help(out)?,
        LineAction::Meta(MetaCommand::Stats) => {
            writeln!(out, "{}", format_stats(state.cache_stats()))?;
        }
        LineAction::Meta(MetaCommand::Clear) => {
            // ANSI clear screen
            write!(out, "\x1B[2J\x1B[1;1H")?;
        }
        LineAction::Unknown(cmd) => {
            writeln!(out, "(error) unknown command {}, try .help", cmd)?;
        }
    }
    out.flush()?;
    Ok(Flow::Continue)
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.sift_history", h))
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Type words to find the documents containing all of them.")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  .stats      Cache statistics")?;
    writeln!(out, "  .clear      Clear the screen")?;
    writeln!(out, "  .help       This help")?;
    writeln!(out, "  .quit       Exit (also .exit, Ctrl-D)")
}
