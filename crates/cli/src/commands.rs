//! Clap command definition.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command};

/// Build the CLI command.
pub fn build_cli() -> Command {
    Command::new("sift")
        .about("Load a corpus and answer conjunctive keyword queries, one per line")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to sift.toml (default: ./sift.toml if present)"),
        )
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .help("Corpus directory, overrides corpus_dir from the config"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .help("Search strategy")
                .value_parser(PossibleValuesParser::new(["inverted", "bag_of_words", "simple"])),
        )
        .arg(
            Arg::new("cache-capacity")
                .long("cache-capacity")
                .help("Maximum number of cached queries (default: 32)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Disable the query cache")
                .action(ArgAction::SetTrue)
                .conflicts_with("cache-capacity"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Debug logging on stderr (cache hits, ingestion)")
                .action(ArgAction::SetTrue),
        )
}
