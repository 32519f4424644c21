//! Input line classification.
//!
//! Meta-commands start with a dot so that words like "help" or "quit"
//! remain searchable.

/// A REPL meta-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    /// `.quit` / `.exit`
    Quit,
    /// `.help`
    Help,
    /// `.stats`: print cache statistics
    Stats,
    /// `.clear`: clear the screen
    Clear,
}

/// What to do with one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction<'a> {
    /// Nothing to do (blank line or `#` comment)
    Skip,
    /// A meta-command
    Meta(MetaCommand),
    /// Unrecognized dot-command
    Unknown(&'a str),
    /// A raw query, passed to the engine untrimmed
    Query(&'a str),
}

/// Classify a line read from the prompt or from stdin.
pub fn classify_line(line: &str) -> LineAction<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineAction::Skip;
    }
    if !trimmed.starts_with('.') {
        return LineAction::Query(line);
    }

    match trimmed {
        ".quit" | ".exit" => LineAction::Meta(MetaCommand::Quit),
        ".help" => LineAction::Meta(MetaCommand::Help),
        ".stats" => LineAction::Meta(MetaCommand::Stats),
        ".clear" => LineAction::Meta(MetaCommand::Clear),
        other => LineAction::Unknown(other),
    }
}
