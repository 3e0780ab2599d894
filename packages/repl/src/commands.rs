//! REPL directive parsing.
//!
//! Directives:
//! - `help` - Show help
//! - `copy` - Copy the last result to the clipboard
//! - `mode <sql|es|enrich>` - Switch query mode
//! - `set <var> <value>` - Change a setting (`size`, `offset`, `pretty`, ...)
//!
//! Directive keywords are matched case-insensitively on the first word.
//! Every other line is query text for the active mode.

use nu_ansi_term::{Color, Style};

use pdl_http::Mode;

use crate::config::Setting;

/// Directive keywords, in the order they appear in help.
pub const DIRECTIVES: [&str; 4] = ["mode", "set", "copy", "help"];

/// A classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Help,
    Copy,
    ModeChange(Mode),
    SetVar(Setting),
    Query(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    /// Malformed directive; nothing was changed.
    #[error("Invalid {0} command")]
    Parse(&'static str),

    /// Well-formed directive naming a mode that does not exist.
    #[error("Invalid mode '{0}'. Valid modes are: {valid}", valid = Mode::names())]
    InvalidMode(String),
}

/// Classify one input line.
pub fn parse(input: &str) -> Result<Directive, DirectiveError> {
    let input = input.trim();

    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };

    match keyword.to_ascii_lowercase().as_str() {
        "help" if rest.is_empty() => Ok(Directive::Help),
        "copy" if rest.is_empty() => Ok(Directive::Copy),
        "mode" => parse_mode(rest).map(Directive::ModeChange),
        "set" => parse_set(rest).map(Directive::SetVar),
        _ => Ok(Directive::Query(input.to_string())),
    }
}

/// `mode <name>`: exactly one argument naming a mode.
fn parse_mode(args: &str) -> Result<Mode, DirectiveError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        [name] => name
            .parse::<Mode>()
            .map_err(|_| DirectiveError::InvalidMode(name.to_string())),
        _ => Err(DirectiveError::Parse("mode")),
    }
}

/// `set <var> <value>`: an alphabetic name, whitespace, then the rest of the
/// line as the value.
fn parse_set(args: &str) -> Result<Setting, DirectiveError> {
    let (name, value) = args
        .split_once(char::is_whitespace)
        .map(|(name, value)| (name, value.trim()))
        .ok_or(DirectiveError::Parse("set"))?;

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) || value.is_empty() {
        return Err(DirectiveError::Parse("set"));
    }

    let invalid = || DirectiveError::Parse("set");

    match name.to_ascii_lowercase().as_str() {
        "size" => value.parse().map(Setting::Size).map_err(|_| invalid()),
        "offset" => value.parse().map(Setting::Offset).map_err(|_| invalid()),
        "pretty" => Ok(Setting::Pretty(value.eq_ignore_ascii_case("true"))),
        "mode" => value
            .parse::<Mode>()
            .map(Setting::Mode)
            .map_err(|_| DirectiveError::InvalidMode(value.to_string())),
        _ => Ok(Setting::Other {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Format help text
pub fn format_help() -> String {
    let cmd_style = Style::new().bold().fg(Color::Cyan);
    let arg_style = Style::new().fg(Color::Yellow);

    let commands = [
        ("mode", "[sql|es|enrich]", "change REPL mode"),
        ("set", "[size|offset|pretty] <value>", "change settings"),
        ("copy", "", "copy last result to clipboard"),
    ];

    commands
        .iter()
        .map(|(cmd, args, desc)| {
            let usage = if args.is_empty() {
                cmd_style.paint(*cmd).to_string()
            } else {
                format!("{} {}", cmd_style.paint(*cmd), arg_style.paint(*args))
            };
            format!("{}\n\t{}", usage, desc)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
