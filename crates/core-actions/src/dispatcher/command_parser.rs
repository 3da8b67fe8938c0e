//! Structured command line parsing.
//!
//! The first space-delimited token names the command; the remainder is
//! its argument. Parsing is pure classification: side effects live in
//! `command.rs`.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Empty,
    Write(Option<PathBuf>),
    Quit,
    ForceQuit,
    WriteQuit(Option<PathBuf>),
    /// 1-based target line; `None` when no argument was given.
    Goto(Option<usize>),
    Set(String),
    Syntax(String),
    Edit { path: Option<PathBuf>, force: bool },
    Help,
    /// `s [query]` or `%s [query]`; the query keeps its inner spaces.
    Substitute { query: Option<String>, all: bool },
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> ParsedCommand {
        let body = raw.trim_start();
        if body.trim().is_empty() {
            return ParsedCommand::Empty;
        }
        let (name, arg) = match body.split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (body, ""),
        };
        let path = || {
            let p = arg.trim();
            (!p.is_empty()).then(|| PathBuf::from(p))
        };
        match name {
            "w" | "write" => ParsedCommand::Write(path()),
            "q" | "quit" => ParsedCommand::Quit,
            "q!" | "quit!" => ParsedCommand::ForceQuit,
            "wq" => ParsedCommand::WriteQuit(path()),
            "goto" | "g" => ParsedCommand::Goto(parse_line_number(arg)),
            "set" => ParsedCommand::Set(arg.trim().to_string()),
            "syntax" => ParsedCommand::Syntax(arg.trim().to_string()),
            "e" | "edit" => ParsedCommand::Edit {
                path: path(),
                force: false,
            },
            "e!" | "edit!" => ParsedCommand::Edit {
                path: path(),
                force: true,
            },
            "help" | "h" => ParsedCommand::Help,
            "s" | "%s" => ParsedCommand::Substitute {
                query: (!arg.is_empty()).then(|| arg.to_string()),
                all: name == "%s",
            },
            other => ParsedCommand::Unknown(other.to_string()),
        }
    }
}

/// Digits of `arg` read as a decimal number, ignoring any other bytes.
fn parse_line_number(arg: &str) -> Option<usize> {
    let arg = arg.trim();
    if arg.is_empty() {
        return None;
    }
    Some(
        arg.bytes()
            .filter(u8::is_ascii_digit)
            .fold(0usize, |n, d| n.saturating_mul(10).saturating_add((d - b'0') as usize)),
    )
}
