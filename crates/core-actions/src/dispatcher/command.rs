//! Prompt editing (Command / Search / Replace) and `:` command execution.
//!
//! Submitting a prompt always returns to Normal first; a command may then
//! move on to another mode (`w` without a name re-opens the prompt, `s`
//! enters Replace).

use super::command_parser::{CommandParser, ParsedCommand};
use super::mode::{enter_replace, set_mode};
use super::{DispatchResult, request_quit, search};
use crate::Action;
use crate::io_ops::{OpenFileResult, WriteFileResult, open_file, write_file};
use core_config::SetOutcome;
use core_state::{EditorState, Mode, ReplaceScope};
use core_text::Cursor;
use std::path::PathBuf;

pub(crate) fn handle_prompt_action(action: Action, state: &mut EditorState) -> DispatchResult {
    match action {
        Action::PromptChar(b) => {
            state.command_line.push_char(char::from(b));
            DispatchResult::dirty()
        }
        Action::PromptBackspace => {
            if !state.command_line.backspace() {
                set_mode(state, Mode::Normal);
            }
            DispatchResult::dirty()
        }
        Action::PromptCancel => {
            let msg = match state.mode {
                Mode::Command => "Command cancelled",
                Mode::Search => "Search mode exited",
                _ => "Replace cancelled",
            };
            state.command_line.clear();
            set_mode(state, Mode::Normal);
            state.set_status(msg);
            DispatchResult::dirty()
        }
        Action::PromptSubmit => {
            let raw = state.command_line.take();
            let mode = state.mode;
            set_mode(state, Mode::Normal);
            match mode {
                Mode::Command => execute_command(&raw, state),
                Mode::Search => search::submit_search(&raw, state),
                Mode::Replace => search::submit_replace(&raw, state),
                Mode::Normal | Mode::Insert => DispatchResult::dirty(),
            }
        }
        _ => DispatchResult::clean(),
    }
}

fn execute_command(raw: &str, state: &mut EditorState) -> DispatchResult {
    let parsed = CommandParser::parse(raw);
    tracing::debug!(target: "actions.dispatch", command = ?parsed, "execute_command");
    match parsed {
        ParsedCommand::Empty => DispatchResult::dirty(),
        ParsedCommand::Write(path) => save(state, path),
        ParsedCommand::Quit => request_quit(state),
        ParsedCommand::ForceQuit => DispatchResult::quit(),
        ParsedCommand::WriteQuit(path) => {
            if write(state, path) {
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
        ParsedCommand::Goto(Some(line)) => {
            goto_line(state, line);
            DispatchResult::dirty()
        }
        ParsedCommand::Goto(None) => DispatchResult::dirty(),
        ParsedCommand::Set(arg) => apply_set(state, &arg),
        ParsedCommand::Syntax(arg) => match arg.as_str() {
            "on" => apply_set(state, "syntax"),
            "off" => apply_set(state, "nosyntax"),
            other => {
                state.set_status(format!("Unknown option: {other}"));
                DispatchResult::dirty()
            }
        },
        ParsedCommand::Edit { path, force } => edit(state, path, force),
        ParsedCommand::Help => {
            state.set_status(concat!(
                "ted v",
                env!("CARGO_PKG_VERSION"),
                " | Ctrl+Q=quit Ctrl+S=save Ctrl+F=search Ctrl+G=goto"
            ));
            DispatchResult::dirty()
        }
        ParsedCommand::Substitute { query, all } => {
            if let Some(q) = query {
                state.search.update_query(q, &state.document);
            }
            let scope = if all {
                ReplaceScope::All
            } else {
                ReplaceScope::Current
            };
            enter_replace(state, scope)
        }
        ParsedCommand::Unknown(name) => {
            state.set_status(format!("Unknown command: {name}"));
            DispatchResult::dirty()
        }
    }
}

/// `:w` and Ctrl+S.
pub(crate) fn save(state: &mut EditorState, path: Option<PathBuf>) -> DispatchResult {
    write(state, path);
    DispatchResult::dirty()
}

/// Returns true when the document reached disk.
fn write(state: &mut EditorState, path: Option<PathBuf>) -> bool {
    match write_file(state, path) {
        WriteFileResult::Success { lines } => {
            state.set_status(format!("Saved {lines} lines"));
            true
        }
        WriteFileResult::NoFilename => {
            tracing::debug!(target: "actions.dispatch", "write_no_filename");
            state.command_line.begin("w ");
            set_mode(state, Mode::Command);
            state.set_status("Enter filename:");
            false
        }
        WriteFileResult::Error(e) => {
            state.set_status(format!("Save failed: {e}"));
            false
        }
    }
}

fn edit(state: &mut EditorState, path: Option<PathBuf>, force: bool) -> DispatchResult {
    let Some(path) = path else {
        state.set_status("No filename specified");
        return DispatchResult::dirty();
    };
    if state.document.is_modified() && !force {
        state.set_status("Unsaved changes! Use :w first or :e! to force");
        return DispatchResult::dirty();
    }
    match open_file(&path) {
        OpenFileResult::Success(doc) => {
            let lines = doc.line_count();
            state.replace_document(doc);
            state.set_status(format!("Opened - {lines} lines"));
            DispatchResult::full_redraw()
        }
        OpenFileResult::Error(e) => {
            state.set_status(format!("Open failed: {e}"));
            DispatchResult::dirty()
        }
    }
}

fn apply_set(state: &mut EditorState, arg: &str) -> DispatchResult {
    match state.options.apply_set(arg) {
        SetOutcome::Changed(msg) => state.set_status(msg),
        SetOutcome::TabWidth(n) => {
            state.sync_cursor();
            state.set_status(format!("Tab width set to {n}"));
        }
        SetOutcome::Unknown(opt) => state.set_status(format!("Unknown option: {opt}")),
    }
    DispatchResult::dirty()
}

/// Jump to 1-based `line` (clamped) and centre it without scrolling past
/// the end of the document.
fn goto_line(state: &mut EditorState, line: usize) {
    let count = state.document.line_count();
    let row = line.clamp(1, count) - 1;
    state.selection.clear();
    state.cursor = Cursor::new(row, 0);
    state.center_on(row);
    if state.row_offset + state.screen_rows > count {
        state.row_offset = count.saturating_sub(state.screen_rows);
    }
    state.sync_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Options;
    use core_text::Document;

    fn state(text: &[u8]) -> EditorState {
        let mut st = EditorState::new(Document::from_bytes(text), Options::default());
        st.resize(12, 80);
        st
    }

    fn run(st: &mut EditorState, cmd: &str) -> DispatchResult {
        st.mode = Mode::Command;
        st.command_line.begin(cmd);
        handle_prompt_action(Action::PromptSubmit, st)
    }

    #[test]
    fn unknown_command_names_token() {
        let mut st = state(b"");
        run(&mut st, "frobnicate now");
        assert_eq!(st.status_text(), Some("Unknown command: frobnicate"));
        assert_eq!(st.mode, Mode::Normal);
    }

    #[test]
    fn set_toggles_options() {
        let mut st = state(b"");
        run(&mut st, "set nonu");
        assert!(!st.options.show_line_numbers);
        assert_eq!(st.status_text(), Some("Line numbers disabled"));
        run(&mut st, "syntax off");
        assert!(!st.options.syntax_enabled);
        run(&mut st, "set bogus");
        assert_eq!(st.status_text(), Some("Unknown option: bogus"));
    }

    #[test]
    fn goto_clamps_and_centres() {
        let text = vec![b"x".as_slice(); 100].join(&b'\n');
        let mut st = state(&text);
        run(&mut st, "goto 50");
        assert_eq!(st.cursor.row, 49);
        assert_eq!(st.row_offset, 44);
        run(&mut st, "g 1000");
        assert_eq!(st.cursor.row, 99);
        assert_eq!(st.row_offset, 90);
        run(&mut st, "g 0");
        assert_eq!(st.cursor.row, 0);
        assert_eq!(st.row_offset, 0);
    }

    #[test]
    fn write_without_name_reprompts() {
        let mut st = state(b"abc");
        run(&mut st, "w");
        assert_eq!(st.mode, Mode::Command);
        assert_eq!(st.command_line.buffer(), "w ");
        assert_eq!(st.status_text(), Some("Enter filename:"));
    }

    #[test]
    fn write_quit_only_quits_after_successful_save() {
        let mut st = state(b"abc");
        st.document.set_modified(true);
        assert!(!run(&mut st, "wq").quit);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        let res = run(&mut st, &format!("wq {}", path.display()));
        assert!(res.quit);
        assert_eq!(std::fs::read(&path).unwrap(), b"abc\n");
    }

    #[test]
    fn edit_is_guarded_by_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let mut st = state(b"abc");
        st.document.set_modified(true);
        run(&mut st, &format!("e {}", path.display()));
        assert_eq!(
            st.status_text(),
            Some("Unsaved changes! Use :w first or :e! to force")
        );
        assert_eq!(st.document.get_line(0), b"abc");
        let res = run(&mut st, &format!("e! {}", path.display()));
        assert!(res.full_redraw);
        assert_eq!(st.document.line_count(), 2);
        assert_eq!(st.status_text(), Some("Opened - 2 lines"));
        run(&mut st, "e");
        assert_eq!(st.status_text(), Some("No filename specified"));
    }

    #[test]
    fn backspace_on_empty_prompt_cancels() {
        let mut st = state(b"");
        st.mode = Mode::Command;
        st.command_line.begin("a");
        handle_prompt_action(Action::PromptBackspace, &mut st);
        assert_eq!(st.mode, Mode::Command);
        handle_prompt_action(Action::PromptBackspace, &mut st);
        assert_eq!(st.mode, Mode::Normal);
    }

    #[test]
    fn escape_clears_buffer() {
        let mut st = state(b"");
        st.mode = Mode::Search;
        st.command_line.begin("abc");
        handle_prompt_action(Action::PromptCancel, &mut st);
        assert!(st.command_line.is_empty());
        assert_eq!(st.mode, Mode::Normal);
        assert_eq!(st.status_text(), Some("Search mode exited"));
    }

    #[test]
    fn substitute_enters_replace_with_query() {
        let mut st = state(b"foo foo");
        run(&mut st, "%s foo");
        assert_eq!(st.mode, Mode::Replace);
        assert_eq!(st.replace_scope, ReplaceScope::All);
        assert_eq!(st.search.match_count(), 2);
    }
}
