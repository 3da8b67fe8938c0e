//! Terminal writer: an ordered command buffer flushed in one go.
//!
//! Commands preserve ordering and positions are absolute with a (0,0)
//! origin. Nothing reaches the output until `flush`, so a frame is either
//! written whole or (on an I/O error) abandoned.

use crate::style::Style;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    HideCursor,
    ShowCursor,
    ClearAll,
    MoveTo(u16, u16),
    /// Clear from the current position to the end of the line.
    ClearToEol,
    SetStyle(Style),
    Print(String),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
    style: Style,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_to_eol(&mut self) {
        self.cmds.push(Command::ClearToEol);
    }

    /// Switch style only when it differs from the active one.
    pub fn set_style(&mut self, style: Style) {
        if style != self.style {
            self.style = style;
            self.cmds.push(Command::SetStyle(style));
        }
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Printed text per screen row, reconstructed from `MoveTo` + `Print`.
    /// Rows never moved to are empty.
    pub fn row_texts(&self, height: u16) -> Vec<String> {
        let mut rows = vec![String::new(); usize::from(height)];
        let mut y = 0usize;
        for cmd in &self.cmds {
            match cmd {
                Command::MoveTo(_, row) => y = usize::from(*row),
                Command::Print(s) => {
                    if let Some(r) = rows.get_mut(y) {
                        r.push_str(s);
                    }
                }
                _ => {}
            }
        }
        rows
    }

    pub fn flush<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::HideCursor => queue!(out, Hide)?,
                Command::ShowCursor => queue!(out, Show)?,
                Command::ClearAll => queue!(out, Clear(ClearType::All))?,
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearToEol => queue!(out, Clear(ClearType::UntilNewLine))?,
                Command::SetStyle(style) => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if let Some(fg) = style.fg {
                        queue!(out, SetForegroundColor(fg))?;
                    }
                    if style.reverse {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                }
                Command::Print(s) => queue!(out, Print(s))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
