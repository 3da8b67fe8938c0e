//! Terminal ownership: raw mode, alternate screen and viewport size.
//!
//! The editor core never touches the terminal; the binary enters it through
//! a [`TerminalGuard`] so that any early return or panic unwind restores the
//! user's shell.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::stdout;

pub trait TerminalBackend {
    fn enter(&mut self) -> Result<()>;
    fn leave(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// `(rows, cols)` of the visible area.
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    entered: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self { entered: false }
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter(&mut self) -> Result<()> {
        if !self.entered {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
            self.entered = true;
            tracing::debug!(target: "runtime", "terminal_enter");
        }
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if self.entered {
            execute!(stdout(), LeaveAlternateScreen, Show)?;
            disable_raw_mode()?;
            self.entered = false;
            tracing::debug!(target: "runtime", "terminal_leave");
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }
}

impl Drop for CrosstermBackend {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// RAII guard: enters the backend on creation and leaves it on drop.
pub struct TerminalGuard<B: TerminalBackend> {
    backend: B,
}

impl<B: TerminalBackend> TerminalGuard<B> {
    pub fn enter(mut backend: B) -> Result<Self> {
        backend.enter()?;
        Ok(Self { backend })
    }

    pub fn backend(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn size(&self) -> Result<(u16, u16)> {
        self.backend.size()
    }
}

impl<B: TerminalBackend> Drop for TerminalGuard<B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.leave() {
            tracing::error!(target: "runtime", error = %e, "terminal_restore_failed");
        }
    }
}
