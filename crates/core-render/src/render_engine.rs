//! RenderEngine: builds a full frame from `EditorState` and flushes it.
//!
//! Every frame repaints all rows, overwriting in place and clearing to end
//! of line, so stale text never survives. A full clear of the screen is
//! only issued on the first frame, after a size change, or when the caller
//! asks for one (`Ctrl+L`, opening another file).

use crate::status::{compose_status, format_status};
use crate::style::Style;
use crate::writer::{Command, Writer};
use crate::{compose_text_row, cursor_position, message_line};
use anyhow::Result;
use core_state::EditorState;
use std::io::Write;

#[derive(Debug, Default)]
pub struct RenderEngine {
    last_size: Option<(usize, usize)>,
    frames: u64,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Assemble the frame without emitting it.
    pub fn build_frame(&mut self, state: &EditorState, force_full: bool) -> Writer {
        let size = (state.screen_rows, state.screen_cols);
        let full = force_full || self.last_size != Some(size);
        self.last_size = Some(size);

        let mut w = Writer::new();
        w.push(Command::HideCursor);
        if full {
            w.push(Command::ClearAll);
        }
        for y in 0..state.screen_rows {
            w.move_to(0, to_u16(y));
            paint_cells(&mut w, state, y);
            w.set_style(Style::PLAIN);
            w.clear_to_eol();
        }

        let bar_y = to_u16(state.screen_rows);
        w.move_to(0, bar_y);
        w.set_style(Style::BAR);
        w.print(format_status(&compose_status(state), state.screen_cols));
        w.set_style(Style::PLAIN);

        w.move_to(0, bar_y.saturating_add(1));
        let (msg, _) = message_line(state);
        w.print(msg.chars().take(state.screen_cols).collect::<String>());
        w.clear_to_eol();

        let (cx, cy) = cursor_position(state);
        w.move_to(cx, cy);
        w.push(Command::ShowCursor);

        self.frames += 1;
        tracing::trace!(target: "render", frame = self.frames, full, rows = state.screen_rows, cols = state.screen_cols, "frame");
        w
    }

    pub fn render<W: Write>(
        &mut self,
        state: &EditorState,
        out: &mut W,
        force_full: bool,
    ) -> Result<()> {
        self.build_frame(state, force_full).flush(out)
    }
}

/// Emit one text row, batching runs of equally styled cells into a single
/// `Print`.
fn paint_cells(w: &mut Writer, state: &EditorState, y: usize) {
    let mut run = String::new();
    let mut run_style = Style::PLAIN;
    for cell in compose_text_row(state, y) {
        let style = Style::for_cell(cell.highlight, cell.flags);
        if style != run_style && !run.is_empty() {
            w.set_style(run_style);
            w.print(std::mem::take(&mut run));
        }
        run_style = style;
        run.push(cell.ch);
    }
    if !run.is_empty() {
        w.set_style(run_style);
        w.print(run);
    }
}

fn to_u16(v: usize) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX)
}
