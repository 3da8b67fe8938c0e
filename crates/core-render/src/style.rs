//! Cell styling: syntax colours plus reverse-video overlays.

use crate::CellFlags;
use core_syntax::Highlight;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub reverse: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        fg: None,
        reverse: false,
    };

    pub const BAR: Style = Style {
        fg: None,
        reverse: true,
    };

    pub fn for_cell(highlight: Highlight, flags: CellFlags) -> Self {
        let fg = if flags.contains(CellFlags::GUTTER) || flags.contains(CellFlags::WHITESPACE) {
            Some(Color::DarkGrey)
        } else if flags.contains(CellFlags::FILLER) {
            Some(Color::Blue)
        } else {
            highlight_color(highlight)
        };
        Style {
            fg,
            reverse: flags.intersects(CellFlags::SELECTED | CellFlags::CONTROL),
        }
    }
}

pub fn highlight_color(highlight: Highlight) -> Option<Color> {
    match highlight {
        Highlight::Normal => None,
        Highlight::Keyword => Some(Color::Yellow),
        Highlight::Type => Some(Color::Green),
        Highlight::String => Some(Color::Magenta),
        Highlight::Number => Some(Color::Red),
        Highlight::Comment => Some(Color::Cyan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_reverses_but_keeps_syntax_colour() {
        let s = Style::for_cell(Highlight::Keyword, CellFlags::SELECTED);
        assert_eq!(s.fg, Some(Color::Yellow));
        assert!(s.reverse);
    }

    #[test]
    fn gutter_ignores_highlight() {
        let s = Style::for_cell(Highlight::String, CellFlags::GUTTER);
        assert_eq!(s, Style { fg: Some(Color::DarkGrey), reverse: false });
        assert_eq!(Style::for_cell(Highlight::Normal, CellFlags::empty()), Style::PLAIN);
    }
}
