//! Per-line syntax classification.
//!
//! Every line is classified independently: the tokenizer state resets to
//! `Normal` at the start of each line, so a block comment or string that
//! spans lines is only highlighted on the line where it opens.

pub mod language;

pub use language::{Language, LanguageProfile, SyntaxRegistry};

/// Category assigned to a single byte of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Keyword,
    String,
    Comment,
    Number,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    String(u8),
    BlockComment(&'static str),
    Number,
}

fn continues_number(b: u8) -> bool {
    b.is_ascii_digit() || b".xXaAbBcCeEfFuUlL".contains(&b)
}

fn starts_identifier(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn continues_identifier(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Classify every byte of `text`; the result always has `text.len()` entries.
pub fn highlight_line(text: &[u8], profile: &LanguageProfile) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; text.len()];
    if profile.is_plain() {
        return hl;
    }
    let mut state = State::Normal;
    let mut i = 0;
    while i < text.len() {
        let b = text[i];
        match state {
            State::String(delim) => {
                hl[i] = Highlight::String;
                if b == delim && text[i - 1] != b'\\' {
                    state = State::Normal;
                }
                i += 1;
            }
            State::BlockComment(end) => {
                if text[i..].starts_with(end.as_bytes()) {
                    hl[i..i + end.len()].fill(Highlight::Comment);
                    i += end.len();
                    state = State::Normal;
                } else {
                    hl[i] = Highlight::Comment;
                    i += 1;
                }
            }
            State::Number => {
                if continues_number(b) {
                    hl[i] = Highlight::Number;
                    i += 1;
                } else {
                    // Reclassify this byte from Normal without advancing.
                    state = State::Normal;
                }
            }
            State::Normal => {
                if profile.opens_string(b) {
                    hl[i] = Highlight::String;
                    state = State::String(b);
                    i += 1;
                    continue;
                }
                if let Some(marker) = profile.single_comment {
                    if text[i..].starts_with(marker.as_bytes()) {
                        hl[i..].fill(Highlight::Comment);
                        break;
                    }
                }
                if let Some((start, end)) = profile.block_comment {
                    if text[i..].starts_with(start.as_bytes()) {
                        hl[i..i + start.len()].fill(Highlight::Comment);
                        i += start.len();
                        state = State::BlockComment(end);
                        continue;
                    }
                }
                let leading_dot = b == b'.' && text.get(i + 1).is_some_and(u8::is_ascii_digit);
                if b.is_ascii_digit() || leading_dot {
                    hl[i] = Highlight::Number;
                    state = State::Number;
                    i += 1;
                    continue;
                }
                if starts_identifier(b) {
                    let start = i;
                    while i < text.len() && continues_identifier(text[i]) {
                        i += 1;
                    }
                    let word = &text[start..i];
                    let class = if profile.is_keyword(word) {
                        Highlight::Keyword
                    } else if profile.is_type(word) {
                        Highlight::Type
                    } else {
                        Highlight::Normal
                    };
                    hl[start..i].fill(class);
                    continue;
                }
                i += 1;
            }
        }
    }
    hl
}
