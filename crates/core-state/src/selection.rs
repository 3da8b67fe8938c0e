use core_text::Cursor;

/// Shift-extended character selection between an anchor and the live cursor.
///
/// The anchor is fixed when the selection starts; the other end is always
/// the current cursor, so the span is only meaningful together with it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionModel {
    anchor: Option<Cursor>,
}

impl SelectionModel {
    pub fn start(&mut self, at: Cursor) {
        self.anchor = Some(at);
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Cursor> {
        self.anchor
    }

    /// Ordered (start, end) with `start <= end` by (row, col); `end` is
    /// exclusive. `None` when inactive or empty.
    pub fn range(&self, cursor: Cursor) -> Option<(Cursor, Cursor)> {
        let anchor = self.anchor?;
        let (a, b) = if anchor.key() <= cursor.key() {
            (anchor, cursor)
        } else {
            (cursor, anchor)
        };
        (a.key() != b.key()).then_some((a, b))
    }

    /// True when byte (row, col) lies inside the selection.
    pub fn contains(&self, cursor: Cursor, row: usize, col: usize) -> bool {
        match self.range(cursor) {
            Some((s, e)) => (row, col) >= s.key() && (row, col) < e.key(),
            None => false,
        }
    }
}
