//! Character-cell drawing surface.
//!
//! The scene renders into a [`Frame`], which the terminal then presents in
//! one go. Anything that can take glyph writes implements [`Surface`].

use crate::render::CellWrite;

/// A grid of character cells the scene can be drawn on.
pub(crate) trait Surface {
    /// (columns, rows)
    fn size(&self) -> (u16, u16);

    /// Write a single glyph. `inverted` swaps foreground and background, so a
    /// blank glyph shows as a solid block. Writes outside the surface are dropped.
    fn draw_glyph(&mut self, column: u16, row: u16, glyph: &'static str, inverted: bool);

    /// Write a run of characters left to right starting at (column, row).
    fn draw_text(&mut self, column: u16, row: u16, text: &str);

    fn apply(&mut self, cells: &[CellWrite]) {
        for cell in cells {
            self.draw_glyph(cell.column, cell.row, cell.glyph, cell.inverted);
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct Cell {
    pub glyph: String,
    pub inverted: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: " ".into(),
            inverted: false,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub(crate) struct Frame {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Blank every cell, reallocating if the size changed.
    pub fn reset(&mut self, width: u16, height: u16) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        } else {
            self.cells.fill(Cell::default());
        }
    }

    #[cfg(test)]
    pub fn cell(&self, column: u16, row: u16) -> Option<&Cell> {
        self.idx(column, row).map(|idx| &self.cells[idx])
    }

    /// the cells of one row, left to right
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// one row as plain text, ignoring inversion
    #[cfg(test)]
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|cell| cell.glyph.as_str()).collect()
    }

    fn idx(&self, column: u16, row: u16) -> Option<usize> {
        (column < self.width && row < self.height)
            .then(|| row as usize * self.width as usize + column as usize)
    }
}

impl Surface for Frame {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn draw_glyph(&mut self, column: u16, row: u16, glyph: &'static str, inverted: bool) {
        if let Some(idx) = self.idx(column, row) {
            let cell = &mut self.cells[idx];
            cell.glyph.clear();
            cell.glyph.push_str(glyph);
            cell.inverted = inverted;
        }
    }

    fn draw_text(&mut self, column: u16, row: u16, text: &str) {
        for (offset, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            let Some(idx) = column.checked_add(offset).and_then(|c| self.idx(c, row)) else {
                break;
            };

            let cell = &mut self.cells[idx];
            cell.glyph.clear();
            cell.glyph.push(ch);
            cell.inverted = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_blank() {
        let frame = Frame::new(3, 2);
        assert_eq!(frame.size(), (3, 2));
        assert_eq!(frame.row_text(0), "   ");
        assert_eq!(frame.row_text(1), "   ");
    }

    #[test]
    fn glyphs_outside_are_dropped() {
        let mut frame = Frame::new(2, 2);
        frame.draw_glyph(2, 0, "x", false);
        frame.draw_glyph(0, 2, "x", false);
        frame.draw_glyph(1, 1, "\u{2584}", true);
        assert_eq!(frame.row_text(0), "  ");
        assert_eq!(
            frame.cell(1, 1),
            Some(&Cell {
                glyph: "\u{2584}".into(),
                inverted: true
            })
        );
        assert_eq!(frame.cell(2, 1), None);
    }

    #[test]
    fn text_is_clipped_at_the_right_edge() {
        let mut frame = Frame::new(4, 1);
        frame.draw_glyph(1, 0, " ", true);
        frame.draw_text(1, 0, "abcdef");
        assert_eq!(frame.row_text(0), " abc");
        assert!(!frame.cell(1, 0).unwrap().inverted);
    }

    #[test]
    fn reset_blanks_or_resizes() {
        let mut frame = Frame::new(2, 1);
        frame.draw_text(0, 0, "ab");
        frame.reset(2, 1);
        assert_eq!(frame.row_text(0), "  ");
        frame.reset(3, 2);
        assert_eq!(frame.size(), (3, 2));
        assert_eq!(frame.row_text(1), "   ");
    }
}
