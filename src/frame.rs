// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() rejects a zero chunk size even when there are no cells
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| c.ch));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(ch: char) -> Cell {
        Cell {
            ch,
            fg: None,
            bold: false,
        }
    }

    #[test]
    fn clear_resets_every_cell_to_blank() {
        let mut f = Frame::new(2, 2);
        f.set(0, 0, mark('x'));
        assert_eq!(f.get(0, 0).unwrap().ch, 'x');
        f.clear();
        assert!(f.cells.iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut f = Frame::new(3, 2);
        f.set(3, 0, mark('x'));
        f.set(0, 2, mark('x'));
        assert!(f.cells.iter().all(|c| *c == Cell::BLANK));
        assert!(f.get(3, 0).is_none());
    }

    #[test]
    fn to_text_joins_rows_without_trailing_newline() {
        let mut f = Frame::new(3, 2);
        f.set(0, 0, mark('a'));
        f.set(2, 1, mark('b'));
        assert_eq!(f.to_text(), "a  \n  b");
    }

    #[test]
    fn zero_area_frame_serializes_to_empty_text() {
        assert_eq!(Frame::new(0, 0).to_text(), "");
        assert_eq!(Frame::new(0, 5).to_text(), "");
        assert_eq!(Frame::new(5, 0).to_text(), "");
        assert!(Frame::new(5, 0).is_empty());
    }
}
