//! Playfield grid and cell storage

use crate::color::PuyoColor;

/// A cell on the grid - either empty or holding a puyo of some color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PuyoColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<PuyoColor> {
        match self {
            Cell::Filled(color) => Some(*color),
            Cell::Empty => None,
        }
    }
}

/// The playfield
///
/// Coordinates are `(x, y)` with `x` growing rightward and `y` growing
/// downward, so row 0 is the top. The first `hidden_rows` rows form the
/// buffer above the visible area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    hidden_rows: usize,
    /// Row-major, `cells[y * width + x]`
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid. `height` includes the hidden rows.
    pub fn new(width: usize, height: usize, hidden_rows: usize) -> Self {
        Self {
            width,
            height,
            hidden_rows: hidden_rows.min(height),
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn hidden_rows(&self) -> usize {
        self.hidden_rows
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Whether row `y` is inside the grid and below the hidden buffer
    pub fn is_visible_row(&self, y: i32) -> bool {
        y >= self.hidden_rows as i32 && y < self.height as i32
    }

    /// Get the cell at `(x, y)`. Out of range reads as empty.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.index(x, y)
            .map(|i| self.cells[i])
            .unwrap_or(Cell::Empty)
    }

    /// Put a puyo at `(x, y)`. Out of range writes are dropped; returns
    /// whether the write landed.
    pub fn set(&mut self, x: i32, y: i32, color: PuyoColor) -> bool {
        self.put(x, y, Cell::Filled(color))
    }

    /// Empty the cell at `(x, y)`
    pub fn clear(&mut self, x: i32, y: i32) -> bool {
        self.put(x, y, Cell::Empty)
    }

    fn put(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// True if no cell holds a puyo
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    /// True if the position is inside the grid and unoccupied
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.get(x, y).is_empty()
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_filled()).count()
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(6, 13, 1);
        assert!(grid.is_empty());
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(6, 13, 1);
        assert!(grid.set(2, 5, PuyoColor::Red));
        assert_eq!(grid.get(2, 5), Cell::Filled(PuyoColor::Red));
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(6, 13, 1);
        grid.set(0, 12, PuyoColor::Blue);
        assert!(grid.clear(0, 12));
        assert!(grid.get(0, 12).is_empty());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_out_of_range_is_silent() {
        let mut grid = Grid::new(6, 13, 1);
        assert!(!grid.set(-1, 0, PuyoColor::Red));
        assert!(!grid.set(6, 0, PuyoColor::Red));
        assert!(!grid.set(0, 13, PuyoColor::Red));
        assert!(!grid.clear(0, -1));
        assert!(grid.is_empty());
        assert_eq!(grid.get(-1, 0), Cell::Empty);
        assert_eq!(grid.get(0, 13), Cell::Empty);
    }

    #[test]
    fn test_visible_rows() {
        let grid = Grid::new(6, 13, 1);
        assert!(!grid.is_visible_row(0));
        assert!(grid.is_visible_row(1));
        assert!(grid.is_visible_row(12));
        assert!(!grid.is_visible_row(13));
    }

    #[test]
    fn test_rows_iter() {
        let mut grid = Grid::new(3, 2, 0);
        grid.set(1, 1, PuyoColor::Green);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][1], Cell::Filled(PuyoColor::Green));
    }
}
