//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color token
//! of a locked block. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Rows above the board (y < 0) are legal for pieces but are
//! never stored.

use arrayvec::ArrayVec;

use crate::pieces::Orientation;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row-major copy of the board, `grid[y][x]`
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Row indices removed by a single clear, highest index first
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a matrix placed with its top-left at (x, y) fits.
    ///
    /// Every occupied cell must land in a column `0..BOARD_WIDTH`, a row below
    /// `BOARD_HEIGHT`, and must not overlap a locked cell. Cells above the top
    /// edge are allowed.
    pub fn fits(&self, orientation: &Orientation, x: i32, y: i32) -> bool {
        orientation.occupied().all(|(dx, dy)| {
            let bx = x + dx;
            let by = y + dy;
            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return their indices (highest row first)
    ///
    /// Uses a two-pointer pass from the bottom: surviving rows are copied down
    /// to the next free slot and the vacated rows at the top are emptied.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared_rows
    }

    /// Write a matrix placed at (x, y) into the board with the given color
    ///
    /// Cells outside the board (including rows above the top) are skipped.
    /// Returns the number of cells written.
    pub fn lock_cells(&mut self, orientation: &Orientation, x: i32, y: i32, color: Color) -> usize {
        let mut written = 0;
        for (dx, dy) in orientation.occupied() {
            if self.set(x + dx, y + dy, Some(color)) {
                written += 1;
            }
        }
        written
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy into a row-major grid
    pub fn to_grid(&self) -> BoardGrid {
        let width = BOARD_WIDTH as usize;
        let mut grid: BoardGrid = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
        grid
    }

    /// Build a board from a row-major grid
    pub fn from_grid(grid: &BoardGrid) -> Self {
        let width = BOARD_WIDTH as usize;
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            board.cells[y * width..(y + 1) * width].copy_from_slice(row);
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::shape;
    use crate::types::PieceKind;

    const RED: Color = Color(0xFF0000);

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_lock_cells_skips_rows_above_top() {
        let mut board = Board::new();
        let vertical_i = shape(PieceKind::I).instantiate().rotated_cw();

        // Rows -2 and -1 are above the board.
        let written = board.lock_cells(&vertical_i, 4, -2, RED);
        assert_eq!(written, 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(4, 1));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_fits_allows_negative_rows_only() {
        let board = Board::new();
        let o = shape(PieceKind::O).instantiate();

        assert!(board.fits(&o, 0, -1));
        assert!(board.fits(&o, 8, 18));
        assert!(!board.fits(&o, 9, 0));
        assert!(!board.fits(&o, -1, 0));
        assert!(!board.fits(&o, 0, 19));
    }

    #[test]
    fn test_grid_roundtrip() {
        let mut board = Board::new();
        board.set(3, 5, Some(RED));
        board.set(9, 19, Some(PieceKind::J.color()));

        let grid = board.to_grid();
        assert_eq!(grid[5][3], Some(RED));
        assert_eq!(Board::from_grid(&grid), board);
    }

    #[test]
    fn test_clear_reports_highest_row_first() {
        let mut board = Board::new();
        for y in [12, 17, 19] {
            for x in 0..BOARD_WIDTH as i32 {
                board.set(x, y, Some(RED));
            }
        }

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17, 12]);
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
