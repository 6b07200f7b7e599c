//! Grid module - owns the cell matrix of a game
//!
//! The grid is `cols x rows` cells stored in a flat, row-major `Vec`.
//! Coordinates: (x, y) where x is the column (left to right) and y the row
//! (top to bottom). A cell holds 0 when empty, otherwise the value of the
//! piece that filled it.
//!
//! Pieces are placed by their pivot: the centre of the 3x3 pattern lands on
//! the target cell, so pattern cell `(i, j)` maps to `(x + i - 1, y + j - 1)`.

use std::collections::BTreeSet;

use crate::pieces::GamePiece;
use crate::types::{Cell, Coord, EMPTY};

/// Result of one line-clear pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedBlocks {
    /// Full rows plus full columns found in the pass
    pub lines: u32,
    /// Every cleared coordinate, each counted once
    pub blocks: BTreeSet<Coord>,
}

impl ClearedBlocks {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block_count(&self) -> u32 {
        self.blocks.len() as u32
    }
}

/// The game grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(EMPTY)
    }

    /// Check if the piece fits with its pivot on (x, y)
    pub fn can_play_piece(&self, piece: &GamePiece, x: i32, y: i32) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// Write the piece into the grid with its pivot on (x, y)
    /// Returns false (and leaves the grid untouched) if the piece does not fit
    pub fn play_piece(&mut self, piece: &GamePiece, x: i32, y: i32) -> bool {
        if !self.can_play_piece(piece, x, y) {
            return false;
        }

        let value = piece.value();
        for (dx, dy) in piece.cells() {
            self.set(x + dx, y + dy, value);
        }

        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.rows || self.cols == 0 {
            return false;
        }
        let start = y * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Check if a column is completely filled
    pub fn is_column_full(&self, x: usize) -> bool {
        if x >= self.cols || self.rows == 0 {
            return false;
        }
        (0..self.rows).all(|y| self.cells[y * self.cols + x] != EMPTY)
    }

    /// Clear every full row and every full column in a single pass.
    ///
    /// All lines are detected before any cell is cleared, so a cell shared by a
    /// full row and a full column is cleared once and both lines count. Lines
    /// emptied by this pass are not rescanned.
    pub fn clear_full_lines(&mut self) -> ClearedBlocks {
        let full_rows: Vec<usize> = (0..self.rows).filter(|&y| self.is_row_full(y)).collect();
        let full_cols: Vec<usize> = (0..self.cols).filter(|&x| self.is_column_full(x)).collect();

        let mut cleared = ClearedBlocks {
            lines: (full_rows.len() + full_cols.len()) as u32,
            blocks: BTreeSet::new(),
        };

        for &y in &full_rows {
            for x in 0..self.cols {
                self.cells[y * self.cols + x] = EMPTY;
                cleared.blocks.insert(Coord::new(x as i32, y as i32));
            }
        }
        for &x in &full_cols {
            for y in 0..self.rows {
                self.cells[y * self.cols + x] = EMPTY;
                cleared.blocks.insert(Coord::new(x as i32, y as i32));
            }
        }

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == EMPTY)
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}
