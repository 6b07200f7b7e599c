use serde::Serialize;

use crate::pieces::{GamePiece, PieceBlocks};
use crate::types::{Cell, Coord, GamePhase, PieceKind, Rotation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub value: u8,
    pub blocks: PieceBlocks,
}

impl From<GamePiece> for PieceSnapshot {
    fn from(value: GamePiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            value: value.value(),
            blocks: value.blocks(),
        }
    }
}

/// Read-only copy of everything the presentation layer may show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub cols: usize,
    pub rows: usize,
    /// Row-major cell values
    pub cells: Vec<Cell>,
    pub current: PieceSnapshot,
    pub following: PieceSnapshot,
    pub aim: Coord,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: f64,
    pub timer_delay_ms: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        self.cells.get(y as usize * self.cols + x as usize).copied()
    }
}
