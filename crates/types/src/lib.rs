//! Core types shared across the workspace
//! This module contains pure data types with no game logic

use serde::{Deserialize, Serialize};

/// Default grid dimensions (the single-player challenge board)
pub const DEFAULT_COLS: usize = 5;
pub const DEFAULT_ROWS: usize = 5;

/// Lives at the start of a game
pub const DEFAULT_LIVES: u32 = 3;

/// Number of piece shapes in the catalog
pub const PIECE_COUNT: usize = 15;

/// Side length of every piece pattern
pub const PIECE_SIZE: usize = 3;

/// Cell value of an empty grid cell
pub const EMPTY: u8 = 0;

/// Turn timer (milliseconds)
pub const BASE_TIMER_MS: u32 = 12_000;
pub const TIMER_STEP_MS: u32 = 500;
pub const TIMER_FLOOR_MS: u32 = 2_500;

/// Scoring
pub const POINTS_PER_BLOCK: u32 = 10;
pub const SCORE_PER_LEVEL: u32 = 1_000;

/// Piece shapes, in catalog order (index 0..15, cell value = index + 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieceKind {
    Line,
    C,
    Plus,
    Dot,
    Square,
    L,
    J,
    S,
    Z,
    T,
    X,
    Corner,
    InverseCorner,
    Diagonal,
    Double,
}

impl PieceKind {
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::Line,
        PieceKind::C,
        PieceKind::Plus,
        PieceKind::Dot,
        PieceKind::Square,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::X,
        PieceKind::Corner,
        PieceKind::InverseCorner,
        PieceKind::Diagonal,
        PieceKind::Double,
    ];

    /// Look up a kind by catalog index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog index (0-based)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Cell value written into the grid (1-based)
    pub fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::C => "c",
            PieceKind::Plus => "plus",
            PieceKind::Dot => "dot",
            PieceKind::Square => "square",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::X => "x",
            PieceKind::Corner => "corner",
            PieceKind::InverseCorner => "inversecorner",
            PieceKind::Diagonal => "diagonal",
            PieceKind::Double => "double",
        }
    }
}

/// Rotation states (North = catalog orientation), quarter turns clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Number of clockwise quarter turns from North
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Grid coordinate: x = column (left to right), y = row (top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// Player intents accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    Start,
    PlaceAt { x: i32, y: i32 },
    Rotate,
    Swap,
    MoveAim { dx: i32, dy: i32 },
    DropAtAim,
    Stop,
}

impl Intent {
    /// Parse a parameterless intent from string.
    ///
    /// `placeAt` and `moveAim` carry coordinates and are built directly.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Intent::Start),
            "rotate" => Some(Intent::Rotate),
            "swap" => Some(Intent::Swap),
            "dropataim" | "drop" => Some(Intent::DropAtAim),
            "stop" => Some(Intent::Stop),
            "aimup" => Some(Intent::MoveAim { dx: 0, dy: -1 }),
            "aimdown" => Some(Intent::MoveAim { dx: 0, dy: 1 }),
            "aimleft" => Some(Intent::MoveAim { dx: -1, dy: 0 }),
            "aimright" => Some(Intent::MoveAim { dx: 1, dy: 0 }),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Start => "start",
            Intent::PlaceAt { .. } => "placeAt",
            Intent::Rotate => "rotate",
            Intent::Swap => "swap",
            Intent::MoveAim { .. } => "moveAim",
            Intent::DropAtAim => "dropAtAim",
            Intent::Stop => "stop",
        }
    }
}

/// Grid cell value (0 = empty, 1..=PIECE_COUNT = piece colour)
pub type Cell = u8;
