//! Game configuration

use crate::types::{DEFAULT_COLS, DEFAULT_LIVES, DEFAULT_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    pub lives: u32,
    /// Piece RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            lives: DEFAULT_LIVES,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `TETRECS_COLS`, `TETRECS_ROWS`: grid size (default 5x5)
    /// - `TETRECS_LIVES`: starting lives (default 3)
    /// - `TETRECS_SEED`: fixed piece seed (default random)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let defaults = Self::default();
        Self {
            cols: parse("TETRECS_COLS").map_or(defaults.cols, |v| v as usize),
            rows: parse("TETRECS_ROWS").map_or(defaults.rows, |v| v as usize),
            lives: parse("TETRECS_LIVES")
                .and_then(|v| u32::try_from(v).ok())
                .unwrap_or(defaults.lives),
            seed: parse("TETRECS_SEED"),
        }
        .normalized()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, cols: usize, rows: usize) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    /// Grid dimensions and lives are at least 1
    pub fn normalized(self) -> Self {
        Self {
            cols: self.cols.max(1),
            rows: self.rows.max(1),
            lives: self.lives.max(1),
            seed: self.seed,
        }
    }
}
