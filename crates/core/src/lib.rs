//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the block-grid puzzle: the grid, the piece
//! catalog, the piece supply, scoring and the turn state machine. It has no
//! clock, no UI and no I/O:
//!
//! - **Deterministic**: a fixed seed produces the same piece sequence
//! - **Testable**: every rule is reachable through plain method calls
//! - **Single-writer**: a [`Game`] is mutated through `&mut self` only; the
//!   async turn timer lives in `tetrecs-engine`
//!
//! # Module Structure
//!
//! - [`grid`]: cell matrix, placement checks and row/column clearing
//! - [`pieces`]: the 15 piece shapes and their rotation
//! - [`supply`]: current/following piece with uniform random draws
//! - [`scoring`]: clear points, levels and the turn timer curve
//! - [`game`]: the `NotStarted -> Running -> GameOver` state machine
//! - [`events`]: single-slot listeners and the serializable [`GameEvent`]
//! - [`snapshot`]: read-only copies for the presentation layer
//! - [`config`]: grid size, lives and seed
//!
//! # Game Rules
//!
//! - Pieces are 3x3 patterns placed anywhere by their centre cell
//! - Full rows **and** full columns clear, all found in a single pass
//! - A clear scores `lines x blocks x 10 x multiplier`; the multiplier grows by
//!   one per clearing turn and resets on a turn without a clear
//! - Level is `score / 1000`; each turn lasts `max(2.5s, 12s - 0.5s x level)`
//! - When a turn runs out the player loses a life and the current piece
//!
//! # Example
//!
//! ```
//! use tetrecs_core::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default().with_seed(12345));
//! game.start();
//!
//! game.rotate_current_piece().unwrap();
//! let _ = game.place_at(2, 2);
//!
//! assert_eq!(game.lives(), 3);
//! ```

pub mod config;
pub mod events;
pub mod game;
pub mod grid;
pub mod pieces;
pub mod scoring;
pub mod snapshot;
pub mod supply;

pub use tetrecs_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use events::{GameEvent, Listeners, Stats};
pub use game::{Game, IntentError, PlaceError, Placement, TurnExpiry};
pub use grid::{ClearedBlocks, Grid};
pub use pieces::{get_shape, GamePiece};
pub use scoring::{calculate_clear_score, calculate_level, get_timer_delay_ms};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use supply::PieceSupply;
