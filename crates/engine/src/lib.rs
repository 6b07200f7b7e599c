//! Engine module - runs a game on a single serial tokio task
//!
//! [`tetrecs_core::Game`] holds the rules but owns no clock. This crate adds
//! the turn timer and the serial execution context around it:
//!
//! - [`Engine::spawn`] moves a game into its own task
//! - intents are applied one at a time, in arrival order
//! - the [`TurnTimer`] is polled by that same task, so expiry never races a
//!   placement and a cancelled timer can never fire
//!
//! # Example
//!
//! ```no_run
//! use tetrecs_core::{Game, GameConfig};
//! use tetrecs_engine::{event_channel, Engine};
//!
//! # async fn demo() -> Result<(), tetrecs_engine::EngineError> {
//! let mut game = Game::new(GameConfig::default());
//! let mut events = event_channel(&mut game);
//!
//! let engine = Engine::spawn(game);
//! engine.start().await?;
//! engine.move_aim(1, 0).await?;
//! let _ = engine.drop_piece_at_aim().await;
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod runtime;
pub mod timer;

pub use tetrecs_core as core;
pub use tetrecs_types as types;

pub use runtime::{event_channel, Engine, EngineError, EngineStatus};
pub use timer::TurnTimer;
