//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Intent`]s for the
//! keyboard-control mode: move the aim cursor, rotate, swap, drop at the aim.
//! Independent of any rendering.

pub mod map;

pub use tetrecs_types as types;

pub use map::{handle_key_event, should_quit};
