//! TetrECS (workspace facade crate).
//!
//! Re-exports the workspace crates under one name:
//! `tetrecs::{core, engine, input, types}`.

pub use tetrecs_core as core;
pub use tetrecs_engine as engine;
pub use tetrecs_input as input;
pub use tetrecs_types as types;
