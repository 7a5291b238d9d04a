//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`Command`]s: either a
//! [`crate::types::GameAction`] for the engine or a session command (start,
//! pause, quit) for the host loop. Nothing here touches the engine directly.

pub mod map;

pub use tetris_types as types;

pub use map::{map_key, Command};
