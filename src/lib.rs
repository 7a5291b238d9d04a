//! Terminal Tetris (workspace facade crate).
//!
//! The game logic and front end live in dedicated crates under `crates/`;
//! this package re-exports them as `tetris::{types,core,driver,input,term}`
//! and adds the runtime configuration and log setup used by the binary.

pub mod config;
pub mod logging;

pub use tetris_core as core;
pub use tetris_driver as driver;
pub use tetris_input as input;
pub use tetris_term as term;
pub use tetris_types as types;

pub use config::{Config, ConfigError};
