//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules and the state machine of the game. It has no
//! dependencies on terminals, timers or threads: a driver calls into
//! [`Game`] and the engine reports back through two change listeners.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of color indices, full-row detection and removal
//! - [`pieces`]: Tetromino shape table and rotation with horizontal kicks
//! - [`rng`]: Uniform piece generation from a seedable LCG
//! - [`scoring`]: Classic line scores, drop rewards and level progression
//! - [`clock`]: Monotonic time sources used to pace the clear animation
//! - [`game`]: The engine; phases, locking, line clears, game over
//! - [`snapshot`]: Plain copy of everything needed to draw a frame
//!
//! # Game Rules
//!
//! - **Randomizer**: Every piece kind is equally likely on every draw (no bag)
//! - **Rotation**: Fixed shape table; a blocked rotation tries the column
//!   offsets 0, -1, +1, -2, +2 on the same row
//! - **Locking**: A piece locks as soon as it cannot fall (no lock delay)
//! - **Line clears**: Full rows blink for 1.5s before they are removed
//! - **Game over**: The board fills bottom-up, one row per animation step
//!
//! # Example
//!
//! ```
//! use tetris_core::Game;
//! use tetris_core::types::GameAction;
//!
//! let mut game = Game::with_seed(12345);
//! game.start();
//!
//! game.perform_action(GameAction::MoveRight);
//! game.perform_action(GameAction::RotateCw);
//! game.perform_action(GameAction::HardDrop);
//!
//! assert!(game.is_running());
//! ```

pub mod board;
pub mod clock;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid, RowList};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use game::{Game, Listener, Tetromino};
pub use pieces::{get_shape, try_rotate};
pub use rng::{PieceRandomizer, PieceState, SimpleRng};
pub use snapshot::GameSnapshot;
