//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`core::GameSnapshot`] into a framebuffer and the renderer flushes that
//! framebuffer to the terminal.
//!
//! - Rendering is pure, so the view can be tested without a terminal
//! - Board cells are 2 columns wide by default to keep them roughly square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_core as core;
pub use tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{status_text, GameView, Viewport};
pub use renderer::TerminalRenderer;
