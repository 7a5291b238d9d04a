//! Core types module - shared data structures and constants
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! driver and the terminal front end can all agree on board geometry, timing
//! and the piece/action vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn origin**: (`BOARD_WIDTH / 2 - 2`, 0)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLEAR_EFFECT_DURATION_MS` | 1500 | Total line-clear flash duration |
//! | `CLEAR_EFFECT_TOGGLE_MS` | 250 | Flash on/off toggle interval |
//! | `ANIMATION_TICK_MS` | 250 | Cadence of the animation timer |
//!
//! # Gravity by Level
//!
//! `LEVEL_SPEEDS_MS[level]` is the gravity interval, from 1000ms at level 0
//! down to 100ms at level 19.
//!
//! # Examples
//!
//! ```
//! use tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color(), 7);
//! assert_eq!(PieceKind::from_index(piece.index()), Some(piece));
//! assert_ne!(GameAction::RotateCw, GameAction::RotateCcw);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of tetromino kinds
pub const PIECE_TYPES: usize = 7;

/// Column of the spawn origin (horizontally centered)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the spawn origin
pub const SPAWN_Y: i8 = 0;

/// Board color written by the game-over fill sweep.
///
/// One past the last piece color, so it never collides with a locked piece.
pub const GAME_OVER_FILL_COLOR: u8 = PIECE_TYPES as u8 + 1;

/// Total duration of the line-clear flash animation
pub const CLEAR_EFFECT_DURATION_MS: u64 = 1500;

/// Flash toggle interval during the line-clear animation
pub const CLEAR_EFFECT_TOGGLE_MS: u64 = 250;

/// Cadence at which a driver should call `step_clear_animation`
pub const ANIMATION_TICK_MS: u64 = 250;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 19;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval per level (milliseconds per row)
pub const LEVEL_SPEEDS_MS: [u32; 20] = [
    1000, 886, 785, 695, 616, 546, 483, 428, 379, 336, 298, 264, 234, 207, 183, 162, 144, 127,
    113, 100,
];

/// Base points for 1, 2, 3 and 4 simultaneous lines (multiplied by level + 1)
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// Points awarded per successful soft drop step
pub const SOFT_DROP_SCORE: u32 = 1;

/// Horizontal offsets tried, in order, when a rotation is blocked
pub const WALL_KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// The seven tetromino piece kinds
///
/// The declaration order is the table order: `index()` is 0 for O through 6
/// for T, and the board color of a locked piece is `index() + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    Z,
    S,
    I,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds in table order
    pub const ALL: [PieceKind; PIECE_TYPES] = [
        PieceKind::O,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Table index (0..7)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Kind at a table index, if in range
    ///
    /// ```
    /// use tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(3), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Board color index used when this piece is locked (1..=7)
    pub fn color(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Lowercase name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }
}

/// Player actions accepted by the engine while it is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (+1 point)
    SoftDrop,
    /// Drop piece to the lowest reachable row and lock it
    HardDrop,
    /// Advance to the next rotation frame
    RotateCw,
    /// Step back to the previous rotation frame
    RotateCcw,
}

/// Top-level engine mode
///
/// Exactly one is current. The game-over fill sweep runs inside `GameOver`
/// and is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Before start or after reset/stop
    #[default]
    Idle,
    /// Normal play
    Running,
    /// Play suspended
    Paused,
    /// Line-clear flash in progress, board frozen
    Clearing,
    /// No room to spawn; terminal for play
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Clearing => "clearing",
            Phase::GameOver => "gameOver",
        }
    }
}

/// One occupied cell of a piece: position plus board color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Block {
    pub x: i8,
    pub y: i8,
    pub color: u8,
}

/// Board cell value: 0 = empty, otherwise a color index
pub type Color = u8;

/// Empty board cell
pub const EMPTY: Color = 0;
