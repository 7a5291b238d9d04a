//! Game module - the engine state machine
//!
//! Ties together the board, piece table, randomizer and scoring. The engine
//! has no timers of its own: a driver calls [`Game::tick`] for gravity,
//! [`Game::step_clear_animation`] for the flash/fill animations and
//! [`Game::perform_action`] for player input. Every call returns immediately.
//!
//! Observers register two listeners. "State changed" fires when the board,
//! the active piece or the phase changed (redraw). "Stats changed" fires when
//! score, level or lines may have changed (relabel). Both fire inline with the
//! mutation that caused them, possibly several times per call.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::board::{Board, RowList};
use crate::clock::{Clock, MonotonicClock};
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::rng::{clock_seed, PieceRandomizer, PieceState};
use crate::scoring::{
    calculate_hard_drop_score, calculate_level, calculate_line_score, calculate_soft_drop_score,
    get_drop_interval_ms,
};
use crate::snapshot::GameSnapshot;
use crate::types::*;

const CLEAR_EFFECT_DURATION: Duration = Duration::from_millis(CLEAR_EFFECT_DURATION_MS);
const CLEAR_EFFECT_TOGGLE: Duration = Duration::from_millis(CLEAR_EFFECT_TOGGLE_MS);

/// Change notification callback
pub type Listener = Box<dyn FnMut()>;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Place a piece at the spawn origin
    pub fn spawn(piece: PieceState) -> Self {
        Self {
            kind: piece.kind,
            rotation: piece.rotation,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the cell offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board cells with the piece color
    pub fn blocks(&self) -> [Block; 4] {
        let color = self.kind.color();
        self.shape().map(|(dx, dy)| Block {
            x: self.x + dx,
            y: self.y + dy,
            color,
        })
    }

    /// Check if all cells are inside the board and over empty cells
    pub fn is_valid(&self, board: &Board) -> bool {
        board.can_place(&self.shape(), self.x, self.y)
    }
}

/// The game engine
pub struct Game<C: Clock = MonotonicClock> {
    board: Board,
    phase: Phase,
    active: Tetromino,
    next: PieceState,
    /// First piece after a reset, so the opening spawn matches what was shown.
    pending_spawn: Option<PieceState>,
    randomizer: PieceRandomizer,
    score: u32,
    level: u32,
    lines: u32,
    clearing_rows: RowList,
    flash_on: bool,
    clear_started_at: Duration,
    last_toggle_at: Duration,
    game_over_fill_row: i8,
    game_over_animating: bool,
    clock: C,
    on_state_changed: Option<Listener>,
    on_stats_changed: Option<Listener>,
}

impl Game<MonotonicClock> {
    /// Create a new engine on the real clock, seeded from it
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new(), clock_seed())
    }

    /// Create a new engine on the real clock with a fixed piece seed
    pub fn with_seed(seed: u32) -> Self {
        Self::with_clock(MonotonicClock::new(), seed)
    }
}

impl Default for Game<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Game<C> {
    /// Create a new engine on the given clock
    ///
    /// The engine starts Idle with the first piece and its follower already
    /// chosen.
    pub fn with_clock(clock: C, seed: u32) -> Self {
        let placeholder = PieceState {
            kind: PieceKind::O,
            rotation: 0,
        };
        let mut game = Self {
            board: Board::new(),
            phase: Phase::Idle,
            active: Tetromino::spawn(placeholder),
            next: placeholder,
            pending_spawn: None,
            randomizer: PieceRandomizer::new(seed),
            score: 0,
            level: 0,
            lines: 0,
            clearing_rows: RowList::new(),
            flash_on: true,
            clear_started_at: Duration::ZERO,
            last_toggle_at: Duration::ZERO,
            game_over_fill_row: BOARD_HEIGHT as i8 - 1,
            game_over_animating: false,
            clock,
            on_state_changed: None,
            on_stats_changed: None,
        };
        game.reset();
        game
    }

    // ----- lifecycle -----

    /// Start play, resetting first unless the engine is Idle
    pub fn start(&mut self) {
        if self.phase != Phase::Idle {
            self.reset();
        }

        self.phase = Phase::Running;
        info!(seed = self.randomizer.seed(), "game started");
        self.spawn_piece();
        self.emit_state();
        self.emit_stats();
    }

    /// Clear board and counters, pick fresh pieces, and go Idle
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 0;
        self.lines = 0;
        self.phase = Phase::Idle;
        self.reset_game_over_animation();
        self.clearing_rows.clear();
        self.flash_on = true;

        self.pending_spawn = None;
        self.prepare_next_piece();
        self.pending_spawn = Some(self.next);
        self.active = Tetromino::spawn(self.next);
        self.prepare_next_piece();

        debug!("game reset");
        self.emit_state();
        self.emit_stats();
    }

    /// Force Idle and drop any animation in progress
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.reset_game_over_animation();
        self.clearing_rows.clear();
        self.flash_on = true;
        debug!("game stopped");
    }

    /// Switch between Running and Paused; no-op in any other phase
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.phase = Phase::Paused,
            Phase::Paused => self.phase = Phase::Running,
            _ => return,
        }
        debug!(phase = self.phase.as_str(), "pause toggled");
    }

    // ----- stepping -----

    /// Gravity step
    ///
    /// Moves the piece down one row, or locks it when it cannot fall. While
    /// clearing, advances the flash animation instead. Returns false once
    /// play should stop (Idle, game over); a paused engine reports true.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            Phase::Paused => true,
            Phase::Clearing => self.advance_clear_animation(),
            Phase::Running => {
                if self.try_move(0, 1) {
                    return true;
                }
                self.handle_locked_piece()
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Advance whichever animation is active: line-clear flash or game-over fill
    ///
    /// Returns true while the animation is still running.
    pub fn step_clear_animation(&mut self) -> bool {
        if self.phase == Phase::Clearing {
            return self.advance_clear_animation();
        }

        if self.is_game_over_animating() {
            return self.advance_game_over_animation();
        }

        false
    }

    /// Apply a player action; every action is rejected outside Running
    pub fn perform_action(&mut self, action: GameAction) -> bool {
        if !self.can_accept_actions() {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => self.soft_drop_step(),
            GameAction::HardDrop => self.hard_drop_step(),
            GameAction::RotateCw => self.try_rotate(1),
            GameAction::RotateCcw => self.try_rotate(-1),
        }
    }

    // ----- placement -----

    /// Whether a piece fits at origin (x, y) with the given rotation
    pub fn is_valid_position(&self, x: i8, y: i8, kind: PieceKind, rotation: u8) -> bool {
        self.board.can_place(&get_shape(kind, rotation), x, y)
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.can_accept_actions() {
            return false;
        }

        let Tetromino {
            kind,
            rotation,
            x,
            y,
        } = self.active;
        let (Some(nx), Some(ny)) = (x.checked_add(dx), y.checked_add(dy)) else {
            return false;
        };
        if !self.is_valid_position(nx, ny, kind, rotation) {
            return false;
        }

        self.active.x = nx;
        self.active.y = ny;
        self.emit_state();
        true
    }

    /// Try to rotate the active piece by `delta` frames, with horizontal kicks
    pub fn try_rotate(&mut self, delta: i8) -> bool {
        if !self.can_accept_actions() {
            return false;
        }

        let active = self.active;
        let result = try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            delta,
            |x, y, rotation| self.is_valid_position(x, y, active.kind, rotation),
        );

        let Some((rotation, dx)) = result else {
            return false;
        };

        self.active.rotation = rotation;
        self.active.x += dx;
        self.emit_state();
        true
    }

    fn soft_drop_step(&mut self) -> bool {
        if !self.try_move(0, 1) {
            return false;
        }
        self.add_score(calculate_soft_drop_score());
        self.emit_stats();
        true
    }

    fn hard_drop_step(&mut self) -> bool {
        if !self.can_accept_actions() {
            return false;
        }

        let mut dropped: u32 = 0;
        while self.try_move(0, 1) {
            dropped += 1;
        }

        if dropped > 0 {
            self.add_score(calculate_hard_drop_score(dropped, self.level));
            self.emit_stats();
        }

        self.handle_locked_piece()
    }

    // ----- locking & spawning -----

    /// Lock the active piece and either spawn the next one or start clearing
    fn handle_locked_piece(&mut self) -> bool {
        self.lock_piece();

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.update_level_and_score(0);
            let alive = self.spawn_piece();
            self.emit_state();
            alive
        } else {
            self.begin_line_clear(rows);
            self.emit_state();
            true
        }
    }

    fn lock_piece(&mut self) {
        let active = self.active;
        self.board
            .lock_piece(&active.shape(), active.x, active.y, active.kind.color());
        trace!(kind = active.kind.as_str(), x = active.x, y = active.y, "piece locked");
    }

    /// Spawn the queued piece; enters GameOver when it does not fit
    fn spawn_piece(&mut self) -> bool {
        let piece = match self.pending_spawn.take() {
            Some(piece) => piece,
            None => {
                let piece = self.next;
                self.prepare_next_piece();
                piece
            }
        };
        self.active = Tetromino::spawn(piece);

        if !self.active.is_valid(&self.board) {
            self.begin_game_over_animation();
            self.emit_stats();
            return false;
        }

        trace!(kind = piece.kind.as_str(), rotation = piece.rotation, "piece spawned");
        true
    }

    fn prepare_next_piece(&mut self) {
        self.next = self.randomizer.next_piece();
    }

    fn update_level_and_score(&mut self, cleared_lines: u32) {
        if cleared_lines > 0 {
            self.lines += cleared_lines;
            self.add_score(calculate_line_score(cleared_lines as usize, self.level));
            self.level = calculate_level(self.lines);
        }
        self.emit_stats();
    }

    /// Score only ever grows
    fn add_score(&mut self, delta: u32) {
        if delta == 0 {
            return;
        }
        self.score = self.score.saturating_add(delta);
    }

    // ----- animations -----

    fn begin_line_clear(&mut self, rows: RowList) {
        debug!(rows = ?rows.as_slice(), "line clear started");
        self.clearing_rows = rows;
        self.flash_on = true;
        self.clear_started_at = self.clock.now();
        self.last_toggle_at = self.clear_started_at;
        self.phase = Phase::Clearing;
    }

    fn advance_clear_animation(&mut self) -> bool {
        let now = self.clock.now();
        let mut toggled = false;
        if now.saturating_sub(self.last_toggle_at) >= CLEAR_EFFECT_TOGGLE {
            self.flash_on = !self.flash_on;
            self.last_toggle_at = now;
            toggled = true;
        }

        if now.saturating_sub(self.clear_started_at) >= CLEAR_EFFECT_DURATION {
            return self.finish_line_clear();
        }

        if toggled {
            self.emit_state();
        }
        true
    }

    fn finish_line_clear(&mut self) -> bool {
        let rows = std::mem::take(&mut self.clearing_rows);
        self.board.remove_rows(&rows);
        self.flash_on = true;
        self.phase = Phase::Running;
        self.update_level_and_score(rows.len() as u32);
        debug!(
            cleared = rows.len(),
            lines = self.lines,
            level = self.level,
            score = self.score,
            "line clear finished"
        );

        let alive = self.spawn_piece();
        self.emit_state();
        alive
    }

    fn begin_game_over_animation(&mut self) {
        self.phase = Phase::GameOver;
        self.game_over_animating = true;
        self.game_over_fill_row = BOARD_HEIGHT as i8 - 1;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
        self.emit_state();
    }

    fn advance_game_over_animation(&mut self) -> bool {
        if !self.game_over_animating {
            return false;
        }

        if self.game_over_fill_row < 0 {
            self.game_over_animating = false;
            return false;
        }

        self.board
            .fill_empty_in_row(self.game_over_fill_row as usize, GAME_OVER_FILL_COLOR);
        self.game_over_fill_row -= 1;
        self.emit_state();

        if self.game_over_fill_row < 0 {
            self.game_over_animating = false;
            return false;
        }
        true
    }

    fn reset_game_over_animation(&mut self) {
        self.game_over_animating = false;
        self.game_over_fill_row = BOARD_HEIGHT as i8 - 1;
    }

    // ----- notifications -----

    /// Register the "state changed" listener; it is invoked once right away
    pub fn on_state_changed(&mut self, listener: impl FnMut() + 'static) {
        self.on_state_changed = Some(Box::new(listener));
        self.emit_state();
    }

    /// Register the "stats changed" listener; it is invoked once right away
    pub fn on_stats_changed(&mut self, listener: impl FnMut() + 'static) {
        self.on_stats_changed = Some(Box::new(listener));
        self.emit_stats();
    }

    fn emit_state(&mut self) {
        if let Some(listener) = self.on_state_changed.as_mut() {
            listener();
        }
    }

    fn emit_stats(&mut self) {
        if let Some(listener) = self.on_stats_changed.as_mut() {
            listener();
        }
    }

    // ----- queries -----

    fn can_accept_actions(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Game over with the fill sweep still in progress
    pub fn is_game_over_animating(&self) -> bool {
        self.phase == Phase::GameOver && self.game_over_animating
    }

    pub fn is_clearing(&self) -> bool {
        self.phase == Phase::Clearing
    }

    /// Whether clearing rows are currently drawn (the blink's "on" half)
    pub fn flash_visible(&self) -> bool {
        self.flash_on
    }

    /// Rows being flashed, top to bottom; empty unless clearing
    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next_piece(&self) -> PieceState {
        self.next
    }

    /// Active piece cells in board coordinates
    pub fn active_cells(&self) -> [Block; 4] {
        self.active.blocks()
    }

    /// Next piece cells relative to its own origin, for the preview
    pub fn next_cells(&self) -> [Block; 4] {
        let color = self.next.kind.color();
        get_shape(self.next.kind, self.next.rotation).map(|(x, y)| Block { x, y, color })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Gravity interval for the current level
    pub fn speed_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active_cells();
        out.next = self.next_cells();
        out.phase = self.phase;
        out.flash_visible = self.flash_on;
        out.clearing_rows.clone_from(&self.clearing_rows);
        out.game_over_animating = self.is_game_over_animating();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.speed_ms = self.speed_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<C: Clock> fmt::Debug for Game<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("active", &self.active)
            .field("next", &self.next)
            .field("pending_spawn", &self.pending_spawn)
            .field("score", &self.score)
            .field("level", &self.level)
            .field("lines", &self.lines)
            .field("clearing_rows", &self.clearing_rows)
            .field("flash_on", &self.flash_on)
            .field("game_over_animating", &self.game_over_animating)
            .field("game_over_fill_row", &self.game_over_fill_row)
            .finish_non_exhaustive()
    }
}
