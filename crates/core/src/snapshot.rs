//! Snapshot module - owned per-frame copy of the engine state for renderers

use crate::board::{Grid, RowList};
use crate::types::{Block, Phase, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Everything a front end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Grid,
    /// Active piece cells in board coordinates
    pub active: [Block; 4],
    /// Next piece cells relative to the preview origin
    pub next: [Block; 4],
    pub phase: Phase,
    pub flash_visible: bool,
    pub clearing_rows: RowList,
    pub game_over_animating: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub speed_ms: u32,
}

impl GameSnapshot {
    /// Whether the active piece should be drawn over the board
    pub fn shows_active(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Running | Phase::Paused)
    }

    /// Whether row `y` is hidden by the line-clear blink
    pub fn row_hidden(&self, y: usize) -> bool {
        !self.flash_visible && self.clearing_rows.contains(&y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: [Block::default(); 4],
            next: [Block::default(); 4],
            phase: Phase::Idle,
            flash_visible: true,
            clearing_rows: RowList::new(),
            game_over_animating: false,
            score: 0,
            level: 0,
            lines: 0,
            speed_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_hidden_only_while_flash_is_off() {
        let mut s = GameSnapshot::default();
        s.phase = Phase::Clearing;
        s.clearing_rows.push(19);

        assert!(!s.row_hidden(19));
        s.flash_visible = false;
        assert!(s.row_hidden(19));
        assert!(!s.row_hidden(18));
    }

    #[test]
    fn active_hidden_while_clearing_and_after_game_over() {
        let mut s = GameSnapshot::default();
        assert!(s.shows_active());
        s.phase = Phase::Clearing;
        assert!(!s.shows_active());
        s.phase = Phase::GameOver;
        assert!(!s.shows_active());
    }
}
