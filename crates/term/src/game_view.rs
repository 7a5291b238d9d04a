//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Block, Color, Phase, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Block colors by board color index; 0 is unused (empty), 8 is the game-over fill.
const PALETTE: [Rgb; 9] = [
    Rgb::new(0, 0, 0),
    Rgb::new(97, 97, 213),
    Rgb::new(97, 209, 98),
    Rgb::new(212, 97, 98),
    Rgb::new(217, 217, 218),
    Rgb::new(212, 97, 213),
    Rgb::new(97, 204, 203),
    Rgb::new(212, 212, 98),
    Rgb::new(150, 150, 150),
];

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Preview box size in cells
const PREVIEW_CELLS: u16 = 4;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Human readable status for the side panel
pub fn status_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Running | Phase::Clearing => "Playing",
        Phase::Paused => "Paused",
        Phase::GameOver => "Game Over",
    }
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, 8),
        }
    }

    /// Render a snapshot into a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, &mut fb);
        fb
    }

    /// Render a snapshot into an existing framebuffer of the viewport's size.
    pub fn render_into(&self, snap: &GameSnapshot, fb: &mut FrameBuffer) {
        fb.clear();

        let well_w = (BOARD_WIDTH as u16) * self.cell_w;
        let well_h = BOARD_HEIGHT as u16;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;

        let start_x = fb.width().saturating_sub(frame_w) / 2;
        let start_y = fb.height().saturating_sub(frame_h) / 2;

        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let origin = (start_x + 1, start_y + 1);
        for (y, row) in snap.board.iter().enumerate() {
            let hidden = snap.row_hidden(y);
            for (x, &color) in row.iter().enumerate() {
                let (cx, cy) = (x as u16, y as u16);
                if color == EMPTY || hidden {
                    self.draw_empty_cell(fb, origin, cx, cy);
                } else {
                    self.draw_block(fb, origin, cx, cy, color);
                }
            }
        }

        if snap.shows_active() {
            for block in snap.active.iter().filter(|b| in_well(b)) {
                self.draw_block(fb, origin, block.x as u16, block.y as u16, block.color);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, panel_x, start_y);

        let overlay = match snap.phase {
            Phase::Idle => Some("PRESS ENTER"),
            Phase::Paused => Some("PAUSED"),
            Phase::GameOver if !snap.game_over_animating => Some("GAME OVER"),
            _ => None,
        };
        if let Some(text) = overlay {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, text);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, origin: (u16, u16), x: u16, y: u16) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, origin, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, origin: (u16, u16), x: u16, y: u16, color: Color) {
        let Some(&fg) = PALETTE.get(color as usize) else {
            return;
        };
        let style = CellStyle::plain(fg, WELL_BG).bold();
        self.fill_cell(fb, origin, x, y, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin.0.saturating_add(x * self.cell_w);
        let py = origin.1.saturating_add(y);
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, top: u16) {
        if x >= fb.width() || fb.width() - x < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = top;
        for (name, n) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, &n.to_string(), value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        let preview_bg = CellStyle::plain(PANEL_BG, PANEL_BG);
        fb.fill_rect(x, y, PREVIEW_CELLS * self.cell_w, PREVIEW_CELLS, ' ', preview_bg);
        for block in &snap.next {
            if (0..PREVIEW_CELLS as i8).contains(&block.x)
                && (0..PREVIEW_CELLS as i8).contains(&block.y)
            {
                self.draw_block(fb, (x, y), block.x as u16, block.y as u16, block.color);
            }
        }
        y += PREVIEW_CELLS + 1;

        fb.put_str(x, y, "STATUS", label);
        fb.put_str(x, y + 1, status_text(snap.phase), value);
    }
}

fn in_well(block: &Block) -> bool {
    (0..BOARD_WIDTH as i8).contains(&block.x) && (0..BOARD_HEIGHT as i8).contains(&block.y)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put(x, y, '┌', style);
    fb.put(x + w - 1, y, '┐', style);
    fb.put(x, y + h - 1, '└', style);
    fb.put(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', style);
        fb.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', style);
        fb.put(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let mid_y = y.saturating_add(h / 2);
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(w.saturating_sub(text_w) / 2);
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(tx, mid_y, text, style);
}
