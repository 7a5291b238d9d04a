//! Terminal Tetris runner (default binary).
//!
//! Reads configuration from the environment, then runs a single-threaded loop:
//! block for input until the driver's next timer, apply the key, fire due
//! timers, and redraw when the engine reported a change.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};

use tetris::core::rng::clock_seed;
use tetris::core::{Game, GameSnapshot, MonotonicClock};
use tetris::driver::Driver;
use tetris::input::{map_key, Command};
use tetris::term::{FrameBuffer, GameView, TerminalRenderer};
use tetris::{logging, Config};

/// Longest input wait while no timer is armed
const IDLE_POLL: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    let config = Config::from_env()?;
    logging::init(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!(error = %e, "exiting with error");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let clock = MonotonicClock::new();
    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut game = Game::with_clock(clock, seed);
    let mut driver = Driver::new(clock);
    let view = GameView::new(config.cell_width);
    info!(seed, "session started");

    let dirty = Rc::new(Cell::new(true));
    let flag = dirty.clone();
    game.on_state_changed(move || flag.set(true));
    let flag = dirty.clone();
    game.on_stats_changed(move || flag.set(true));

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();
    let mut last_phase = game.phase();

    loop {
        // Pause toggles change the phase without a notification.
        if dirty.replace(false) || game.phase() != last_phase {
            last_phase = game.phase();
            game.snapshot_into(&mut snap);
            view.render_into(&snap, &mut fb);
            term.draw(&fb)?;
        }

        let timeout = driver.time_until_next().unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match map_key(key) {
                    Some(Command::Quit) => {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    Some(Command::Start) => driver.start_game(&mut game),
                    Some(Command::Pause) => driver.toggle_pause(&mut game),
                    Some(Command::Action(action)) => {
                        game.perform_action(action);
                    }
                    None => {}
                },
                Event::Resize(w, h) => {
                    fb = FrameBuffer::new(w, h);
                    term.invalidate();
                    dirty.set(true);
                }
                _ => {}
            }
        }

        driver.poll(&mut game);
    }
}
