//! Integration tests for the engine through the public facade

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tetris::core::{Game, ManualClock};
use tetris::types::{GameAction, Phase, BOARD_HEIGHT, EMPTY, GAME_OVER_FILL_COLOR, SPAWN_X, SPAWN_Y};

fn new_game(seed: u32) -> Game<ManualClock> {
    Game::with_clock(ManualClock::new(), seed)
}

/// Rows the active piece can still fall
fn drop_distance(game: &Game<ManualClock>) -> u32 {
    let a = game.active();
    let mut y = a.y;
    while game.is_valid_position(a.x, y + 1, a.kind, a.rotation) {
        y += 1;
    }
    (y - a.y) as u32
}

fn hard_drop_until_game_over(game: &mut Game<ManualClock>) -> usize {
    let mut drops = 0;
    while !game.is_game_over() {
        drops += 1;
        assert!(drops < 200, "stack never reached the top");
        game.perform_action(GameAction::HardDrop);
    }
    drops
}

#[test]
fn test_game_lifecycle() {
    let mut game = new_game(12345);
    assert_eq!(game.phase(), Phase::Idle);
    assert!(!game.is_running());

    game.start();
    assert!(game.is_running());
    assert!(!game.is_paused());
    assert!(!game.is_game_over());

    game.toggle_pause();
    assert!(game.is_paused());
    game.toggle_pause();
    assert!(game.is_running());

    game.stop();
    assert_eq!(game.phase(), Phase::Idle);
    assert!(!game.perform_action(GameAction::MoveLeft));
}

#[test]
fn test_default_game_uses_real_clock() {
    let mut game = Game::new();
    game.start();
    assert!(game.perform_action(GameAction::SoftDrop));
    assert_eq!(game.score(), 1);

    let mut seeded = Game::with_seed(5);
    assert_eq!(seeded.seed(), 5);
    seeded.start();
    assert!(seeded.is_running());
}

#[test]
fn test_hard_drop_on_empty_board() {
    let mut game = new_game(12345);
    game.start();
    let rows = drop_distance(&game);
    let kind = game.active().kind;

    assert!(game.perform_action(GameAction::HardDrop));

    assert_eq!(game.score(), rows * (game.level() + 1));
    assert_eq!(game.lines(), 0);
    assert!(game.is_running());

    let board = game.board();
    let locked: Vec<(i8, i8)> = (0..20)
        .flat_map(|y| (0..10).map(move |x| (x, y)))
        .filter(|&(x, y)| board.is_occupied(x, y))
        .collect();
    assert_eq!(locked.len(), 4);
    assert!(locked.iter().any(|&(_, y)| y == 19));
    for &(x, y) in &locked {
        assert_eq!(board.get(x, y), Some(kind.color()));
    }

    assert_eq!((game.active().x, game.active().y), (SPAWN_X, SPAWN_Y));
}

#[test]
fn test_each_move_notifies_once() {
    let mut game = new_game(7);
    let state = Rc::new(Cell::new(0u32));
    let stats = Rc::new(Cell::new(0u32));
    let s = state.clone();
    game.on_state_changed(move || s.set(s.get() + 1));
    let s = stats.clone();
    game.on_stats_changed(move || s.set(s.get() + 1));
    game.start();
    state.set(0);
    stats.set(0);

    assert!(game.perform_action(GameAction::SoftDrop));
    assert_eq!((state.get(), stats.get()), (1, 1));

    game.toggle_pause();
    assert!(!game.perform_action(GameAction::SoftDrop));
    assert_eq!((state.get(), stats.get()), (1, 1));
}

#[test]
fn test_notifications_fire_inline() {
    let mut game = new_game(7);
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();
    game.on_state_changed(move || l.borrow_mut().push("state"));
    let l = log.clone();
    game.on_stats_changed(move || l.borrow_mut().push("stats"));
    game.start();
    log.borrow_mut().clear();

    let rows = drop_distance(&game) as usize;
    game.perform_action(GameAction::HardDrop);

    let log = log.borrow();
    // One state per row fallen, then the drop reward, then lock bookkeeping.
    assert!(log[..rows].iter().all(|&e| e == "state"));
    assert_eq!(log[rows], "stats");
    assert_eq!(log.last(), Some(&"state"));
}

#[test]
fn test_game_over_then_fill_sweep() {
    let mut game = new_game(99);
    game.start();
    hard_drop_until_game_over(&mut game);

    assert!(game.is_game_over());
    assert!(game.is_game_over_animating());
    assert!(!game.tick());
    assert!(!game.perform_action(GameAction::HardDrop));

    let mut steps = 0;
    while game.step_clear_animation() {
        steps += 1;
        assert!(steps < 100);
    }
    assert_eq!(steps + 1, BOARD_HEIGHT as usize);
    assert!(!game.is_game_over_animating());
    assert!(!game.step_clear_animation());

    let cells = game.board().cells();
    assert!(cells.iter().all(|&c| c != EMPTY));
    assert!(cells.contains(&GAME_OVER_FILL_COLOR));
}

#[test]
fn test_pause_ignored_after_game_over() {
    let mut game = new_game(3);
    game.start();
    hard_drop_until_game_over(&mut game);

    game.toggle_pause();
    assert!(game.is_game_over());
}

#[test]
fn test_restart_after_game_over() {
    let mut game = new_game(3);
    game.start();
    hard_drop_until_game_over(&mut game);
    assert!(game.score() > 0);

    game.start();
    assert!(game.is_running());
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 0);
    assert!(game.board().is_empty());
    assert!(!game.is_game_over_animating());
}

#[test]
fn test_first_piece_matches_idle_preview() {
    let mut game = new_game(2024);
    let shown = game.active();
    let next = game.next_piece();

    game.start();
    assert_eq!(game.active(), shown);
    assert_eq!(game.next_piece(), next);
}

#[test]
fn test_same_seed_same_session() {
    let mut a = new_game(31337);
    let mut b = new_game(31337);
    a.start();
    b.start();

    for _ in 0..20 {
        if a.is_game_over() {
            break;
        }
        assert_eq!(a.active(), b.active());
        assert_eq!(a.next_piece(), b.next_piece());
        a.perform_action(GameAction::RotateCw);
        b.perform_action(GameAction::RotateCw);
        a.perform_action(GameAction::HardDrop);
        b.perform_action(GameAction::HardDrop);
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_snapshot_follows_game() {
    let mut game = new_game(11);
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(snap.active, game.active_cells());

    game.start();
    game.perform_action(GameAction::HardDrop);
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Running);
    assert_eq!(snap.board, game.board().to_grid());
    assert_eq!(snap.next, game.next_cells());
    assert_eq!(snap.score, game.score());
    assert_eq!(snap.speed_ms, game.speed_ms());
    assert!(snap.clearing_rows.is_empty());
}
