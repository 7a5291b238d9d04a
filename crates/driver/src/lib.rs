//! Timer driver for the engine.
//!
//! The engine exposes `tick()` and `step_clear_animation()` but owns no
//! timers. [`Driver`] keeps two deadlines on a [`Clock`]:
//!
//! - **gravity** at the level's speed, calling [`Game::tick`]
//! - **animation** at a fixed 250ms cadence, calling
//!   [`Game::step_clear_animation`] while a line clear or the game-over fill
//!   is running
//!
//! At most one of them is armed at a time. The host loop waits up to
//! [`Driver::time_until_next`] for input, then calls [`Driver::poll`].

use std::time::Duration;

use tetris_core::types::ANIMATION_TICK_MS;
use tetris_core::{Clock, Game};
use tracing::debug;

const ANIMATION_INTERVAL: Duration = Duration::from_millis(ANIMATION_TICK_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    interval: Duration,
    due: Duration,
}

impl Timer {
    fn arm(now: Duration, interval: Duration) -> Self {
        Self {
            interval,
            due: now + interval,
        }
    }

    fn is_due(&self, now: Duration) -> bool {
        now >= self.due
    }

    fn rearm(&mut self, now: Duration) {
        self.due = now + self.interval;
    }
}

/// What a call to [`Driver::poll`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// No timer was due
    Waiting,
    /// A gravity tick ran
    Gravity,
    /// An animation step ran
    Animation,
}

/// Paces gravity and animations for one [`Game`]
#[derive(Debug)]
pub struct Driver<C: Clock> {
    clock: C,
    gravity: Option<Timer>,
    animation: Option<Timer>,
}

impl<C: Clock> Driver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            gravity: None,
            animation: None,
        }
    }

    /// Start (or restart) a game and arm gravity at its speed
    pub fn start_game<G: Clock>(&mut self, game: &mut Game<G>) {
        game.start();
        self.stop_animation();
        self.start_gravity(game);
    }

    /// Pause or resume the game, disarming gravity while paused
    pub fn toggle_pause<G: Clock>(&mut self, game: &mut Game<G>) {
        game.toggle_pause();
        if game.is_paused() {
            self.stop_gravity();
        } else if game.is_running() {
            self.start_gravity(game);
        }
    }

    /// Disarm every timer
    pub fn stop(&mut self) {
        self.stop_gravity();
        self.stop_animation();
    }

    /// Fire every timer that is due
    ///
    /// Reports the last timer that ran.
    pub fn poll<G: Clock>(&mut self, game: &mut Game<G>) -> PollOutcome {
        let now = self.clock.now();
        let mut outcome = PollOutcome::Waiting;

        if self.gravity.is_some_and(|t| t.is_due(now)) {
            self.on_gravity(game, now);
            outcome = PollOutcome::Gravity;
        }

        if self.animation.is_some_and(|t| t.is_due(now)) {
            self.on_animation(game, now);
            outcome = PollOutcome::Animation;
        }

        outcome
    }

    /// Time left until the next armed timer fires, `None` when nothing is armed
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        [self.gravity, self.animation]
            .into_iter()
            .flatten()
            .map(|t| t.due.saturating_sub(now))
            .min()
    }

    /// Current gravity interval, if gravity is armed
    pub fn gravity_interval(&self) -> Option<Duration> {
        self.gravity.map(|t| t.interval)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn on_gravity<G: Clock>(&mut self, game: &mut Game<G>, now: Duration) {
        let alive = game.tick();

        if game.is_clearing() || game.is_game_over_animating() {
            self.stop_gravity();
            self.start_animation();
            return;
        }

        if !alive {
            self.stop_gravity();
            if game.is_game_over() {
                self.stop_animation();
            }
            return;
        }

        let interval = speed_of(game);
        if self.gravity_interval() != Some(interval) {
            debug!(interval_ms = interval.as_millis() as u64, "gravity speed changed");
            self.start_gravity(game);
        } else if let Some(timer) = self.gravity.as_mut() {
            timer.rearm(now);
        }
    }

    fn on_animation<G: Clock>(&mut self, game: &mut Game<G>, now: Duration) {
        let animating = game.is_clearing() || game.is_game_over_animating();
        if !animating || !game.step_clear_animation() {
            self.stop_animation();
            if game.is_running() {
                self.start_gravity(game);
            }
            return;
        }

        if let Some(timer) = self.animation.as_mut() {
            timer.rearm(now);
        }
    }

    fn start_gravity<G: Clock>(&mut self, game: &Game<G>) {
        self.gravity = Some(Timer::arm(self.clock.now(), speed_of(game)));
    }

    fn stop_gravity(&mut self) {
        self.gravity = None;
    }

    fn start_animation(&mut self) {
        if self.animation.is_some() {
            return;
        }
        debug!("animation timer armed");
        self.animation = Some(Timer::arm(self.clock.now(), ANIMATION_INTERVAL));
    }

    fn stop_animation(&mut self) {
        self.animation = None;
    }
}

fn speed_of<G: Clock>(game: &Game<G>) -> Duration {
    Duration::from_millis(game.speed_ms() as u64)
}

#[cfg(test)]
mod tests {
    use tetris_core::types::{GameAction, BOARD_HEIGHT, EMPTY};
    use tetris_core::ManualClock;

    use super::*;

    fn setup() -> (Driver<ManualClock>, Game<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let driver = Driver::new(clock.clone());
        let game = Game::with_clock(clock.clone(), 777);
        (driver, game, clock)
    }

    /// Hard drop at the spawn column until the stack reaches the top
    fn top_out(game: &mut Game<ManualClock>) {
        for _ in 0..200 {
            if game.is_game_over() {
                return;
            }
            game.perform_action(GameAction::HardDrop);
        }
        panic!("stack never reached the top");
    }

    #[test]
    fn nothing_armed_before_start() {
        let (mut driver, mut game, clock) = setup();
        assert_eq!(driver.time_until_next(), None);

        clock.advance_ms(5000);
        assert_eq!(driver.poll(&mut game), PollOutcome::Waiting);
    }

    #[test]
    fn gravity_fires_at_level_speed() {
        let (mut driver, mut game, clock) = setup();
        driver.start_game(&mut game);
        let y = game.active().y;

        assert_eq!(driver.gravity_interval(), Some(Duration::from_millis(1000)));
        assert_eq!(driver.time_until_next(), Some(Duration::from_millis(1000)));

        clock.advance_ms(999);
        assert_eq!(driver.poll(&mut game), PollOutcome::Waiting);
        assert_eq!(game.active().y, y);

        clock.advance_ms(1);
        assert_eq!(driver.poll(&mut game), PollOutcome::Gravity);
        assert_eq!(game.active().y, y + 1);
        assert_eq!(driver.time_until_next(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn pause_disarms_gravity() {
        let (mut driver, mut game, clock) = setup();
        driver.start_game(&mut game);

        driver.toggle_pause(&mut game);
        assert!(game.is_paused());
        assert_eq!(driver.time_until_next(), None);

        clock.advance_ms(3000);
        assert_eq!(driver.poll(&mut game), PollOutcome::Waiting);

        driver.toggle_pause(&mut game);
        assert!(game.is_running());
        assert_eq!(driver.time_until_next(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn pause_before_start_arms_nothing() {
        let (mut driver, mut game, _) = setup();
        driver.toggle_pause(&mut game);
        assert_eq!(driver.time_until_next(), None);
    }

    #[test]
    fn game_over_switches_to_fill_animation() {
        let (mut driver, mut game, clock) = setup();
        driver.start_game(&mut game);
        top_out(&mut game);
        assert!(game.is_game_over_animating());

        // The gravity tick notices the animation and hands over.
        clock.advance_ms(1000);
        assert_eq!(driver.poll(&mut game), PollOutcome::Gravity);
        assert!(driver.is_animating());
        assert_eq!(driver.gravity_interval(), None);
        assert_eq!(driver.time_until_next(), Some(Duration::from_millis(250)));

        let mut steps = 0;
        while driver.is_animating() {
            clock.advance_ms(250);
            assert_eq!(driver.poll(&mut game), PollOutcome::Animation);
            steps += 1;
            assert!(steps <= BOARD_HEIGHT as usize + 1);
        }

        assert_eq!(steps, BOARD_HEIGHT as usize);
        assert!(!game.is_game_over_animating());
        assert!(game.board().cells().iter().all(|&c| c != EMPTY));
        assert_eq!(driver.time_until_next(), None);
    }

    #[test]
    fn restart_after_game_over_rearms_gravity() {
        let (mut driver, mut game, clock) = setup();
        driver.start_game(&mut game);
        top_out(&mut game);
        clock.advance_ms(1000);
        driver.poll(&mut game);
        assert!(driver.is_animating());

        driver.start_game(&mut game);
        assert!(game.is_running());
        assert!(!driver.is_animating());
        assert_eq!(driver.gravity_interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn stop_disarms_everything() {
        let (mut driver, mut game, _) = setup();
        driver.start_game(&mut game);
        driver.stop();
        assert_eq!(driver.time_until_next(), None);
    }
}
