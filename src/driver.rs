//! External game loop.
//!
//! Owns the `GameState`, the tick schedule, and every deferred effect. The
//! simulation never schedules anything itself; it emits events and the loop
//! turns them into future work. Each deferred effect captures the generation
//! current when it was scheduled, and `reset`/`cancel` bump the generation,
//! so a callback that outlives its game becomes a no-op instead of mutating
//! the next game's state.

use crate::config::GameConfig;
use crate::highscore;
use crate::sim::grid::Direction;
use crate::sim::state::{GameEvent, GameState};
use crate::sim::tick::tick;

/// Work scheduled for a future instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Invoke the win callback
    WinNotify,
    /// Restore the interval after a power-up boost
    BoostRevert,
    /// Clear the consumption flash flag
    FlashEnd,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due_ms: u64,
    generation: u64,
    effect: Deferred,
}

type Callback = Box<dyn FnMut()>;

/// Drives the simulation from an external monotonic millisecond clock.
///
/// The embedding application calls [`GameLoop::advance`] as often as it
/// likes (per frame, per timer fire); elapsed ticks and due deferred effects
/// are processed in order. Commands are applied synchronously between ticks.
pub struct GameLoop {
    state: GameState,
    next_tick_ms: Option<u64>,
    scheduled: Vec<Scheduled>,
    generation: u64,
    on_win: Option<Callback>,
    on_close: Option<Callback>,
}

impl GameLoop {
    /// New loop with default tunables; the persisted high score is loaded
    /// into the fresh state.
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let mut state = GameState::with_config(config, seed);
        state.high_score = highscore::load();
        Self {
            state,
            next_tick_ms: None,
            scheduled: Vec::new(),
            generation: 0,
            on_win: None,
            on_close: None,
        }
    }

    /// Callback invoked once, shortly after the win score is reached.
    pub fn on_win(&mut self, callback: impl FnMut() + 'static) {
        self.on_win = Some(Box::new(callback));
    }

    /// Callback invoked when the player cancels the game.
    pub fn on_close(&mut self, callback: impl FnMut() + 'static) {
        self.on_close = Some(Box::new(callback));
    }

    /// Read access for the display layer
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    /// Latest call between two ticks wins.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.set_direction(direction);
    }

    /// Return to the initial state, keeping the high score. Pending deferred
    /// effects stay queued but belong to the old generation and will be
    /// dropped when they come due.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.next_tick_ms = None;
        self.state.reset();
        log::debug!("reset to generation {}", self.generation);
    }

    /// Explicit user cancellation, independent of game outcome.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.next_tick_ms = None;
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }

    /// Advance to `now_ms`, running every elapsed tick and firing every due
    /// deferred effect in order. The interval is re-read after each tick, so
    /// a tick that speeds the game up shortens the wait for the next one.
    pub fn advance(&mut self, now_ms: u64) {
        if self.next_tick_ms.is_none() {
            self.next_tick_ms = Some(now_ms + u64::from(self.state.interval_ms));
        }

        while let Some(tick_ms) = self.next_tick_ms {
            if tick_ms > now_ms {
                break;
            }
            self.fire_due(tick_ms);
            tick(&mut self.state);
            self.handle_events(tick_ms);
            self.next_tick_ms = Some(tick_ms + u64::from(self.state.interval_ms));
        }

        self.fire_due(now_ms);
    }

    fn handle_events(&mut self, now_ms: u64) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::FoodEaten => {
                    self.schedule(now_ms + self.state.config.flash_ms, Deferred::FlashEnd);
                }
                GameEvent::PowerUpCollected => {
                    self.schedule(now_ms + self.state.config.flash_ms, Deferred::FlashEnd);
                    self.schedule(
                        now_ms + self.state.config.boost_revert_delay_ms,
                        Deferred::BoostRevert,
                    );
                }
                GameEvent::NewHighScore(score) => highscore::save(score),
                GameEvent::WinReached => {
                    self.schedule(now_ms + self.state.config.win_delay_ms, Deferred::WinNotify);
                }
                GameEvent::Ended(collision) => log::debug!("run ended: {:?}", collision),
            }
        }
    }

    fn schedule(&mut self, due_ms: u64, effect: Deferred) {
        self.scheduled.push(Scheduled {
            due_ms,
            generation: self.generation,
            effect,
        });
    }

    fn fire_due(&mut self, now_ms: u64) {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.scheduled.len() {
            if self.scheduled[i].due_ms <= now_ms {
                due.push(self.scheduled.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| s.due_ms);

        for item in due {
            // Scheduled under an earlier generation; its game is gone.
            if item.generation != self.generation {
                continue;
            }
            match item.effect {
                Deferred::WinNotify => {
                    if let Some(callback) = self.on_win.as_mut() {
                        callback();
                    }
                }
                Deferred::BoostRevert => self.state.revert_speed_boost(),
                Deferred::FlashEnd => self.state.flash = false,
            }
        }
    }
}
