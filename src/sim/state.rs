//! Game state and core simulation types
//!
//! Everything that must survive a save/restore lives here; transient fields
//! are marked `#[serde(skip)]`.

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};
use crate::config::GameConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Ticking suspended, resumable
    Paused,
    /// Terminal: the snake collided
    GameOver,
    /// Terminal: the win score was reached
    Won,
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    SelfHit,
    Obstacle,
}

/// Events emitted by a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten,
    PowerUpCollected,
    /// The best score improved; the new value should be persisted
    NewHighScore(u32),
    /// The win score was reached; the win notification is due shortly
    WinReached,
    Ended(Collision),
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducible spawns
    pub seed: u64,
    pub config: GameConfig,
    /// Body segments, head first. No two segments share a cell.
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub power_up: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub direction: Direction,
    pub score: u32,
    /// Consecutive-food counter, cleared on any non-consuming move
    pub combo: u32,
    /// Current tick interval (ms); the driver re-reads this after every tick
    pub interval_ms: u32,
    /// Best score across games; persisted by the driver
    pub high_score: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Consumption flash, set on eating and cleared by a deferred effect
    #[serde(skip)]
    pub flash: bool,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tunables and the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        Self {
            seed,
            config,
            snake: vec![config.start_cell()],
            food: config.first_food(),
            power_up: None,
            obstacles: Vec::new(),
            direction: Direction::Right,
            score: 0,
            combo: 0,
            interval_ms: config.start_interval_ms,
            high_score: 0,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            flash: false,
            events: Vec::new(),
        }
    }

    /// Head cell of the snake
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Whether any snake segment occupies `cell`
    pub fn snake_occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    /// Begin the game. Ignored unless waiting to start.
    pub fn start(&mut self) {
        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
            log::debug!("game started (seed {})", self.seed);
        }
    }

    /// Suspend or resume ticking. Ignored in any other phase.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Change heading. Rejected if `direction` is the exact reverse of the
    /// current heading, which would drive the head into its own neck.
    /// Takes effect on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase == GamePhase::NotStarted {
            return;
        }
        if !self.direction.is_opposite(direction) {
            self.direction = direction;
        }
    }

    /// Return to the initial state, keeping the high score.
    pub fn reset(&mut self) {
        let high_score = self.high_score;
        *self = Self::with_config(self.config, self.seed);
        self.high_score = high_score;
    }

    /// Restore the interval after a power-up speed boost expires.
    pub fn revert_speed_boost(&mut self) {
        self.interval_ms += self.config.boost_revert_ms;
    }

    /// Drain the events accumulated since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
