//! Data-driven game tunables.
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::sim::grid::Cell;

/// Every tunable constant of the simulation.
///
/// `Default` is the standard game tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: i32,
    /// Score at which the game is won
    pub win_score: u32,
    /// Tick interval at game start (ms)
    pub start_interval_ms: u32,
    /// Interval reduction per food consumed (ms)
    pub interval_step_ms: u32,
    /// Minimum interval reachable through food speed-ups (ms)
    pub interval_floor_ms: u32,
    /// Interval reduction from a power-up boost (ms)
    pub boost_step_ms: u32,
    /// Minimum interval while boosted (ms)
    pub boost_floor_ms: u32,
    /// Interval restored when a boost reverts (ms)
    pub boost_revert_ms: u32,
    /// Delay before a boost reverts (ms)
    pub boost_revert_delay_ms: u64,
    /// Delay between reaching the win score and the win notification (ms)
    pub win_delay_ms: u64,
    /// Duration of the consumption flash flag (ms)
    pub flash_ms: u64,
    /// Probability of a power-up appearing after food is consumed
    pub power_up_chance: f64,
    /// One obstacle per this many points of score
    pub obstacle_score_step: u32,
    /// Maximum number of obstacles on the board
    pub max_obstacles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            win_score: 5,
            start_interval_ms: 200,
            interval_step_ms: 8,
            interval_floor_ms: 80,
            boost_step_ms: 30,
            boost_floor_ms: 60,
            boost_revert_ms: 20,
            boost_revert_delay_ms: 2000,
            win_delay_ms: 500,
            flash_ms: 500,
            power_up_chance: 0.2,
            obstacle_score_step: 3,
            max_obstacles: 8,
        }
    }
}

impl GameConfig {
    /// Snake spawn cell (grid centre).
    pub fn start_cell(&self) -> Cell {
        Cell::new(self.grid_size / 2, self.grid_size / 2)
    }

    /// Initial food cell, three quarters of the way down the diagonal.
    pub fn first_food(&self) -> Cell {
        Cell::new(3 * self.grid_size / 4, 3 * self.grid_size / 4)
    }

    /// Number of obstacles on the board at a given score.
    pub fn obstacle_count(&self, score: u32) -> usize {
        ((score / self.obstacle_score_step) as usize).min(self.max_obstacles)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snake-config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded config from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
