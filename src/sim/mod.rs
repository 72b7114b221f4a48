//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick invocation
//! - Seeded RNG only
//! - No wall-clock time, rendering, or platform dependencies

pub mod grid;
pub mod spawn;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction};
pub use state::{Collision, GameEvent, GamePhase, GameState};
pub use tick::tick;
