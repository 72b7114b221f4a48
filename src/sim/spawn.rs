//! Randomized placement of food, power-ups, and obstacles.
//!
//! Rejection sampling is bounded; once the bound is hit the spawner falls
//! back to picking uniformly from the explicit set of free cells, so
//! placement terminates even on a nearly full board.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::Cell;
use super::state::GameState;

/// Rejection-sampling attempts before falling back to free-cell enumeration
const SAMPLE_ATTEMPTS: u32 = 64;

/// RNG for the spawns of a single tick, derived from the run seed and the
/// tick counter so that replaying a run reproduces every placement.
pub(super) fn tick_rng(state: &GameState) -> Pcg32 {
    Pcg32::seed_from_u64(state.seed ^ state.time_ticks.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// A uniformly random cell for which `occupied` is false, or `None` when no
/// free cell is left.
pub(super) fn free_cell(
    rng: &mut Pcg32,
    size: i32,
    occupied: impl Fn(Cell) -> bool,
) -> Option<Cell> {
    for _ in 0..SAMPLE_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..size), rng.random_range(0..size));
        if !occupied(cell) {
            return Some(cell);
        }
    }

    // Board is nearly full; sample from the free cells directly.
    let free: Vec<Cell> = (0..size)
        .flat_map(|row| (0..size).map(move |col| Cell::new(row, col)))
        .filter(|&cell| !occupied(cell))
        .collect();
    if free.is_empty() {
        log::warn!("no free cell left to spawn into");
        return None;
    }
    Some(free[rng.random_range(0..free.len())])
}

/// Respawn food, regenerate obstacles, and maybe place a power-up after a
/// food consumption. Each placement avoids the snake and everything placed
/// before it, so nothing overlaps at spawn time.
pub(super) fn respawn_after_food(state: &mut GameState, rng: &mut Pcg32) {
    let size = state.config.grid_size;

    let food = free_cell(rng, size, |c| {
        state.snake_occupies(c) || state.obstacles.contains(&c)
    });
    if let Some(food) = food {
        state.food = food;
    }

    state.obstacles = generate_obstacles(state, rng);

    state.power_up = if rng.random_bool(state.config.power_up_chance) {
        free_cell(rng, size, |c| {
            state.snake_occupies(c) || c == state.food || state.obstacles.contains(&c)
        })
    } else {
        None
    };
}

/// Obstacles for the current score, avoiding the snake, the food, and each
/// other.
fn generate_obstacles(state: &GameState, rng: &mut Pcg32) -> Vec<Cell> {
    let count = state.config.obstacle_count(state.score);
    let mut obstacles: Vec<Cell> = Vec::with_capacity(count);
    for _ in 0..count {
        let placed = free_cell(rng, state.config.grid_size, |c| {
            state.snake_occupies(c) || c == state.food || obstacles.contains(&c)
        });
        match placed {
            Some(cell) => obstacles.push(cell),
            None => break,
        }
    }
    obstacles
}
