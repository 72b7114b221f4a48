//! One discrete simulation step.
//!
//! Collision checks run before any mutation; on a collision the prior state
//! is preserved apart from the phase transition.

use super::grid::Cell;
use super::spawn;
use super::state::{Collision, GameEvent, GamePhase, GameState};

/// Advance the game by exactly one step. No-op unless the game is running.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    let head = state.head().step(state.direction);

    if let Some(collision) = check_collision(state, head) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::Ended(collision));
        log::debug!("game over: {:?} at {:?}", collision, head);
        return;
    }

    state.snake.insert(0, head);

    if head == state.food {
        state.score += 1;
        state.combo += 1;
        state.flash = true;
        state.events.push(GameEvent::FoodEaten);

        if state.score > state.high_score {
            state.high_score = state.score;
            state.events.push(GameEvent::NewHighScore(state.score));
        }

        let mut rng = spawn::tick_rng(state);
        spawn::respawn_after_food(state, &mut rng);

        state.interval_ms = state
            .interval_ms
            .saturating_sub(state.config.interval_step_ms)
            .max(state.config.interval_floor_ms);
    } else {
        state.snake.pop();
        state.combo = 0;
    }

    // The power-up the head landed on, if any; a freshly respawned power-up
    // can never sit on the head because placement avoids the snake.
    if state.power_up == Some(head) {
        state.score += 3;
        state.combo += 2;
        state.power_up = None;
        state.flash = true;
        state.events.push(GameEvent::PowerUpCollected);

        state.interval_ms = state
            .interval_ms
            .saturating_sub(state.config.boost_step_ms)
            .max(state.config.boost_floor_ms);
    }

    if state.score >= state.config.win_score {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::WinReached);
        log::debug!("won at score {}", state.score);
    }

    debug_assert!(segments_disjoint(&state.snake));
}

fn check_collision(state: &GameState, head: Cell) -> Option<Collision> {
    if !head.in_bounds(state.config.grid_size) {
        return Some(Collision::Wall);
    }
    if state.snake_occupies(head) {
        return Some(Collision::SelfHit);
    }
    if state.obstacles.contains(&head) {
        return Some(Collision::Obstacle);
    }
    None
}

fn segments_disjoint(snake: &[Cell]) -> bool {
    snake
        .iter()
        .enumerate()
        .all(|(i, a)| snake[i + 1..].iter().all(|b| a != b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::grid::Direction;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    #[test]
    fn test_tick_is_noop_until_started() {
        let mut state = GameState::new(1);
        let before = state.clone();
        tick(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_tick_is_noop_while_paused() {
        let mut state = running_state(1);
        state.toggle_pause();
        let before = state.clone();
        tick(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_plain_move_keeps_length_and_clears_combo() {
        let mut state = running_state(1);
        state.combo = 2;
        tick(&mut state);
        assert_eq!(state.head(), Cell::new(10, 11));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_food_consumption_scores_and_grows() {
        let mut state = running_state(7);
        state.food = Cell::new(10, 11);

        tick(&mut state);

        assert_eq!(state.head(), Cell::new(10, 11));
        assert_eq!(state.score, 1);
        assert_eq!(state.combo, 1);
        assert_eq!(state.snake.len(), 2);
        assert!(state.flash);
        assert!(state.events.contains(&GameEvent::FoodEaten));
        // Food moved somewhere free
        assert_ne!(state.food, Cell::new(10, 11));
        assert!(!state.snake_occupies(state.food));
        assert!(!state.obstacles.contains(&state.food));
        // Sped up
        assert_eq!(state.interval_ms, 192);
    }

    #[test]
    fn test_wall_collision_ends_game_without_moving() {
        let mut state = running_state(1);
        state.snake = vec![Cell::new(0, 5)];
        state.set_direction(Direction::Up);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake, vec![Cell::new(0, 5)]);
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::Ended(Collision::Wall)));
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = running_state(1);
        // Head at (6,5) heading up into its own second segment
        state.snake = vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(5, 6)];
        state.direction = Direction::Up;

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.snake.len(), 3);
        assert!(state.events.contains(&GameEvent::Ended(Collision::SelfHit)));
    }

    #[test]
    fn test_obstacle_collision_ends_game() {
        let mut state = running_state(1);
        state.obstacles = vec![Cell::new(10, 11)];

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(
            state
                .events
                .contains(&GameEvent::Ended(Collision::Obstacle))
        );
    }

    #[test]
    fn test_power_up_consumption() {
        let mut state = running_state(1);
        state.power_up = Some(Cell::new(10, 11));

        tick(&mut state);

        assert_eq!(state.score, 3);
        assert_eq!(state.combo, 2);
        assert_eq!(state.power_up, None);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.interval_ms, 170);
        assert!(state.events.contains(&GameEvent::PowerUpCollected));
    }

    #[test]
    fn test_high_score_updates_on_food_only() {
        let mut state = running_state(1);
        state.power_up = Some(Cell::new(10, 11));

        tick(&mut state);

        // Power-up points alone do not move the best score
        assert_eq!(state.score, 3);
        assert_eq!(state.high_score, 0);

        state.food = state.head().step(state.direction);
        tick(&mut state);
        assert_eq!(state.high_score, 4);
        assert!(state.events.contains(&GameEvent::NewHighScore(4)));
    }

    #[test]
    fn test_interval_floors_at_80() {
        let config = GameConfig {
            win_score: 100,
            ..Default::default()
        };
        let mut state = GameState::with_config(config, 3);
        state.start();

        let mut last = state.interval_ms;
        for _ in 0..20 {
            state.snake = vec![Cell::new(10, 10)];
            state.direction = Direction::Right;
            state.obstacles.clear();
            state.food = Cell::new(10, 11);

            tick(&mut state);
            assert_eq!(state.phase, GamePhase::Running);

            if last > 80 {
                assert!(state.interval_ms < last);
            } else {
                assert_eq!(state.interval_ms, 80);
            }
            last = state.interval_ms;
        }
        assert_eq!(state.interval_ms, 80);
    }

    #[test]
    fn test_win_at_threshold_is_terminal() {
        let mut state = running_state(9);
        state.score = 4;
        state.food = Cell::new(10, 11);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.events.contains(&GameEvent::WinReached));

        let before = state.clone();
        tick(&mut state);
        assert_eq!(state, before);
    }

    #[test]
    fn test_power_up_crossing_threshold_wins() {
        let mut state = running_state(9);
        state.score = 3;
        state.power_up = Some(Cell::new(10, 11));

        tick(&mut state);

        assert_eq!(state.score, 6);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(state.events.contains(&GameEvent::WinReached));
    }

    proptest! {
        #[test]
        fn segments_stay_disjoint_over_random_play(
            seed in any::<u64>(),
            turns in prop::collection::vec(0u8..4, 1..300),
        ) {
            let config = GameConfig { win_score: u32::MAX, ..Default::default() };
            let mut state = GameState::with_config(config, seed);
            state.start();

            for turn in turns {
                let dir = match turn {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                state.set_direction(dir);
                tick(&mut state);

                prop_assert!(segments_disjoint(&state.snake));
                if state.phase != GamePhase::Running {
                    break;
                }
            }
        }
    }
}
