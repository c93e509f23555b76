use std::time::Duration;

use log::debug;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::snake::{Direction, Snake};
use crate::Cell;

pub const INITIAL_SNAKE_LEN: usize = 3;
const FOODS_PER_SPEEDUP: u32 = 5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Paused,
    GameOver,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    Advanced,
    Ate,
    Crashed,
    /// The snake covers the whole board, so there is nowhere to put food.
    Won,
}

/// Full simulation state for one session. Generic over the random source so
/// tests can drive it with a seeded generator.
pub struct GameState<R: Rng = ThreadRng> {
    rng: R,
    config: GameConfig,
    snake: Snake,
    direction: Direction,
    pending: Direction,
    food: Cell,
    score: u32,
    high_score: u32,
    speed: f64,
    phase: GamePhase,
    won: bool,
    accumulator: Duration,
    blink_timer: Duration,
    blink_visible: bool,
}

impl GameState<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        GameState::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameState<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        let mut state = GameState {
            rng,
            snake: Snake::new((1, 1), 1, Direction::Right),
            direction: Direction::Right,
            pending: Direction::Right,
            food: (0, 0),
            score: 0,
            high_score: 0,
            speed: config.base_speed,
            phase: GamePhase::Running,
            won: false,
            accumulator: Duration::ZERO,
            blink_timer: Duration::ZERO,
            blink_visible: true,
            config,
        };
        state.reset();
        state
    }

    /// Puts the board back in its starting configuration: centered 3-cell
    /// snake heading right, fresh food, zero score, base speed. The high
    /// score carries over.
    pub fn reset(&mut self) {
        let center = self.config.grid_size / 2;
        self.snake = Snake::new((center - 1, center), INITIAL_SNAKE_LEN, Direction::Right);
        self.direction = Direction::Right;
        self.pending = Direction::Right;
        self.score = 0;
        self.speed = self.config.base_speed;
        self.phase = GamePhase::Running;
        self.won = false;
        self.accumulator = Duration::ZERO;
        self.blink_timer = Duration::ZERO;
        self.blink_visible = true;
        // A freshly reset board always has free cells.
        self.food = self.spawn_food().unwrap_or((0, 0));
    }

    /// Buffers a direction change for the next tick. Reversing straight into
    /// the snake's own neck is ignored; otherwise the last request before a
    /// tick wins.
    pub fn steer(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.pending = dir;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => {
                debug!("paused at score {}", self.score);
                GamePhase::Paused
            }
            GamePhase::Paused => {
                debug!("resumed");
                GamePhase::Running
            }
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Starts a new round, but only from the game-over screen.
    pub fn restart(&mut self) {
        if self.phase == GamePhase::GameOver {
            debug!("restarting, high score {}", self.high_score);
            self.reset();
        }
    }

    /// Feeds `delta` of wall-clock time into the simulation. The food blink
    /// runs on real time even while paused; movement ticks only run while
    /// the game is in the Running phase, one tick per elapsed tick duration.
    pub fn advance(&mut self, delta: Duration) {
        self.blink_timer += delta;
        if self.blink_timer >= self.config.blink_interval {
            self.blink_visible = !self.blink_visible;
            self.blink_timer = Duration::ZERO;
        }

        if self.phase != GamePhase::Running {
            return;
        }

        self.accumulator += delta;
        while self.accumulator >= self.tick_duration() {
            self.accumulator -= self.tick_duration();
            if matches!(self.tick(), StepResult::Crashed | StepResult::Won) {
                break;
            }
        }
    }

    /// One movement step: commits the pending direction, moves the head, and
    /// resolves wall/body collisions and food pickup. The collision check
    /// runs before the tail is dropped, so moving onto the current tail cell
    /// still crashes.
    pub fn tick(&mut self) -> StepResult {
        self.direction = self.pending;
        let (dx, dy) = self.direction.delta();
        let head = self.snake.head();
        let new_head = (head.0 + dx, head.1 + dy);
        let n = self.config.grid_size;

        if new_head.0 < 0
            || new_head.1 < 0
            || new_head.0 >= n
            || new_head.1 >= n
            || self.snake.contains(new_head)
        {
            debug!("crashed at {:?}, score {}", new_head, self.score);
            self.phase = GamePhase::GameOver;
            return StepResult::Crashed;
        }

        self.snake.push_head(new_head);

        if new_head == self.food {
            self.score += 1;
            if self.score > self.high_score {
                self.high_score = self.score;
            }
            self.update_speed();
            match self.spawn_food() {
                Some(food) => {
                    self.food = food;
                    StepResult::Ate
                }
                None => {
                    self.won = true;
                    self.phase = GamePhase::GameOver;
                    StepResult::Won
                }
            }
        } else {
            self.snake.pop_tail();
            StepResult::Advanced
        }
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed / self.config.base_speed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// Overrides the food cell. Used by deterministic tests to script what
    /// the snake runs into.
    pub fn place_food(&mut self, cell: Cell) {
        self.food = cell;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Seeds the session with a previously persisted high score. Never
    /// lowers a score already reached this session.
    pub fn set_high_score(&mut self, value: u32) {
        self.high_score = self.high_score.max(value);
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn blink_visible(&self) -> bool {
        self.blink_visible
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    ///////////////////////////////////////////////////////////////////////////

    fn update_speed(&mut self) {
        let level = (self.score / FOODS_PER_SPEEDUP) as f64;
        self.speed =
            (self.config.base_speed + level * self.config.speed_step).min(self.config.max_speed);
    }

    fn spawn_food(&mut self) -> Option<Cell> {
        if self.snake.len() >= self.config.cell_count() {
            return None;
        }
        let n = self.config.grid_size;
        loop {
            let cell = (self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            if !self.snake.contains(cell) {
                return Some(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_state() -> GameState<StdRng> {
        GameState::with_rng(GameConfig::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn initial_food_misses_the_snake() {
        let state = seeded_state();
        assert!(!state.snake().contains(state.food()));
    }

    #[test]
    fn reversal_is_rejected_but_turns_are_kept() {
        let mut state = seeded_state();
        state.steer(Direction::Left);
        assert_eq!(state.pending_direction(), Direction::Right);

        state.steer(Direction::Up);
        assert_eq!(state.pending_direction(), Direction::Up);

        // Last write before the tick wins.
        state.steer(Direction::Down);
        assert_eq!(state.pending_direction(), Direction::Down);
    }

    #[test]
    fn reversal_check_uses_committed_direction() {
        let mut state = seeded_state();
        state.steer(Direction::Up);
        // Down opposes the buffered Up but not the committed Right, so it
        // overwrites the buffer.
        state.steer(Direction::Down);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Down);

        state.place_food((0, 0));
        state.tick();
        assert_eq!(state.direction(), Direction::Down);

        // Up now opposes the committed direction and is dropped.
        state.steer(Direction::Up);
        assert_eq!(state.pending_direction(), Direction::Down);
    }

    #[test]
    fn speed_grows_stepwise_and_clamps() {
        let mut state = seeded_state();
        let base = state.config().base_speed;

        let mut last = state.speed();
        for _ in 0..200 {
            state.score += 1;
            state.update_speed();
            assert!(state.speed() >= last);
            last = state.speed();
        }
        assert_eq!(state.speed(), state.config().max_speed);

        state.score = 4;
        state.update_speed();
        assert_eq!(state.speed(), base);
        state.score = 5;
        state.update_speed();
        assert_eq!(state.speed(), base + state.config().speed_step);
    }

    #[test]
    fn pause_toggles_but_never_leaves_game_over() {
        let mut state = seeded_state();
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::Running);

        state.phase = GamePhase::GameOver;
        state.toggle_pause();
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn restart_only_works_after_game_over() {
        let mut state = seeded_state();
        state.score = 3;
        state.restart();
        assert_eq!(state.score(), 3);

        state.phase = GamePhase::GameOver;
        state.restart();
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), GamePhase::Running);
    }

    #[test]
    fn stored_high_score_never_lowers_a_live_one() {
        let mut state = seeded_state();
        state.set_high_score(12);
        assert_eq!(state.high_score(), 12);
        state.set_high_score(3);
        assert_eq!(state.high_score(), 12);
    }

    #[test]
    fn eating_grows_and_rescores() {
        let mut state = seeded_state();
        let head = state.snake().head();
        state.place_food((head.0 + 1, head.1));

        assert_eq!(state.tick(), StepResult::Ate);
        assert_eq!(state.score(), 1);
        assert_eq!(state.high_score(), 1);
        assert_eq!(state.snake().len(), INITIAL_SNAKE_LEN + 1);
        assert!(!state.snake().contains(state.food()));
    }
}
