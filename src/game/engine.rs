use super::{
    action::Direction,
    config::GameConfig,
    state::{EndReason, GameState, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// The snake grew into the last free cell and no food could be placed
    pub board_filled: bool,
}

/// Movement, feeding and collision rules
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Lay out a fresh board: centred snake heading right, new food, zero score
    pub fn reset(&mut self) -> GameState {
        let grid_width = self.config.grid_width();
        let grid_height = self.config.grid_height();

        let snake = Snake::new(
            Position::new((grid_width / 2) as i32, (grid_height / 2) as i32),
            Direction::Right,
            self.config.initial_snake_length.max(1),
        );

        // A fresh snake never fills a validated grid.
        let food = self
            .spawn_food(&snake, grid_width, grid_height)
            .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, grid_width, grid_height)
    }

    /// Move the snake one cell, eating and growing if the new head lands on food
    pub fn advance(&mut self, state: &mut GameState) -> StepInfo {
        state.snake.direction = state.pending_direction;

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = new_head == state.food;

        state.snake.push_head(new_head, ate_food);
        state.steps += 1;

        let mut board_filled = false;
        if ate_food {
            state.score += self.config.food_score;
            match self.spawn_food(&state.snake, state.grid_width, state.grid_height) {
                Some(food) => state.food = food,
                None => board_filled = true,
            }
        }

        StepInfo {
            ate_food,
            board_filled,
        }
    }

    /// Report whether the head has left the grid or hit the body
    pub fn check_collision(&self, state: &GameState) -> Option<EndReason> {
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            return Some(EndReason::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    /// Pick a random cell outside the snake, or `None` if there is none
    pub fn spawn_food(
        &mut self,
        snake: &Snake,
        grid_width: usize,
        grid_height: usize,
    ) -> Option<Position> {
        if grid_width == 0 || grid_height == 0 || snake.len() >= grid_width * grid_height {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..grid_width) as i32;
            let y = self.rng.gen_range(0..grid_height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
