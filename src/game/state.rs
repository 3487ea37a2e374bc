use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction committed on the last advance
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!body.is_empty(), "a snake needs at least a head");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn push_head(&mut self, new_head: Position, should_grow: bool) {
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Board laid out, waiting for a start command
    #[default]
    Idle,
    Running,
    Paused,
    /// The run is over; only a reset leaves this phase
    Ended,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// Snake covers every cell, there is nowhere left to put food
    BoardFilled,
}

impl EndReason {
    pub fn describe(&self) -> &'static str {
        match self {
            EndReason::Wall => "Hit the wall",
            EndReason::SelfCollision => "Bit its own tail",
            EndReason::BoardFilled => "Filled the board",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Direction to commit on the next advance
    pub pending_direction: Direction,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub steps: u32,
    pub end_reason: Option<EndReason>,
    /// The run that just ended beat the stored high score
    pub new_best: bool,
}

impl GameState {
    /// Create a new idle game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            high_score: 0,
            phase: Phase::Idle,
            steps: 0,
            end_reason: None,
            new_best: false,
        }
    }

    /// A run is in progress, paused or not
    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(20, 15), Direction::Right, 3);
        assert_eq!(
            snake.body,
            vec![
                Position::new(20, 15),
                Position::new(19, 15),
                Position::new(18, 15)
            ]
        );
    }

    #[test]
    fn test_push_head() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.push_head(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));

        snake.push_head(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.body[3], Position::new(4, 5));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(10, 10),
            40,
            30,
        );

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(39, 29)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(40, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 30)));
        assert!(!state.is_in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn test_phase_flags() {
        let mut state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            Position::new(1, 1),
            10,
            10,
        );
        assert!(!state.is_running());

        state.phase = Phase::Paused;
        assert!(state.is_running());
        assert!(state.is_paused());

        state.phase = Phase::Ended;
        assert!(!state.is_running());
        assert!(state.is_ended());
    }
}
