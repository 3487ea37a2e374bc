/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns true if other is a 90-degree turn away from self
    pub fn is_orthogonal(&self, other: Direction) -> bool {
        *self != other && !self.is_opposite(other)
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Commands the host can send to a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run from the idle screen
    Start,
    /// Pause a running game or resume a paused one
    TogglePause,
    /// Abandon the current run and return to the idle screen
    Reset,
    /// Same as `Reset`, offered from the game-over screen
    PlayAgain,
    /// Steer the snake
    Turn(Direction),
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Turn(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_orthogonal_directions() {
        assert!(Direction::Right.is_orthogonal(Direction::Up));
        assert!(Direction::Right.is_orthogonal(Direction::Down));
        assert!(!Direction::Right.is_orthogonal(Direction::Right));
        assert!(!Direction::Right.is_orthogonal(Direction::Left));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_command_from_direction() {
        assert_eq!(Command::from(Direction::Up), Command::Turn(Direction::Up));
    }
}
