use log::debug;

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

    /// Returns the (row, col) offset for one cell in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Outcome of a direction request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Input was a reversal and was ignored
    Rejected,
    /// Direction updated
    Accepted,
    /// First direction of the session; the game should start moving
    First,
}

impl Turn {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Turn::Rejected)
    }
}

/// Buffers the latest legal direction between ticks.
///
/// The engine reads [`DirectionController::current`] once per tick, so any
/// number of requests may arrive between two steps; only the last legal one
/// wins. A request is judged against the direction held at the time it
/// arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectionController {
    current: Option<Direction>,
}

impl DirectionController {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The direction the snake is moving in, `None` before the first input
    pub fn current(&self) -> Option<Direction> {
        self.current
    }

    pub fn request(&mut self, input: Direction) -> Turn {
        match self.current {
            Some(current) if current.is_opposite(input) => {
                debug!("ignoring reversal {:?} -> {:?}", current, input);
                Turn::Rejected
            }
            Some(_) => {
                self.current = Some(input);
                Turn::Accepted
            }
            None => {
                self.current = Some(input);
                Turn::First
            }
        }
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
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }

    #[test]
    fn test_first_request_is_flagged() {
        let mut controller = DirectionController::new();
        assert_eq!(controller.current(), None);

        assert_eq!(controller.request(Direction::Down), Turn::First);
        assert_eq!(controller.current(), Some(Direction::Down));

        assert_eq!(controller.request(Direction::Left), Turn::Accepted);
    }

    #[test]
    fn test_reversal_guard() {
        let mut controller = DirectionController::new();
        controller.request(Direction::Left);

        assert_eq!(controller.request(Direction::Right), Turn::Rejected);
        assert_eq!(controller.current(), Some(Direction::Left));

        assert_eq!(controller.request(Direction::Up), Turn::Accepted);
        assert_eq!(controller.current(), Some(Direction::Up));
    }

    #[test]
    fn test_same_direction_is_accepted() {
        let mut controller = DirectionController::new();
        controller.request(Direction::Right);
        assert!(controller.request(Direction::Right).is_accepted());
        assert_eq!(controller.current(), Some(Direction::Right));
    }

    #[test]
    fn test_any_first_direction_is_legal() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let mut controller = DirectionController::new();
            assert_eq!(controller.request(dir), Turn::First);
        }
    }
}
