use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::Direction;
use super::grid::Grid;

/// A position on the board, in distance units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
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

    /// Move `unit` distance units in a direction
    pub fn moved_in_direction(&self, direction: Direction, unit: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * unit, dy * unit)
    }

    /// Delta (dx, dy) that takes `from` to `self`
    pub fn delta_from(&self, from: Cell) -> (i32, i32) {
        (self.x - from.x, self.y - from.y)
    }
}

/// A snake on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
    /// Direction of the last movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake from explicit segments, head first
    pub fn new(body: Vec<Cell>, direction: Direction) -> Self {
        debug_assert!(body.len() >= 2, "a snake starts with at least two segments");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segment directly behind the head
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body_segments().contains(&cell)
    }

    /// Check if any segment, head included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Re-attach a tail segment dropped by the last move
    pub fn regrow(&mut self, tail: Cell) {
        self.body.push(tail);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// One of the two competitors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    User,
    Ai,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::User => write!(f, "User"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    User,
    Ai,
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::User => write!(f, "User"),
            Winner::Ai => write!(f, "AI"),
            Winner::Draw => write!(f, "Draw"),
        }
    }
}

/// Round lifecycle. Moves from Active to Ended exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    Active,
    Ended(Winner),
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// A snake could not advance
    Blocked { side: Side, collision: CollisionType },
    /// The user head landed on an obstacle
    Obstacle,
    /// The round clock ran out
    TimeUp,
}

impl fmt::Display for EndCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndCause::Blocked {
                side,
                collision: CollisionType::Wall,
            } => write!(f, "{side} snake hit the wall"),
            EndCause::Blocked {
                side,
                collision: CollisionType::SelfCollision,
            } => write!(f, "{side} snake bit itself"),
            EndCause::Obstacle => write!(f, "User snake hit an obstacle"),
            EndCause::TimeUp => write!(f, "Time is up"),
        }
    }
}

/// Food eaten by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub user: u32,
    pub ai: u32,
}

impl Score {
    pub fn new(user: u32, ai: u32) -> Self {
        Self { user, ai }
    }
}

/// Complete state of one round, owned and mutated by the round controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub user: Snake,
    pub ai: Snake,
    /// AI head before its last move; seeded from the AI neck at creation
    pub ai_previous_head: Cell,
    /// Direction accepted since the last tick, committed on the next one
    pub pending_direction: Option<Direction>,
    pub food: Cell,
    pub obstacles: Vec<Cell>,
    pub score: Score,
    pub round: RoundState,
    pub end_cause: Option<EndCause>,
    pub ticks: u32,
}

impl GameState {
    /// Create a new active round
    pub fn new(grid: Grid, user: Snake, ai: Snake, obstacles: Vec<Cell>, food: Cell) -> Self {
        let ai_previous_head = ai.neck().unwrap_or_else(|| ai.head());
        Self {
            grid,
            user,
            ai,
            ai_previous_head,
            pending_direction: None,
            food,
            obstacles,
            score: Score::default(),
            round: RoundState::Active,
            end_cause: None,
            ticks: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.round == RoundState::Active
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.round {
            RoundState::Active => None,
            RoundState::Ended(winner) => Some(winner),
        }
    }

    /// Request a new direction for the user snake.
    ///
    /// Rejected when it would reverse the snake onto its own neck. Several
    /// accepted requests between two ticks collapse to the latest one.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.user.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the user snake will take on the next tick
    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.user.direction)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState::new(
            Grid::new(30, 30, 20),
            Snake::new(vec![Cell::new(100, 100), Cell::new(90, 100)], Direction::Right),
            Snake::new(vec![Cell::new(200, 200), Cell::new(190, 200)], Direction::Right),
            vec![Cell::new(400, 400)],
            Cell::new(300, 300),
        )
    }

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_in_direction(Direction::Up, 20), Cell::new(5, -15));
        assert_eq!(cell.delta_from(Cell::new(4, 5)), (1, 0));
    }

    #[test]
    fn test_snake_accessors() {
        let snake = Snake::new(
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
        );
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.neck(), Some(Cell::new(4, 5)));
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(3, 5)));
        assert!(snake.occupies(Cell::new(5, 5)));
    }

    #[test]
    fn test_previous_head_seeded_from_neck() {
        let state = sample_state();
        assert_eq!(state.ai_previous_head, Cell::new(190, 200));
        assert!(state.is_active());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_steer_accepts_non_opposite_directions() {
        for direction in [Direction::Up, Direction::Down, Direction::Right] {
            let mut state = sample_state();
            assert!(state.steer(direction));
            assert_eq!(state.next_direction(), direction);
        }
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut state = sample_state();
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.next_direction(), Direction::Right);
    }

    #[test]
    fn test_steer_latest_valid_request_wins() {
        let mut state = sample_state();
        assert!(state.steer(Direction::Up));
        // Still heading Right until the next tick, so Left stays a reversal
        assert!(!state.steer(Direction::Left));
        assert!(state.steer(Direction::Down));
        assert_eq!(state.next_direction(), Direction::Down);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Winner::Ai.to_string(), "AI");
        assert_eq!(Side::User.to_string(), "User");
        assert_eq!(
            EndCause::Blocked {
                side: Side::Ai,
                collision: CollisionType::Wall
            }
            .to_string(),
            "AI snake hit the wall"
        );
    }
}
