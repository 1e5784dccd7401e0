//! Movement engine shared by both snakes.
//!
//! Only walls and the snake's own body can block a move. Food and
//! obstacles are resolved by the round controller afterwards.

use super::action::Direction;
use super::grid::Grid;
use super::state::{Cell, CollisionType, Snake};

/// Outcome of advancing a snake by one cell
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The snake after the move
    Moved(Snake),
    /// The move was refused; the snake stays where it was
    Blocked {
        attempted: Cell,
        collision: CollisionType,
    },
}

/// Head position one step away in `direction`
pub fn next_head(snake: &Snake, direction: Direction, grid: &Grid) -> Cell {
    snake.head().moved_in_direction(direction, grid.unit())
}

/// Advance the snake one cell in `direction`.
///
/// The tail is dropped unless `grow` is set.
pub fn advance(snake: &Snake, direction: Direction, grid: &Grid, grow: bool) -> Advance {
    let new_head = next_head(snake, direction, grid);
    match advance_to(snake, new_head, grid, grow) {
        Advance::Moved(mut moved) => {
            moved.direction = direction;
            Advance::Moved(moved)
        }
        blocked => blocked,
    }
}

/// Advance the snake so that its head lands on `new_head`.
pub fn advance_to(snake: &Snake, new_head: Cell, grid: &Grid, grow: bool) -> Advance {
    if let Some(collision) = check_collision(snake, new_head, grid) {
        return Advance::Blocked {
            attempted: new_head,
            collision,
        };
    }

    let mut body = Vec::with_capacity(snake.len() + 1);
    body.push(new_head);
    body.extend_from_slice(&snake.body);
    if !grow {
        body.pop();
    }

    let (dx, dy) = new_head.delta_from(snake.head());
    let direction = Direction::from_delta(dx, dy).unwrap_or(snake.direction);

    Advance::Moved(Snake { body, direction })
}

/// Check if the new head position causes a collision
fn check_collision(snake: &Snake, new_head: Cell, grid: &Grid) -> Option<CollisionType> {
    if !grid.contains(new_head) {
        return Some(CollisionType::Wall);
    }

    // The tail still counts: it has not moved out of the way yet.
    if snake.collides_with_body(new_head) {
        return Some(CollisionType::SelfCollision);
    }

    None
}
