//! Greedy food pursuit for the AI snake.
//!
//! The AI closes the horizontal gap first, then the vertical one. When its
//! head is already on the food cell it repeats its last movement delta.

use super::action::Direction;
use super::state::Cell;

/// Next head position for the AI snake.
///
/// `previous_head` is where the head was before the last move, so
/// `head - previous_head` is the last movement delta.
pub fn next_head(head: Cell, food: Cell, previous_head: Cell, unit: i32) -> Cell {
    match pursuit_direction(head, food) {
        Some(direction) => head.moved_in_direction(direction, unit),
        None => {
            let (dx, dy) = head.delta_from(previous_head);
            head.moved_by(dx, dy)
        }
    }
}

/// Direction that closes the distance to the food, x axis first.
/// None when the head already sits on the food.
pub fn pursuit_direction(head: Cell, food: Cell) -> Option<Direction> {
    if head.x < food.x {
        Some(Direction::Right)
    } else if head.x > food.x {
        Some(Direction::Left)
    } else if head.y < food.y {
        Some(Direction::Down)
    } else if head.y > food.y {
        Some(Direction::Up)
    } else {
        None
    }
}
