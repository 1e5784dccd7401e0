//! Winner resolution, run once when a round ends.

use super::grid::Grid;
use super::state::{Cell, Score, Side, Winner};

/// Decide the winner of a finished round.
///
/// A score difference settles it outright. On a tie, a head outside the
/// board loses. Failing that, a head sharing a row or column with any
/// obstacle loses; obstacles are examined in placement order and the user
/// head is checked first for each one. Anything else is a draw.
///
/// `refused` is the cell a blocked snake tried to enter. It only feeds the
/// boundary rule; the obstacle rule looks at where the heads really are.
///
/// The obstacle rule matches on either coordinate, not on the whole cell,
/// so plain alignment with an obstacle counts as a hit.
pub fn resolve_winner(
    score: Score,
    user_head: Cell,
    ai_head: Cell,
    refused: Option<(Side, Cell)>,
    obstacles: &[Cell],
    grid: &Grid,
) -> Winner {
    if score.user > score.ai {
        return Winner::User;
    }
    if score.ai > score.user {
        return Winner::Ai;
    }

    let off_board = |side: Side, head: Cell| {
        let refused_off = matches!(refused, Some((s, cell)) if s == side && !grid.contains(cell));
        refused_off || !grid.contains(head)
    };
    if off_board(Side::User, user_head) {
        return Winner::Ai;
    }
    if off_board(Side::Ai, ai_head) {
        return Winner::User;
    }

    for obstacle in obstacles {
        if shares_axis(user_head, *obstacle) {
            return Winner::Ai;
        }
        if shares_axis(ai_head, *obstacle) {
            return Winner::User;
        }
    }

    Winner::Draw
}

fn shares_axis(head: Cell, obstacle: Cell) -> bool {
    head.x == obstacle.x || head.y == obstacle.y
}
