//! Random placement of food and obstacles by rejection sampling.

use log::error;
use rand::Rng;
use thiserror::Error;

use super::grid::Grid;
use super::state::{Cell, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Every sampled cell was taken; the board is too crowded
    #[error("no free cell found after {attempts} attempts")]
    OutOfSpace { attempts: usize },
}

/// Draw cells until one passes `is_free`, giving up after `max_attempts`
fn sample_free_cell<R, F>(
    rng: &mut R,
    grid: &Grid,
    max_attempts: usize,
    is_free: F,
) -> Result<Cell, PlacementError>
where
    R: Rng + ?Sized,
    F: Fn(Cell) -> bool,
{
    for _ in 0..max_attempts {
        let cell = grid.random_cell(rng);
        if is_free(cell) {
            return Ok(cell);
        }
    }

    error!(
        "placement gave up after {max_attempts} attempts on a {}x{} grid",
        grid.width(),
        grid.height()
    );
    Err(PlacementError::OutOfSpace {
        attempts: max_attempts,
    })
}

/// Pick a cell for the food that is clear of obstacles and both snakes
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    obstacles: &[Cell],
    user: &Snake,
    ai: &Snake,
    max_attempts: usize,
) -> Result<Cell, PlacementError> {
    sample_free_cell(rng, grid, max_attempts, |cell| {
        !obstacles.contains(&cell) && !user.occupies(cell) && !ai.occupies(cell)
    })
}

/// Pick `count` distinct obstacle cells clear of both starting snakes
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    count: usize,
    user: &Snake,
    ai: &Snake,
    max_attempts: usize,
) -> Result<Vec<Cell>, PlacementError> {
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let cell = sample_free_cell(rng, grid, max_attempts, |cell| {
            !obstacles.contains(&cell) && !user.occupies(cell) && !ai.occupies(cell)
        })?;
        obstacles.push(cell);
    }

    Ok(obstacles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn snakes() -> (Snake, Snake) {
        (
            Snake::new(vec![Cell::new(100, 100), Cell::new(80, 100)], Direction::Right),
            Snake::new(vec![Cell::new(200, 200), Cell::new(180, 200)], Direction::Right),
        )
    }

    #[test]
    fn test_obstacles_are_distinct_and_clear_of_snakes() {
        let grid = Grid::new(30, 30, 20);
        let (user, ai) = snakes();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let obstacles = place_obstacles(&mut rng, &grid, 8, &user, &ai, 1000).unwrap();

            assert_eq!(obstacles.len(), 8);
            let unique: HashSet<_> = obstacles.iter().collect();
            assert_eq!(unique.len(), 8);
            for cell in &obstacles {
                assert!(grid.contains(*cell));
                assert!(!user.occupies(*cell));
                assert!(!ai.occupies(*cell));
            }
        }
    }

    #[test]
    fn test_food_never_lands_on_obstacle_or_snake() {
        let grid = Grid::new(30, 30, 20);
        let (user, ai) = snakes();
        let mut rng = StdRng::seed_from_u64(42);
        let obstacles = place_obstacles(&mut rng, &grid, 8, &user, &ai, 1000).unwrap();

        for _ in 0..2000 {
            let food = place_food(&mut rng, &grid, &obstacles, &user, &ai, 1000).unwrap();
            assert!(grid.contains(food));
            assert!(!obstacles.contains(&food));
            assert!(!user.occupies(food));
            assert!(!ai.occupies(food));
        }
    }

    #[test]
    fn test_food_on_crowded_board_finds_last_free_cell() {
        // 2x2 board: snakes take three cells, one is left
        let grid = Grid::new(2, 2, 1);
        let user = Snake::new(vec![Cell::new(0, 0), Cell::new(1, 0)], Direction::Left);
        let ai = Snake::new(vec![Cell::new(0, 1), Cell::new(0, 0)], Direction::Down);
        let mut rng = StdRng::seed_from_u64(1);

        let food = place_food(&mut rng, &grid, &[], &user, &ai, 10_000).unwrap();
        assert_eq!(food, Cell::new(1, 1));
    }

    #[test]
    fn test_saturated_board_is_out_of_space() {
        let grid = Grid::new(2, 1, 1);
        let user = Snake::new(vec![Cell::new(0, 0), Cell::new(1, 0)], Direction::Left);
        let ai = user.clone();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(
            place_food(&mut rng, &grid, &[], &user, &ai, 50),
            Err(PlacementError::OutOfSpace { attempts: 50 })
        );
        assert!(place_obstacles(&mut rng, &grid, 1, &user, &ai, 50).is_err());
    }
}
