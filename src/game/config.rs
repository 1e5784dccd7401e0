use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::grid::Grid;
use super::state::Cell;

/// Fixed constants for a round.
///
/// The binary only ever plays with `GameConfig::default()`; other values
/// exist so tests can build small or unit-scaled boards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the play area in cells
    pub grid_width: i32,
    /// Height of the play area in cells
    pub grid_height: i32,
    /// Distance units per cell; one move shifts a head by this much
    pub cell_size: i32,
    /// Number of obstacles placed at round start
    pub obstacle_count: usize,
    /// Round length in seconds
    pub round_duration_secs: u64,
    /// Scheduler period between ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Rejection-sampling budget per placed entity
    pub max_placement_attempts: usize,
    /// Initial user snake body, head first
    pub user_start: Vec<Cell>,
    /// Initial AI snake body, head first
    pub ai_start: Vec<Cell>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 30,
            cell_size: 20,
            obstacle_count: 8,
            round_duration_secs: 60,
            tick_interval_ms: 200,
            max_placement_attempts: 10_000,
            user_start: vec![Cell::new(100, 100), Cell::new(90, 100)],
            ai_start: vec![Cell::new(200, 200), Cell::new(190, 200)],
        }
    }
}

impl GameConfig {
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.cell_size)
    }

    pub fn round_duration(&self) -> Duration {
        Duration::from_secs(self.round_duration_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Number of ticks that fit in one round
    pub fn ticks_per_round(&self) -> u64 {
        (self.round_duration_secs * 1000) / self.tick_interval_ms.max(1)
    }
}
