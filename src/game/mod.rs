//! Core round simulation for the snake duel
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end and the headless runner both drive it through `GameEngine`.

pub mod action;
pub mod ai;
pub mod config;
pub mod engine;
pub mod grid;
pub mod movement;
pub mod placement;
pub mod referee;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::Grid;
pub use placement::PlacementError;
pub use state::{
    Cell, CollisionType, EndCause, GameState, RoundState, Score, Side, Snake, Winner,
};
