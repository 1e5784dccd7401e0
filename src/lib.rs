//! Snake duel - a user-steered snake against a food-chasing AI snake
//!
//! This library provides:
//! - Core round simulation (game module)
//! - Terminal rendering and key mapping (render, input modules)
//! - Session tallies (metrics module)
//! - Interactive and headless runners (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
