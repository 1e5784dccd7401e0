//! Headless mode: plays whole rounds without a terminal UI.
//!
//! The user snake is steered by an autopilot that uses the same greedy
//! pursuit as the AI, filtered through the no-reversal guard. Round time
//! advances by one tick interval per step, so a round always fits in
//! `ticks_per_round` steps.

use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

use crate::game::{ai, Action, GameConfig, GameEngine, GameState};
use crate::metrics::{GameMetrics, SessionSummary};

/// Configuration for headless mode
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Number of rounds to play
    pub rounds: u32,
    /// Print the session summary as JSON instead of text
    pub json: bool,
    /// Fixed RNG seed for reproducible boards
    pub seed: Option<u64>,
    pub game_config: GameConfig,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            json: false,
            seed: None,
            game_config: GameConfig::default(),
        }
    }
}

pub struct HeadlessMode {
    engine: GameEngine,
    metrics: GameMetrics,
    config: HeadlessConfig,
}

impl HeadlessMode {
    pub fn new(config: HeadlessConfig) -> Self {
        let engine = match config.seed {
            Some(seed) => GameEngine::with_seed(config.game_config.clone(), seed),
            None => GameEngine::new(config.game_config.clone()),
        };

        Self {
            engine,
            metrics: GameMetrics::new(),
            config,
        }
    }

    /// Play every round and report the tallies
    pub fn run(&mut self) -> Result<SessionSummary> {
        for round in 1..=self.config.rounds {
            let state = self.play_round()?;
            if !self.config.json {
                println!(
                    "Round {round}: {} (user {} - AI {}) after {} ticks, {}",
                    state.winner().map(|w| w.to_string()).unwrap_or_default(),
                    state.score.user,
                    state.score.ai,
                    state.ticks,
                    state
                        .end_cause
                        .map(|cause| cause.to_string())
                        .unwrap_or_default()
                );
            }
        }

        let summary = self.metrics.summary();
        if self.config.json {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{json}");
        } else {
            println!("{}", self.metrics.format_summary());
        }

        info!("headless session finished: {}", self.metrics.format_summary());
        Ok(summary)
    }

    /// Play one round to its end
    pub fn play_round(&mut self) -> Result<GameState> {
        let mut state = self
            .engine
            .new_round()
            .context("Failed to set up a round")?;
        let tick = self.engine.config().tick_interval();
        let mut elapsed = Duration::ZERO;

        loop {
            let action = autopilot(&state);
            let result = self
                .engine
                .step(&mut state, action, elapsed)
                .context("Failed to place food")?;
            if result.terminated {
                break;
            }
            elapsed += tick;
        }

        if let Some(winner) = state.winner() {
            self.metrics.on_round_over(winner, state.score);
        }
        Ok(state)
    }
}

/// Steer the user snake toward the food, never into a reversal
pub fn autopilot(state: &GameState) -> Action {
    match ai::pursuit_direction(state.user.head(), state.food) {
        Some(direction) if !state.user.direction.is_opposite(direction) => {
            Action::Move(direction)
        }
        _ => Action::Continue,
    }
}
