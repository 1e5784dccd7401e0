use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use super::{
    action::{Action, Direction},
    ai,
    config::GameConfig,
    movement::{self, Advance},
    placement::{self, PlacementError},
    referee,
    state::{Cell, EndCause, GameState, RoundState, Side, Snake, Winner},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the user snake ate food this step
    pub user_ate: bool,
    /// Whether the AI snake ate food this step
    pub ai_ate: bool,
    /// Why the round ended, if it ended on this step
    pub end_cause: Option<EndCause>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round is over (on this step or earlier)
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(info: StepInfo) -> Self {
        Self {
            terminated: false,
            info,
        }
    }

    fn ended(info: StepInfo) -> Self {
        Self {
            terminated: true,
            info,
        }
    }
}

/// The round controller: builds rounds and advances them one tick at a time
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with a caller-supplied RNG, for reproducible rounds
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Set up a fresh round: snakes, then obstacles, then food
    pub fn new_round(&mut self) -> Result<GameState, PlacementError> {
        let grid = self.config.grid();
        let user = Snake::new(self.config.user_start.clone(), Direction::Right);
        let ai = Snake::new(self.config.ai_start.clone(), Direction::Right);

        let obstacles = placement::place_obstacles(
            &mut self.rng,
            &grid,
            self.config.obstacle_count,
            &user,
            &ai,
            self.config.max_placement_attempts,
        )?;
        let food = placement::place_food(
            &mut self.rng,
            &grid,
            &obstacles,
            &user,
            &ai,
            self.config.max_placement_attempts,
        )?;

        info!("round started: food at {food:?}, {} obstacles", obstacles.len());
        Ok(GameState::new(grid, user, ai, obstacles, food))
    }

    /// Execute one tick of the round.
    ///
    /// `elapsed` is the round time measured by the caller's clock. Once the
    /// round has ended every further call is a no-op.
    pub fn step(
        &mut self,
        state: &mut GameState,
        action: Action,
        elapsed: Duration,
    ) -> Result<StepResult, PlacementError> {
        if !state.is_active() {
            return Ok(StepResult::ended(StepInfo::default()));
        }

        if elapsed >= self.config.round_duration() {
            return Ok(self.finish(state, EndCause::TimeUp, None));
        }

        if let Action::Move(direction) = action {
            state.steer(direction);
        }
        let direction = state.next_direction();
        state.pending_direction = None;
        state.ticks += 1;

        let grid = state.grid;

        // 1. User snake
        let user_tail = state.user.tail();
        match movement::advance(&state.user, direction, &grid, false) {
            Advance::Moved(snake) => state.user = snake,
            Advance::Blocked {
                attempted,
                collision,
            } => {
                let cause = EndCause::Blocked {
                    side: Side::User,
                    collision,
                };
                return Ok(self.finish(state, cause, Some((Side::User, attempted))));
            }
        }

        // 2. AI snake, chasing the food as it stood at the start of the tick
        let ai_tail = state.ai.tail();
        let target = ai::next_head(
            state.ai.head(),
            state.food,
            state.ai_previous_head,
            grid.unit(),
        );
        match movement::advance_to(&state.ai, target, &grid, false) {
            Advance::Moved(snake) => {
                state.ai_previous_head = state.ai.head();
                state.ai = snake;
            }
            Advance::Blocked {
                attempted,
                collision,
            } => {
                let cause = EndCause::Blocked {
                    side: Side::Ai,
                    collision,
                };
                return Ok(self.finish(state, cause, Some((Side::Ai, attempted))));
            }
        }

        // 3. Food, settled once both snakes have moved. The user is served
        //    first; the AI is then checked against the replacement food.
        let mut info = StepInfo::default();
        if state.user.head() == state.food {
            state.user.regrow(user_tail);
            state.score.user += 1;
            info.user_ate = true;
            self.replace_food(state)?;
        }
        if state.ai.head() == state.food {
            state.ai.regrow(ai_tail);
            state.score.ai += 1;
            info.ai_ate = true;
            self.replace_food(state)?;
        }

        // 4. Obstacles only stop the user snake; the AI passes through them.
        if state.is_obstacle(state.user.head()) {
            let mut result = self.finish(state, EndCause::Obstacle, None);
            result.info.user_ate = info.user_ate;
            result.info.ai_ate = info.ai_ate;
            return Ok(result);
        }

        Ok(StepResult::running(info))
    }

    fn replace_food(&mut self, state: &mut GameState) -> Result<(), PlacementError> {
        let food = placement::place_food(
            &mut self.rng,
            &state.grid,
            &state.obstacles,
            &state.user,
            &state.ai,
            self.config.max_placement_attempts,
        )?;
        debug!(
            "food eaten at {:?}, replaced at {food:?} (score {}-{})",
            state.food, state.score.user, state.score.ai
        );
        state.food = food;
        Ok(())
    }

    /// Active -> Ended transition. `refused` is the cell a blocked snake
    /// tried to enter; the boundary rule judges it, the obstacle rule does not.
    fn finish(
        &self,
        state: &mut GameState,
        cause: EndCause,
        refused: Option<(Side, Cell)>,
    ) -> StepResult {
        let winner: Winner = referee::resolve_winner(
            state.score,
            state.user.head(),
            state.ai.head(),
            refused,
            &state.obstacles,
            &state.grid,
        );
        state.round = RoundState::Ended(winner);
        state.end_cause = Some(cause);

        info!(
            "round over after {} ticks: {cause}; winner {winner} (user {} - ai {})",
            state.ticks, state.score.user, state.score.ai
        );

        StepResult::ended(StepInfo {
            end_cause: Some(cause),
            ..Default::default()
        })
    }
}
