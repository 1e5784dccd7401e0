use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven round against the AI snake in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config);
        let state = engine
            .new_round()
            .context("Failed to set up the first round")?;

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!("session over: {}", self.metrics.format_summary());
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let round_duration = self.engine.config().round_duration();
        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        self.metrics.on_round_start();

        loop {
            tokio::select! {
                // Key presses land between ticks; only the latest valid one counts
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_active() {
                        self.update_game()?;
                    }
                }

                _ = render_timer.tick() => {
                    if self.state.is_active() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, round_duration);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(Action::Move(direction)) => {
                    if self.state.is_active() && !self.state.steer(direction) {
                        debug!("ignored reversal to {direction:?}");
                    }
                }
                KeyAction::GameAction(Action::Continue) | KeyAction::None => {}
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        self.metrics.update();
        self.advance_round(self.metrics.elapsed_time)
    }

    fn advance_round(&mut self, elapsed: Duration) -> Result<()> {
        let result = self
            .engine
            .step(&mut self.state, Action::Continue, elapsed)
            .context("Failed to place food")?;

        // Only the tick that ends the round carries an end cause
        if result.info.end_cause.is_some() {
            if let Some(winner) = self.state.winner() {
                self.metrics.on_round_over(winner, self.state.score);
            }
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.state = self
            .engine
            .new_round()
            .context("Failed to set up a new round")?;
        self.metrics.on_round_start();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
