use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{GameConfig, GameEngine, GameEvent, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Board, Renderer};
use crate::score::Scoreboard;

/// Periodic tick that only exists while the game is running.
///
/// It follows the engine's lifecycle events: created on `Started`, dropped on
/// `Ended` and `Reset`. A dropped interval can never fire into the next game.
pub struct TickSource {
    period: Duration,
    timer: Option<Interval>,
}

impl TickSource {
    pub fn new(period: Duration) -> Self {
        Self {
            // tokio intervals panic on a zero period
            period: period.max(Duration::from_millis(1)),
            timer: None,
        }
    }

    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                // First step lands one period after the first key press
                let mut timer = interval_at(Instant::now() + self.period, self.period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
                self.timer = Some(timer);
            }
            GameEvent::Ended { .. } | GameEvent::Reset => self.timer = None,
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Resolves on the next tick; pends forever while stopped
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending().await,
        }
    }
}

pub struct HumanMode {
    engine: GameEngine<ChaCha8Rng>,
    board: Board,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, scoreboard: Scoreboard, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut engine =
            GameEngine::with_rng(config, scoreboard, rng).context("Failed to create game")?;
        let mut board = Board::new(*engine.grid());
        board.apply_all(engine.drain_events());

        Ok(Self {
            engine,
            board,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = or_restore(setup_terminal())?;

        let grid = self.board.grid();
        info!("Terminal ready, {}x{} grid", grid.rows(), grid.cols());

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        let cleanup = self.cleanup_terminal(&mut terminal);

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut ticks = TickSource::new(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = ticks.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.board);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            self.sync(&mut ticks);

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
                KeyAction::Turn(direction) => {
                    let turn = self.engine.request_direction(direction);
                    if !turn.is_accepted() {
                        debug!("Ignored {:?} in {:?}", direction, self.engine.status());
                    }
                }
                KeyAction::Restart => {
                    self.engine.restart().context("Failed to restart game")?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let outcome = self.engine.step().context("Game step failed")?;
        debug!("Tick: {:?}", outcome);
        Ok(())
    }

    /// Hand queued engine events to the tick source and the board
    fn sync(&mut self, ticks: &mut TickSource) {
        for event in self.engine.drain_events() {
            ticks.observe(&event);
            self.board.apply(event);
        }
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
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

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Undo raw mode and the alternate screen if `result` failed
fn or_restore<T>(result: Result<T>) -> Result<T> {
    if result.is_err() {
        if let Err(e) = execute!(stderr(), LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
    }
    result
}
