use log::{debug, info, trace};
use rand::{Rng, rngs::ThreadRng};

use super::{
    action::{Direction, Turn},
    config::GameConfig,
    error::GameError,
    events::{CellMark, GameEvent},
    food,
    grid::{Coordinate, Grid},
    state::{CollisionKind, GameSession, GameStatus, Snake},
};
use crate::score::Scoreboard;

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake advanced one cell
    Moved,
    /// The snake advanced onto food and grew
    Ate,
    /// The game ended this step
    Collided(CollisionKind),
    /// Nothing happened because the game is idle or over
    NotRunning,
}

/// The game engine that handles all game logic.
///
/// One engine owns one game at a time. Every mutation goes through `&mut self`,
/// so input handling and ticking can never interleave. Changes are reported as
/// [`GameEvent`]s which the host collects with [`GameEngine::drain_events`].
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    rng: R,
    scoreboard: Scoreboard,
    session: GameSession,
    events: Vec<GameEvent>,
}

impl GameEngine<ThreadRng> {
    /// Create an engine with thread-local randomness and an idle game
    pub fn new(config: GameConfig, scoreboard: Scoreboard) -> Result<Self, GameError> {
        Self::with_rng(config, scoreboard, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine that draws from `rng`, with an idle game
    pub fn with_rng(
        config: GameConfig,
        scoreboard: Scoreboard,
        mut rng: R,
    ) -> Result<Self, GameError> {
        let grid = config.grid()?;
        let session = Self::new_session(&grid, &mut rng)?;
        Self::from_session(config, scoreboard, rng, session)
    }

    /// Continue from an existing session, e.g. a prepared position
    pub fn from_session(
        config: GameConfig,
        scoreboard: Scoreboard,
        rng: R,
        session: GameSession,
    ) -> Result<Self, GameError> {
        let grid = config.grid()?;
        if session.snake.grid() != grid {
            return Err(GameError::InvariantViolation(
                "session grid does not match the configuration",
            ));
        }
        if let Some(food) = session.food {
            if !grid.in_bounds(food) || session.snake.is_occupied(food) {
                return Err(GameError::InvariantViolation(
                    "session food is off the grid or on the snake",
                ));
            }
        }
        let top_score = scoreboard.top_score();
        let mut engine = Self {
            config,
            grid,
            rng,
            scoreboard,
            session,
            events: vec![GameEvent::TopScore(top_score)],
        };
        engine.announce_session();
        Ok(engine)
    }

    /// Begin a fresh idle game: one random segment, score 0, new food
    pub fn start(&mut self) -> Result<(), GameError> {
        self.session = Self::new_session(&self.grid, &mut self.rng)?;
        self.announce_session();
        Ok(())
    }

    /// Stop the current game, wipe its marks and start a new one.
    ///
    /// An unfinished game is abandoned without recording its score.
    pub fn restart(&mut self) -> Result<(), GameError> {
        // Tick source must stop before anything is rebuilt
        self.events.push(GameEvent::Reset);
        for segment in self.session.snake.segments() {
            self.events.push(GameEvent::cell(segment, CellMark::Empty));
        }
        if let Some(food) = self.session.food {
            self.events.push(GameEvent::cell(food, CellMark::Empty));
        }
        self.start()
    }

    /// Feed a direction from the input device
    pub fn request_direction(&mut self, direction: Direction) -> Turn {
        if self.session.status == GameStatus::Ended {
            return Turn::Rejected;
        }

        let turn = self.session.controller.request(direction);
        if turn == Turn::First && self.session.status == GameStatus::Idle {
            self.session.status = GameStatus::Running;
            self.events.push(GameEvent::Started);
            info!("Game started heading {:?}", direction);
        }
        turn
    }

    /// Execute one tick of the game
    pub fn step(&mut self) -> Result<StepOutcome, GameError> {
        if self.session.status != GameStatus::Running {
            return Ok(StepOutcome::NotRunning);
        }
        let Some(direction) = self.session.controller.current() else {
            return Ok(StepOutcome::NotRunning);
        };

        let next_head = self.session.snake.head().step(direction);
        trace!("step {:?} -> {:?}", direction, next_head);

        if let Some(kind) = self.check_collision(next_head) {
            self.end_game(kind);
            return Ok(StepOutcome::Collided(kind));
        }

        if self.session.food == Some(next_head) {
            self.session.score = self.session.score.saturating_add(self.config.food_reward);
            self.session.food = None;
            self.session.pending_growth = true;
            self.events.push(GameEvent::Score(self.session.score));
        }

        let grew = self.session.pending_growth;
        self.session.snake.add_head(next_head)?;
        self.events.push(GameEvent::cell(next_head, CellMark::Snake));
        if !grew {
            let tail = self.session.snake.remove_tail()?;
            self.events.push(GameEvent::cell(tail, CellMark::Empty));
        }
        self.session.pending_growth = false;

        if !grew {
            return Ok(StepOutcome::Moved);
        }

        // Food goes down once the head covers the eaten cell
        self.session.food = Self::spawn_food(&self.grid, &self.session.snake, &mut self.rng);
        if let Some(food) = self.session.food {
            self.events.push(GameEvent::cell(food, CellMark::Food));
        }
        Ok(StepOutcome::Ate)
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn top_score(&self) -> u32 {
        self.scoreboard.top_score()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Check if the new head position causes a collision.
    ///
    /// The body is tested as it stands before the move, tail included.
    fn check_collision(&self, next_head: Coordinate) -> Option<CollisionKind> {
        if !self.grid.in_bounds(next_head) {
            return Some(CollisionKind::Wall);
        }
        if self.session.snake.is_occupied(next_head) {
            return Some(CollisionKind::SelfCollision);
        }
        None
    }

    fn end_game(&mut self, kind: CollisionKind) {
        let final_score = self.session.score;
        let board_full = self.session.snake.fills_grid();
        self.session.status = GameStatus::Ended;

        if self.scoreboard.record_score(final_score) {
            self.events.push(GameEvent::TopScore(final_score));
        }
        self.events.push(GameEvent::Ended {
            final_score,
            board_full,
        });
        info!(
            "Game over ({:?}) with score {}, length {}",
            kind,
            final_score,
            self.session.snake.len()
        );
    }

    fn new_session(grid: &Grid, rng: &mut R) -> Result<GameSession, GameError> {
        let start = Coordinate::new(
            rng.gen_range(0..grid.rows()) as i32,
            rng.gen_range(0..grid.cols()) as i32,
        );
        let snake = Snake::new(*grid, start)?;
        let food = Self::spawn_food(grid, &snake, rng);
        debug!("New game: snake at {:?}, food at {:?}", start, food);
        Ok(GameSession::new(snake, food))
    }

    fn spawn_food(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Coordinate> {
        match food::place(grid, snake, rng) {
            Ok(food) => Some(food),
            Err(e) => {
                info!("No food placed: {}", e);
                None
            }
        }
    }

    /// Queue marks for the whole current session
    fn announce_session(&mut self) {
        for segment in self.session.snake.segments() {
            self.events.push(GameEvent::cell(segment, CellMark::Snake));
        }
        if let Some(food) = self.session.food {
            self.events.push(GameEvent::cell(food, CellMark::Food));
        }
        self.events.push(GameEvent::Score(self.session.score));
    }
}
