use std::{cmp::{max, min}, thread::sleep, time::{Duration, Instant}};

use anyhow::bail;
use log::{debug, info};
use rand::Rng;

use crate::config::*;
use crate::input::Command;
use crate::state::{GameState, StepOutcome};
use crate::term::{Screen, Window, print_line_centered};

/// Where the game loop currently is.
#[derive(Debug)]
enum Phase {
    Title,
    Playing,
    /// Holds the round that just ended so its final score stays on screen
    GameOver(GameState),
    Exit,
}

/// What survives from one round to the next.
#[derive(Debug, Default)]
struct Session {
    best: u32,
}

impl Session {
    fn record(&mut self, best: u32) {
        self.best = max(self.best, best);
    }
}

pub struct GameLoop<S: Screen, R: Rng> {
    screen: S,
    rng: R,
    config: GameConfig,
    window: Window,
    session: Session,
}

impl<S: Screen, R: Rng> GameLoop<S, R> {
    pub fn new(screen: S, config: GameConfig, rng: R) -> anyhow::Result<Self> {
        let (width, height) = screen.size();
        if width < config.required_cols() || height < config.required_rows() {
            bail!(
                "Terminal too small: need {}x{}, got {}x{}",
                config.required_cols(), config.required_rows(), width, height
            );
        }

        let window = Window::centered((width, height), config.height, config.width);
        Ok(GameLoop { screen, rng, config, window, session: Session::default() })
    }

    /// Runs until the player quits.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut phase = Phase::Title;

        loop {
            phase = match phase {
                Phase::Title => self.title()?,
                Phase::Playing => self.play()?,
                Phase::GameOver(state) => self.game_over(&state)?,
                Phase::Exit => break,
            };
            debug!("Entering {:?}", phase);
        }

        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn title(&mut self) -> anyhow::Result<Phase> {
        let top = self.window.top();
        let bottom = top + self.window.height() as u16;

        self.screen.clear()?;
        print_line_centered(&mut self.screen, top.saturating_sub(2), TITLE)?;
        print_line_centered(&mut self.screen, bottom + 1, INSTRUCTIONS)?;
        self.window.draw_border(&mut self.screen)?;
        self.screen.flush()?;

        self.wait_for_choice()
    }

    fn play(&mut self) -> anyhow::Result<Phase> {
        let mut state = GameState::new(self.config, self.session.best, &mut self.rng);
        info!("New round, record {}", self.session.best);

        self.render(&state)?;
        let mut last_move = Instant::now();

        loop {
            match self.poll_command()? {
                Some(Command::Quit) => return Ok(Phase::Exit),
                Some(Command::Move(dir)) => state.turn(dir),
                Some(Command::Confirm) | None => {}
            }

            let interval = Duration::from_millis(state.speed_ms());
            let elapsed = last_move.elapsed();
            if elapsed < interval {
                sleep(min(interval - elapsed, IDLE_SLEEP));
                continue;
            }
            last_move = Instant::now();

            match state.step(&mut self.rng) {
                StepOutcome::Crashed(collision) => {
                    self.session.record(state.best());
                    info!(
                        "Game over ({:?}), score {}, record {}",
                        collision, state.score(), self.session.best
                    );
                    return Ok(Phase::GameOver(state));
                },
                StepOutcome::Moved | StepOutcome::Ate => self.render(&state)?,
            }
        }
    }

    fn game_over(&mut self, state: &GameState) -> anyhow::Result<Phase> {
        for pos in state.snake().cells() {
            self.window.print_cell(&mut self.screen, *pos, DEAD_SNAKE_CHAR)?;
        }

        let msg = format!("Game Over  •  Score: {}  •  Record: {}", state.score(), self.session.best);
        let middle = self.window.top() + self.window.height() as u16 / 2;
        print_line_centered(&mut self.screen, middle, &msg)?;
        print_line_centered(&mut self.screen, middle + 2, RESTART_PROMPT)?;
        self.screen.flush()?;

        self.wait_for_choice()
    }

    /// Blocks on the menu keys: confirm starts a round, quit leaves.
    fn wait_for_choice(&mut self) -> anyhow::Result<Phase> {
        loop {
            match self.poll_command()? {
                Some(Command::Confirm) => return Ok(Phase::Playing),
                Some(Command::Quit) => return Ok(Phase::Exit),
                _ => sleep(MENU_IDLE_SLEEP),
            }
        }
    }

    fn poll_command(&mut self) -> anyhow::Result<Option<Command>> {
        let key = self.screen.poll_key()?;
        Ok(key.as_ref().and_then(Command::from_key_event))
    }

    fn render(&mut self, state: &GameState) -> anyhow::Result<()> {
        let header = format!("Score: {}   Record: {}", state.score(), state.best());
        print_line_centered(&mut self.screen, self.window.top().saturating_sub(1), &header)?;

        self.window.clear(&mut self.screen)?;
        self.window.draw_border(&mut self.screen)?;

        if let Some(food) = state.food() {
            self.window.print_cell(&mut self.screen, food, FOOD_CHAR)?;
        }

        let snake_len = state.snake().len();
        for (i, pos) in state.snake().cells().enumerate() {
            let ch = if i == snake_len - 1 {SNAKE_HEAD_CHAR} else {SNAKE_BODY_CHAR};
            self.window.print_cell(&mut self.screen, *pos, ch)?;
        }

        self.screen.flush()?;
        Ok(())
    }
}
