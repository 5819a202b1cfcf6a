//! Hard-coded game configuration
use std::time::Duration;

/// Board height, border rows included
pub const BOARD_HEIGHT: i16 = 20;

/// Board width, border columns included
pub const BOARD_WIDTH: i16 = 40;

/// Milliseconds between two moves at the start of a round
pub const INITIAL_SPEED_MS: u64 = 120;

/// The snake speeds up every time the score hits a multiple of this
pub const SPEEDUP_EVERY: u32 = 5;

/// Milliseconds shaved off the move interval on each speed-up
pub const SPEED_INCREMENT: u64 = 5;

/// The move interval never drops below this
pub const MIN_SPEED_MS: u64 = 30;

/// How long to yield the CPU when nothing is due
pub const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Same, for the title and game over screens
pub const MENU_IDLE_SLEEP: Duration = Duration::from_millis(10);

pub const SNAKE_HEAD_CHAR: char = '■';
pub const SNAKE_BODY_CHAR: char = '●';
pub const FOOD_CHAR: char = '✱';
pub const DEAD_SNAKE_CHAR: char = 'X';

pub const TITLE: &str = "S N A K E";
pub const INSTRUCTIONS: &str = "Arrows to move • q to quit • Enter to play";
pub const RESTART_PROMPT: &str = "Press Enter to play again, q to quit";

/// Board and pace of a round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GameConfig {
    pub height: i16,
    pub width: i16,
    pub initial_speed_ms: u64,
    pub speedup_every: u32,
    pub speed_increment: u64,
    pub min_speed_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: BOARD_HEIGHT,
            width: BOARD_WIDTH,
            initial_speed_ms: INITIAL_SPEED_MS,
            speedup_every: SPEEDUP_EVERY,
            speed_increment: SPEED_INCREMENT,
            min_speed_ms: MIN_SPEED_MS,
        }
    }
}

impl GameConfig {
    /// Terminal rows needed: the board plus the title and header above it
    /// and the instructions below.
    pub fn required_rows(&self) -> u16 {
        self.height as u16 + 4
    }

    pub fn required_cols(&self) -> u16 {
        self.width as u16
    }
}
