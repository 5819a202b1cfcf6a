mod config;
mod game;
mod input;
mod snake;
mod state;
mod term;

use std::{env, fs::File};

use anyhow::Context;
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::config::GameConfig;
use crate::game::GameLoop;
use crate::term::TermManager;

/// (row, column) on the board, border included.
pub type Cell = (i16, i16);

fn main() -> anyhow::Result<()> {
    // The terminal belongs to the game, so logs go to a file
    if let Ok(file) = File::create(env::temp_dir().join("snake.log")) {
        let _ = WriteLogger::init(LevelFilter::Info, Config::default(), file);
    }

    info!("Starting snake");
    run()?;
    info!("Bye");

    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Dropped at the end of this scope, which restores the terminal before
    // any error bubbles up to main
    let term = TermManager::new().context("Error setting up the terminal")?;

    let mut game = GameLoop::new(term, GameConfig::default(), rand::thread_rng())?;
    game.run()
}
