use std::{cmp::max, collections::HashSet};

use log::{debug, info};
use rand::{seq::SliceRandom, Rng};

use crate::Cell;
use crate::config::GameConfig;
use crate::snake::{Snake, Direction::{self, *}};

const INITIAL_SNAKE_LENGTH: i16 = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBite,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Crashed(Collision),
}

/// Everything about a single round. Only `best` outlives it, through the
/// session that spawned it.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    snake: Snake,
    /// Direction of the last move
    direction: Direction,
    /// Direction the next move will take
    pending: Direction,
    food: Option<Cell>,
    score: u32,
    best: u32,
    speed_ms: u64,
}

impl GameState {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, best: u32, rng: &mut R) -> Self {
        let center = (config.height / 2, config.width / 2);
        let snake = Snake::new((center.0, center.1 + 1), INITIAL_SNAKE_LENGTH, Right);
        let food = new_food(&snake, config.height, config.width, rng);

        GameState {
            config,
            snake,
            direction: Right,
            pending: Right,
            food,
            score: 0,
            best,
            speed_ms: config.initial_speed_ms,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.pending
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Queues a turn for the next move. Turning back onto the neck is
    /// silently ignored.
    pub fn turn(&mut self, direction: Direction) {
        if direction != self.direction.opposite() {
            self.pending = direction;
        }
    }

    /// Moves the snake one cell.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StepOutcome {
        self.direction = self.pending;
        let new_head = self.direction.apply(self.snake.head());

        if self.hits_wall(new_head) {
            return self.crash(Collision::Wall);
        }

        // Checked against the body before the tail moves out of the way
        if self.snake.contains(&new_head) {
            return self.crash(Collision::SelfBite);
        }

        self.snake.push_head(new_head);

        if self.food == Some(new_head) {
            self.score += 1;
            self.speed_ms = next_speed(self.score, self.speed_ms, &self.config);
            self.food = new_food(&self.snake, self.config.height, self.config.width, rng);

            if self.food.is_none() {
                info!("No free cell left for food, snake length {}", self.snake.len());
            }
            debug!("Ate at {:?}, score {}, speed {}ms", new_head, self.score, self.speed_ms);
            StepOutcome::Ate
        } else {
            self.snake.pop_tail();
            StepOutcome::Moved
        }
    }

    fn hits_wall(&self, (row, col): Cell) -> bool {
        row <= 0 || row >= self.config.height - 1 || col <= 0 || col >= self.config.width - 1
    }

    fn crash(&mut self, collision: Collision) -> StepOutcome {
        self.best = max(self.best, self.score);
        StepOutcome::Crashed(collision)
    }
}

/// Picks a uniformly random interior cell not covered by the snake, or
/// `None` when the board is full.
pub fn new_food<R: Rng + ?Sized>(snake: &Snake, height: i16, width: i16, rng: &mut R) -> Option<Cell> {
    let occupied: HashSet<&Cell> = snake.cells().collect();
    let free: Vec<Cell> = (1..height - 1)
        .flat_map(|row| (1..width - 1).map(move |col| (row, col)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    free.choose(rng).copied()
}

/// Move interval once the score has reached `score`.
pub fn next_speed(score: u32, speed_ms: u64, config: &GameConfig) -> u64 {
    if config.speedup_every > 0 && score % config.speedup_every == 0 && speed_ms > config.min_speed_ms {
        max(config.min_speed_ms, speed_ms.saturating_sub(config.speed_increment))
    } else {
        speed_ms
    }
}
