use std::convert::TryFrom;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use log::{debug, info, warn};
use rand::Rng;

use crate::{Coords, TermInt};
use crate::config::{
    Bounds, ColorMode, SnakeConfig, FOOD_CHAR, INITIAL_DELAY_MS, INITIAL_SNAKE_LENGTH, MIN_DELAY_MS,
    SNAKE_BODY_CHAR, SPEEDUP_EVERY, SPEEDUP_STEP_MS,
};
use crate::direction::Direction::{self, *};
use crate::food;
use crate::score::{self, ScoreCard};
use crate::snake::Snake;
use crate::term::Terminal;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
}

impl Command {
    pub fn from_key(ev: &KeyEvent) -> Option<Command> {
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('k') | KeyCode::Up => Some(Command::Turn(North)),
            KeyCode::Char('j') | KeyCode::Down => Some(Command::Turn(South)),
            KeyCode::Char('h') | KeyCode::Left => Some(Command::Turn(West)),
            KeyCode::Char('l') | KeyCode::Right => Some(Command::Turn(East)),
            KeyCode::Char('p') => Some(Command::Pause),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver { won: bool },
    Quit,
}

struct Round {
    snake: Snake,
    delay_ms: u64,
}

pub struct SnakeGame<T: Terminal, R: Rng> {
    term: T,
    rng: R,
    color: ColorMode,
}

impl<T: Terminal, R: Rng> SnakeGame<T, R> {
    pub fn new(term: T, rng: R, color: ColorMode) -> Self {
        SnakeGame { term, rng, color }
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Returns `false` if the player quit from the intro.
    pub fn show_intro(&mut self) -> Result<bool> {
        self.term.clear()?;
        self.term.show_message(&[
            "Arrow keys or hjkl to move",
            "p to pause",
            "q to quit",
            "",
            "Press any key to begin",
        ])?;

        let key = self.term.read_key_blocking()?;
        Ok(Command::from_key(&key) != Some(Command::Quit))
    }

    /// Plays rounds until the player quits or declines a replay.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let mut round = self.new_round()?;

            match self.play(&mut round)? {
                GameState::GameOver { won } => {
                    let card = ScoreCard::new(&round.snake, won);
                    info!("Game over: {:?}", card);

                    if !score::show(&mut self.term, &card)? {
                        return Ok(());
                    }
                },
                state => {
                    info!("Player quit at length {} heading {:?} ({:?})", round.snake.len(), round.snake.direction(), state);
                    return Ok(());
                },
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn new_round(&mut self) -> Result<Round> {
        let bounds = self.bounds()?;
        let config = SnakeConfig { color: self.color, bounds };
        let mut snake = Snake::new(config).context("Failed to allocate the snake")?;

        info!("Starting round on a {}x{} board, {:?}", bounds.max_x, bounds.max_y, self.color);

        if food::place(&mut snake, &mut self.rng).is_none() {
            warn!("No room for food on a {}x{} board", bounds.max_x, bounds.max_y);
        }

        self.term.clear()?;
        Ok(Round { snake, delay_ms: INITIAL_DELAY_MS })
    }

    fn play(&mut self, round: &mut Round) -> Result<GameState> {
        let mut state = GameState::Running;

        loop {
            state = match state {
                GameState::Running => self.tick(round)?,
                GameState::Paused => self.wait_paused(round)?,
                done => return Ok(done),
            };
        }
    }

    fn tick(&mut self, round: &mut Round) -> Result<GameState> {
        let snake = &mut round.snake;

        snake.advance();
        if snake.ate() {
            snake.grow().context("Failed to allocate a snake segment")?;
        }

        if snake.check_collision() {
            return Ok(GameState::GameOver { won: false });
        }
        self.draw_snake(snake)?;

        if snake.ate() {
            snake.clear_ate();
            if food::place(snake, &mut self.rng).is_none() {
                return Ok(GameState::GameOver { won: true });
            }
            round.delay_ms = next_delay(snake.len(), round.delay_ms);
        }
        self.draw_food(&round.snake)?;
        self.term.flush()?;

        match self.term.poll_key()?.as_ref().and_then(Command::from_key) {
            Some(Command::Turn(dir)) => round.snake.set_direction(dir),
            Some(Command::Pause) => {
                self.term.show_message(&["Paused", "p to resume", "q to quit"])?;
                return Ok(GameState::Paused);
            },
            Some(Command::Quit) => return Ok(GameState::Quit),
            None => {}
        }

        self.finish_tick(round)
    }

    fn wait_paused(&mut self, round: &mut Round) -> Result<GameState> {
        loop {
            match Command::from_key(&self.term.read_key_blocking()?) {
                Some(Command::Pause) => break,
                Some(Command::Quit) => return Ok(GameState::Quit),
                _ => {}
            }
        }

        self.finish_tick(round)
    }

    fn finish_tick(&mut self, round: &mut Round) -> Result<GameState> {
        self.term.sleep_ms(round.delay_ms);
        round.snake.propagate_turn();

        let bounds = self.bounds()?;
        round.snake.set_bounds(bounds);

        if !bounds.contains(round.snake.food()) {
            debug!("Food at {:?} is off the {}x{} board", round.snake.food(), bounds.max_x, bounds.max_y);
            if food::place(&mut round.snake, &mut self.rng).is_none() {
                return Ok(GameState::GameOver { won: true });
            }
        }

        self.term.clear()?;
        Ok(GameState::Running)
    }

    fn bounds(&self) -> Result<Bounds> {
        let (w, h) = self.term.size()?;
        Ok(Bounds::new(w as i32, h as i32))
    }

    fn draw_snake(&mut self, snake: &Snake) -> Result<()> {
        let color = snake.color();

        for (i, seg) in snake.segments().enumerate() {
            if let Some(cell) = to_cell(seg.pos()) {
                if i == 0 || color.is_multi_color() {
                    self.term.set_color(color.segment_color(i))?;
                }
                self.term.print_at(cell, SNAKE_BODY_CHAR)?;
            }
        }

        Ok(())
    }

    fn draw_food(&mut self, snake: &Snake) -> Result<()> {
        let food = snake.food();
        if !snake.bounds().contains(food) {
            return Ok(());
        }

        if let Some(cell) = to_cell(food) {
            self.term.set_color(Color::Reset)?;
            self.term.print_at(cell, FOOD_CHAR)?;
        }

        Ok(())
    }
}

/// Speeds the game up every few foods until the delay floor is reached.
fn next_delay(length: usize, delay_ms: u64) -> u64 {
    let grown = length.saturating_sub(INITIAL_SNAKE_LENGTH);

    if grown > 0 && grown % SPEEDUP_EVERY == 0 && delay_ms > MIN_DELAY_MS {
        let delay = delay_ms - SPEEDUP_STEP_MS;
        debug!("Length {} reached, tick delay now {}ms", length, delay);
        delay
    } else {
        delay_ms
    }
}

fn to_cell((x, y): Coords) -> Option<(TermInt, TermInt)> {
    Some((TermInt::try_from(x).ok()?, TermInt::try_from(y).ok()?))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
