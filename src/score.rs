use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::{FAREWELL_PAUSE_MS, INITIAL_SNAKE_LENGTH};
use crate::snake::Snake;
use crate::term::Terminal;

/// End-of-round statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: usize,
    pub total_dist: u32,
    pub min_dist: u32,
    pub bonus: u32,
    pub won: bool,
}

impl ScoreCard {
    pub fn new(snake: &Snake, won: bool) -> Self {
        let stats = snake.stats();
        ScoreCard {
            score: snake.len().saturating_sub(INITIAL_SNAKE_LENGTH),
            total_dist: stats.total_dist,
            min_dist: stats.min_dist,
            bonus: stats.bonus,
            won,
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![];
        if self.won {
            lines.push("YOU WON!".to_string());
            lines.push(String::new());
        }

        lines.push(format!("BONUS: {}", self.bonus));
        lines.push(format!("MIN-DISTANCE: {}", self.min_dist));
        lines.push(format!("DISTANCE: {}", self.total_dist));
        lines.push(String::new());
        lines.push(format!("SCORE: {}", self.score));
        lines.push(String::new());
        lines.push("PLAY AGAIN? (Y/N)".to_string());
        lines
    }
}

/// Shows the card and waits for an answer. Returns `true` to play again.
pub fn show<T: Terminal>(term: &mut T, card: &ScoreCard) -> Result<bool> {
    term.clear()?;
    let lines = card.lines();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    term.show_message(&refs)?;

    loop {
        match term.read_key_blocking()? {
            KeyEvent { code: KeyCode::Char('y'), .. } | KeyEvent { code: KeyCode::Char('Y'), .. } => {
                term.clear()?;
                return Ok(true);
            },
            KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
            | KeyEvent { code: KeyCode::Char('n'), .. }
            | KeyEvent { code: KeyCode::Char('N'), .. } => break,
            _ => {}
        }
    }

    term.show_message(&["GOOD GAME!"])?;
    term.sleep_ms(FAREWELL_PAUSE_MS);
    Ok(false)
}
