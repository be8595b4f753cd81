mod chain;
mod cli;
mod config;
mod direction;
mod food;
mod game;
mod score;
mod snake;
mod term;

use std::{env, fs::File, process::exit};

use anyhow::{Context, Result};
use log::{error, info};
use rand::Rng;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::CliError;
use crate::config::{ColorMode, LogConfig};
use crate::game::SnakeGame;
use crate::term::{TermManager, Terminal};

pub type TermInt = u16;
pub type Coords = (i32, i32);

fn main() {
    let color = match cli::parse(env::args().skip(1)) {
        Ok(color) => color,
        Err(CliError::Help) => {
            print!("{}", cli::USAGE);
            exit(1);
        },
        Err(err) => {
            eprintln!("snake: {}", err);
            eprint!("{}", cli::USAGE);
            exit(1);
        },
    };

    // Reported before the terminal is taken over, while stderr is still visible
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("snake: logging disabled: {:#}", err);
    }
    info!("Starting with {:?}", color);

    let mut term = TermManager::new();
    if let Err(err) = run(&mut term, rand::thread_rng(), color) {
        error!("Fatal: {:#}", err);
        eprintln!("snake: {:#}", err);
        exit(1);
    }

    info!("Bye");
}

/// Plays on `term` and hands it back restored, whatever happened in between.
fn run<T: Terminal, R: Rng>(term: &mut T, rng: R, color: ColorMode) -> Result<()> {
    if let Err(err) = term.setup() {
        if let Err(restore_err) = term.restore() {
            error!("Failed to restore the terminal: {:#}", restore_err);
        }
        return Err(err);
    }

    let mut game = SnakeGame::new(&mut *term, rng, color);
    let result = match game.show_intro() {
        Ok(true) => game.run(),
        Ok(false) => Ok(()),
        Err(err) => Err(err),
    };

    let restored = term.restore().context("Failed to restore the terminal");
    match (result, restored) {
        (Err(err), Err(restore_err)) => {
            error!("{:#}", restore_err);
            Err(err)
        },
        (result, restored) => result.and(restored),
    }
}

fn init_logging(config: &LogConfig) -> Result<()> {
    if config.level == LevelFilter::Off {
        return Ok(());
    }

    let file = File::create(&config.path)
        .with_context(|| format!("Failed to create log file {}", config.path.display()))?;
    WriteLogger::init(config.level, Config::default(), file).context("Failed to install the logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::testing::ScriptedTerminal;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn failed_setup_still_restores() {
        let mut term = ScriptedTerminal::new((20, 10));
        term.fail_setup = true;

        assert!(run(&mut term, rng(), ColorMode::default()).is_err());
        assert_eq!(term.restores, 1);
        assert!(term.messages.is_empty());
    }

    #[test]
    fn failed_restore_fails_a_clean_exit() {
        let mut term = ScriptedTerminal::new((20, 10)).block(&['q']);
        term.fail_restore = true;

        let err = run(&mut term, rng(), ColorMode::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("restore"));
        assert_eq!(term.restores, 1);
    }

    #[test]
    fn game_error_wins_over_restore_error() {
        // intro waits for a key that never comes
        let mut term = ScriptedTerminal::new((20, 10));
        term.fail_restore = true;

        let err = run(&mut term, rng(), ColorMode::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("scripted keys"));
        assert_eq!(term.restores, 1);
    }

    #[test]
    fn quitting_from_the_intro_is_a_clean_exit() {
        let mut term = ScriptedTerminal::new((20, 10)).block(&['q']);

        assert!(run(&mut term, rng(), ColorMode::default()).is_ok());
        assert_eq!(term.restores, 1);
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let config = LogConfig {
            level: LevelFilter::Info,
            path: env::temp_dir().join("snake-no-such-dir").join("nested").join("snake.log"),
        };

        let err = init_logging(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("log file"));
    }

    #[test]
    fn logging_off_needs_no_file() {
        let config = LogConfig {
            level: LevelFilter::Off,
            path: env::temp_dir().join("snake-no-such-dir").join("snake.log"),
        };

        assert!(init_logging(&config).is_ok());
    }
}
