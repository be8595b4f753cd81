use std::{env, path::PathBuf, str::FromStr};

use crossterm::style::Color;
use simplelog::LevelFilter;

pub const INITIAL_SNAKE_LENGTH: usize = 5;

pub const INITIAL_DELAY_MS: u64 = 100;
pub const MIN_DELAY_MS: u64 = 25;
pub const SPEEDUP_STEP_MS: u64 = 5;
pub const SPEEDUP_EVERY: usize = 5;

pub const FAREWELL_PAUSE_MS: u64 = 1000;

pub const SNAKE_BODY_CHAR: char = '◆';
pub const FOOD_CHAR: char = 'π';

const RAINBOW: [Color; 6] = [
    Color::Blue,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::White,
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorMode {
    Solid(Color),
    Rainbow,
}

impl Default for ColorMode {
    fn default() -> Self {
        ColorMode::Solid(Color::Blue)
    }
}

impl ColorMode {
    pub fn is_multi_color(&self) -> bool {
        matches!(self, ColorMode::Rainbow)
    }

    /// Color of the segment at `index`, counted from the head.
    pub fn segment_color(&self, index: usize) -> Color {
        match self {
            ColorMode::Solid(color) => *color,
            ColorMode::Rainbow => RAINBOW[index % RAINBOW.len()],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(max_x: i32, max_y: i32) -> Self {
        Bounds { max_x, max_y }
    }

    pub fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && y >= 0 && x < self.max_x && y < self.max_y
    }

    pub fn area(&self) -> usize {
        (self.max_x.max(0) as usize) * (self.max_y.max(0) as usize)
    }
}

/// Everything a snake needs to know about the board it is put on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnakeConfig {
    pub color: ColorMode,
    pub bounds: Bounds,
}

pub struct LogConfig {
    pub level: LevelFilter,
    pub path: PathBuf,
}

impl LogConfig {
    /// Reads `SNAKE_LOG` (level) and `SNAKE_LOG_FILE` (path).
    pub fn from_env() -> Self {
        let level = env::var("SNAKE_LOG")
            .ok()
            .and_then(|s| LevelFilter::from_str(s.trim()).ok())
            .unwrap_or(LevelFilter::Info);

        let path = env::var_os("SNAKE_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("snake.log"));

        LogConfig { level, path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainbow_rotates_per_segment() {
        let mode = ColorMode::Rainbow;
        assert_eq!(mode.segment_color(0), Color::Blue);
        assert_eq!(mode.segment_color(1), Color::Red);
        assert_eq!(mode.segment_color(6), Color::Blue);
        assert!(mode.is_multi_color());
    }

    #[test]
    fn solid_color_is_the_same_everywhere() {
        let mode = ColorMode::Solid(Color::Cyan);
        assert_eq!(mode.segment_color(0), Color::Cyan);
        assert_eq!(mode.segment_color(41), Color::Cyan);
        assert!(!mode.is_multi_color());
    }

    #[test]
    fn bounds_are_half_open() {
        let bounds = Bounds::new(10, 4);
        assert!(bounds.contains((0, 0)));
        assert!(bounds.contains((9, 3)));
        assert!(!bounds.contains((10, 3)));
        assert!(!bounds.contains((-1, 0)));
        assert!(!bounds.contains((0, 4)));
        assert_eq!(bounds.area(), 40);
    }
}
