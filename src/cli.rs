use crossterm::style::Color;
use thiserror::Error;

use crate::config::ColorMode;

pub const USAGE: &str = "\
./snake [color_directive] or [print-usage]
  Color-Directives:
\t-r Red
\t-g Green
\t-c Cyan
\t-y Yellow
\t-p Magenta
\t-w White
\t-m Rainbow
  Print-Usage:
\t-h Help
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("usage requested")]
    Help,
    #[error("invalid option -- '{0}'")]
    UnknownFlag(char),
}

/// Picks the color mode from the first argument. Only that argument is
/// looked at, and in a cluster like `-rg` its first letter decides.
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<ColorMode, CliError> {
    let arg = match args.into_iter().next() {
        Some(arg) => arg,
        None => return Ok(ColorMode::default()),
    };

    if arg == "--" || !arg.starts_with('-') {
        return Ok(ColorMode::default());
    }

    let flag = match arg.chars().nth(1) {
        Some(flag) => flag,
        None => return Ok(ColorMode::default()),
    };

    let mode = match flag {
        'r' => ColorMode::Solid(Color::Red),
        'g' => ColorMode::Solid(Color::Green),
        'c' => ColorMode::Solid(Color::Cyan),
        'y' => ColorMode::Solid(Color::Yellow),
        'p' => ColorMode::Solid(Color::Magenta),
        'w' => ColorMode::Solid(Color::White),
        'm' => ColorMode::Rainbow,
        'h' => return Err(CliError::Help),
        other => return Err(CliError::UnknownFlag(other)),
    };

    Ok(mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<ColorMode, CliError> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_flag_is_the_default_color() {
        assert_eq!(parse_args(&[]), Ok(ColorMode::default()));
        assert_eq!(parse_args(&["snake"]), Ok(ColorMode::default()));
        assert_eq!(parse_args(&["--", "-r"]), Ok(ColorMode::default()));
        assert_eq!(parse_args(&["-"]), Ok(ColorMode::default()));
    }

    #[test]
    fn every_color_flag() {
        assert_eq!(parse_args(&["-r"]), Ok(ColorMode::Solid(Color::Red)));
        assert_eq!(parse_args(&["-g"]), Ok(ColorMode::Solid(Color::Green)));
        assert_eq!(parse_args(&["-c"]), Ok(ColorMode::Solid(Color::Cyan)));
        assert_eq!(parse_args(&["-y"]), Ok(ColorMode::Solid(Color::Yellow)));
        assert_eq!(parse_args(&["-p"]), Ok(ColorMode::Solid(Color::Magenta)));
        assert_eq!(parse_args(&["-w"]), Ok(ColorMode::Solid(Color::White)));
        assert_eq!(parse_args(&["-m"]), Ok(ColorMode::Rainbow));
    }

    #[test]
    fn first_flag_wins() {
        assert_eq!(parse_args(&["-rg"]), Ok(ColorMode::Solid(Color::Red)));
        assert_eq!(parse_args(&["-m", "-w"]), Ok(ColorMode::Rainbow));
    }

    #[test]
    fn help_and_unknown_flags_are_errors() {
        assert_eq!(parse_args(&["-h"]), Err(CliError::Help));
        assert_eq!(parse_args(&["-x"]), Err(CliError::UnknownFlag('x')));
        assert_eq!(CliError::UnknownFlag('x').to_string(), "invalid option -- 'x'");
    }
}
