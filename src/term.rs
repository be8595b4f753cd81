use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, thread::sleep, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

/// Drawing and input primitives the game runs on.
pub trait Terminal {
    /// Takes over the screen. A failed setup can leave it partly done, so
    /// callers still owe a `restore`.
    fn setup(&mut self) -> Result<()>;
    /// Undoes `setup`, attempting every step even if an earlier one fails.
    fn restore(&mut self) -> Result<()>;
    /// Current (columns, rows).
    fn size(&self) -> Result<(TermInt, TermInt)>;
    fn clear(&mut self) -> Result<()>;
    fn set_color(&mut self, color: Color) -> Result<()>;
    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()>;
    /// Prints `lines` as a block centered on the screen.
    fn show_message(&mut self, lines: &[&str]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    /// Returns `None` right away if no key is waiting.
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;
    fn read_key_blocking(&mut self) -> Result<KeyEvent>;
    fn sleep_ms(&mut self, ms: u64);
}

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }
}

impl Terminal for TermManager {
    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        let raw = terminal::disable_raw_mode().context("Error unsetting raw mode");
        let shown = execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)
            .context("Error showing cursor");
        let screen = execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen");

        raw.and(shown).and(screen)
    }

    fn size(&self) -> Result<(TermInt, TermInt)> {
        terminal::size().context("Error reading size")
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")
    }

    fn set_color(&mut self, color: Color) -> Result<()> {
        queue!(self.stdout, style::SetForegroundColor(color)).context("Error setting color")
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("Error printing")
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        let (width, height) = self.size()?;
        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as TermInt;
        let top = (height / 2).saturating_sub(lines.len() as TermInt / 2);
        let left = (width / 2).saturating_sub(msg_width / 2);

        queue!(self.stdout, style::ResetColor).context("Error resetting color")?;
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(left, top + i as TermInt), style::Print(padded_line))
                .context("Error printing message")?;
        }

        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        while poll(Duration::from_millis(0)).context("Error polling events")? {
            if let Event::Key(ev) = read().context("Error reading event")? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    fn read_key_blocking(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading event")? {
                return Ok(ev);
            }
        }
    }

    fn sleep_ms(&mut self, ms: u64) {
        sleep(Duration::from_millis(ms));
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn setup(&mut self) -> Result<()> {
        (**self).setup()
    }

    fn restore(&mut self) -> Result<()> {
        (**self).restore()
    }

    fn size(&self) -> Result<(TermInt, TermInt)> {
        (**self).size()
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }

    fn set_color(&mut self, color: Color) -> Result<()> {
        (**self).set_color(color)
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        (**self).print_at(pos, ch)
    }

    fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        (**self).show_message(lines)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        (**self).poll_key()
    }

    fn read_key_blocking(&mut self) -> Result<KeyEvent> {
        (**self).read_key_blocking()
    }

    fn sleep_ms(&mut self, ms: u64) {
        (**self).sleep_ms(ms)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    use anyhow::bail;
    use crossterm::event::{KeyCode, KeyModifiers};

    pub fn key(ch: char) -> KeyEvent {
        KeyEvent { code: KeyCode::Char(ch), modifiers: KeyModifiers::NONE }
    }

    /// In-memory terminal fed from two key scripts: one consumed by the
    /// per-tick poll, one by blocking reads.
    pub struct ScriptedTerminal {
        pub size: (TermInt, TermInt),
        pub polled: VecDeque<Option<KeyEvent>>,
        pub blocking: VecDeque<KeyEvent>,
        pub frame: Vec<((TermInt, TermInt), char)>,
        pub colors: Vec<Color>,
        pub messages: Vec<Vec<String>>,
        pub slept: Vec<u64>,
        pub fail_setup: bool,
        pub fail_restore: bool,
        pub restores: usize,
    }

    impl ScriptedTerminal {
        pub fn new(size: (TermInt, TermInt)) -> Self {
            ScriptedTerminal {
                size,
                polled: VecDeque::new(),
                blocking: VecDeque::new(),
                frame: vec![],
                colors: vec![],
                messages: vec![],
                slept: vec![],
                fail_setup: false,
                fail_restore: false,
                restores: 0,
            }
        }

        pub fn poll(mut self, keys: &[Option<char>]) -> Self {
            self.polled.extend(keys.iter().map(|k| k.map(key)));
            self
        }

        pub fn block(mut self, keys: &[char]) -> Self {
            self.blocking.extend(keys.iter().copied().map(key));
            self
        }

        pub fn saw_line(&self, prefix: &str) -> bool {
            self.messages.iter().flatten().any(|line| line.starts_with(prefix))
        }

        pub fn count_lines(&self, prefix: &str) -> usize {
            self.messages.iter().flatten().filter(|line| line.starts_with(prefix)).count()
        }
    }

    impl Terminal for ScriptedTerminal {
        fn setup(&mut self) -> Result<()> {
            if self.fail_setup {
                bail!("Error setting raw mode");
            }
            Ok(())
        }

        fn restore(&mut self) -> Result<()> {
            self.restores += 1;
            if self.fail_restore {
                bail!("Error leaving alt screen");
            }
            Ok(())
        }

        fn size(&self) -> Result<(TermInt, TermInt)> {
            Ok(self.size)
        }

        fn clear(&mut self) -> Result<()> {
            self.frame.clear();
            Ok(())
        }

        fn set_color(&mut self, color: Color) -> Result<()> {
            self.colors.push(color);
            Ok(())
        }

        fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
            self.frame.push((pos, ch));
            Ok(())
        }

        fn show_message(&mut self, lines: &[&str]) -> Result<()> {
            self.messages.push(lines.iter().map(|l| l.to_string()).collect());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
            Ok(self.polled.pop_front().flatten())
        }

        fn read_key_blocking(&mut self) -> Result<KeyEvent> {
            match self.blocking.pop_front() {
                Some(ev) => Ok(ev),
                None => bail!("Ran out of scripted keys"),
            }
        }

        fn sleep_ms(&mut self, ms: u64) {
            self.slept.push(ms);
        }
    }
}
