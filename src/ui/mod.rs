pub mod report;

use std::io::{IsTerminal, Stdout, Write, stdout};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

/// Where rendered reports go.
pub trait Display {
    fn clear(&mut self);
    fn print(&mut self, text: &str);
}

/// Writes to stdout; clearing is skipped when stdout is not a terminal.
pub struct Terminal {
    out: Stdout,
    is_tty: bool,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        let out = stdout();
        let is_tty = out.is_terminal();
        Terminal { out, is_tty }
    }
}

impl Display for Terminal {
    fn clear(&mut self) {
        if !self.is_tty {
            return;
        }
        if let Err(err) = execute!(self.out, MoveTo(0, 0), Clear(ClearType::All)) {
            tracing::debug!(%err, "failed to clear terminal");
        }
    }

    fn print(&mut self, text: &str) {
        let mut lock = self.out.lock();
        if let Err(err) = lock.write_all(text.as_bytes()).and_then(|_| lock.flush()) {
            tracing::warn!(%err, "failed to write to stdout");
        }
    }
}

/// Collects everything printed, for tests and headless use.
#[derive(Debug, Default)]
pub struct Recorder {
    pub output: String,
    pub clears: usize,
}

impl Display for Recorder {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_output_and_counts_clears() {
        let mut recorder = Recorder::default();
        recorder.clear();
        recorder.print("a\n");
        recorder.print("b\n");
        assert_eq!(recorder.output, "a\nb\n");
        assert_eq!(recorder.clears, 1);
    }
}
