//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::domain::config::LogLevel;

/// Presenter for CLI output formatting
///
/// Status lines go to stderr so stdout stays clean for `paste` and `files`.
pub struct Presenter {
    level: LogLevel,
}

impl Presenter {
    /// Create a new presenter
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print only with `--verbose` or `--debug`
    pub fn verbose(&self, message: &str) {
        if self.level.is_verbose() {
            eprintln!("{} {}", "·".dimmed(), message);
        }
    }

    /// Print only with `--debug`
    pub fn debug(&self, message: &str) {
        if self.level.is_debug() {
            eprintln!("{} {}", "›".magenta(), message.dimmed());
        }
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Output text to stdout exactly as given
    pub fn output_raw(&self, text: &str) -> io::Result<()> {
        write_raw(&mut io::stdout().lock(), text)
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

fn write_raw(out: &mut impl Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presenter_keeps_level() {
        assert_eq!(Presenter::default().level(), LogLevel::Normal);
        assert_eq!(Presenter::new(LogLevel::Debug).level(), LogLevel::Debug);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn raw_output_keeps_bytes_and_reports_write_errors() {
        let mut buf = Vec::new();
        write_raw(&mut buf, "no newline").unwrap();
        assert_eq!(buf, b"no newline");

        let err = write_raw(&mut ClosedPipe, "lost").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
