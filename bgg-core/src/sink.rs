//! Line-oriented output target for the human-readable renderings of the
//! data model.
//!
//! Rendering is kept apart from iteration: entities push finished lines into
//! a [`Sink`] and never touch their own contents while doing so. The CLI
//! renders through [`LogSink`]; tests collect into a `Vec<String>`.

use std::fmt;

/// Receives rendered lines.
pub trait Sink {
    fn line(&mut self, line: &str);

    /// Write a `label: value` line with the label padded to `width`.
    fn field(&mut self, width: usize, label: &str, value: &dyn fmt::Display) {
        self.line(&format!("{label:<width$}: {value}"));
    }

    fn blank(&mut self) {
        self.line("");
    }
}

impl Sink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Forwards every line to the `log` facade at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Info)
    }
}

impl Sink for LogSink {
    fn line(&mut self, line: &str) {
        log::log!(self.level, "{line}");
    }
}

/// Something that can render itself into a [`Sink`].
pub trait LogFormat {
    fn format(&self, sink: &mut dyn Sink);
}

/// Displays an optional value, or `n/a` when absent.
pub struct Maybe<'a, T>(pub &'a Option<T>);

impl<T: fmt::Display> fmt::Display for Maybe<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => write!(f, "n/a"),
        }
    }
}
