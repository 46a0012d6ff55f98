//! Sinks for the evaluator's trace lines.

use std::sync::Mutex;

/// Receives one trace line per evaluation step.
pub trait VerboseLog {
    fn verbose(&self, message: &str);
}

impl<F: Fn(&str)> VerboseLog for F {
    fn verbose(&self, message: &str) {
        self(message)
    }
}

/// Routes trace lines to `tracing`: `info` when verbose output is enabled,
/// `debug` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog {
    pub verbose: bool,
}

impl TracingLog {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl VerboseLog for TracingLog {
    fn verbose(&self, message: &str) {
        if self.verbose {
            tracing::info!(target: "plexhook::filters", "{}", message);
        } else {
            tracing::debug!(target: "plexhook::filters", "{}", message);
        }
    }
}

/// Keeps every line in order, for assertions and dry runs.
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl VerboseLog for RecordingLog {
    fn verbose(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
