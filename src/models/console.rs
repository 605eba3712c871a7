//! Console transcript line types.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Kind of a transcript line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleKind {
    /// Echo of the command the user entered
    Command,
    /// Successful response text
    Output,
    /// Failure text (red)
    Error,
}

/// A single line of the console transcript with a unique ID.
#[derive(Clone, Debug)]
pub struct ConsoleLine {
    /// Unique ID for efficient keying in For loops
    pub id: usize,
    pub kind: ConsoleKind,
    pub text: String,
    /// Clock time (milliseconds) the line was appended
    pub at: f64,
}

// Global counter for generating unique IDs
static CONSOLE_LINE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl ConsoleLine {
    pub fn new(kind: ConsoleKind, text: impl Into<String>, at: f64) -> Self {
        Self {
            id: CONSOLE_LINE_COUNTER.fetch_add(1, Ordering::Relaxed),
            kind,
            text: text.into(),
            at,
        }
    }

    /// Text as shown in the transcript; commands get a `$ ` prefix.
    pub fn display_text(&self) -> String {
        match self.kind {
            ConsoleKind::Command => format!("$ {}", self.text),
            ConsoleKind::Output | ConsoleKind::Error => self.text.clone(),
        }
    }
}

impl PartialEq for ConsoleLine {
    fn eq(&self, other: &Self) -> bool {
        // Only compare content, not ID or time
        self.kind == other.kind && self.text == other.text
    }
}
