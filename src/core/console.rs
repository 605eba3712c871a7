//! Command history with shell-style recall, plus the console transcript.

use crate::config::MAX_COMMAND_HISTORY;
use crate::models::{ConsoleKind, ConsoleLine};
use crate::utils::RingBuffer;

/// Issued commands and the rendered transcript.
///
/// The recall cursor ranges over `0..=history.len()`, where `len()` is the
/// blank input line past the newest command. Command execution lives
/// elsewhere; this only tracks what was typed and what was printed.
#[derive(Clone, Debug)]
pub struct CommandConsole {
    history: RingBuffer<String>,
    cursor: usize,
    transcript: Vec<ConsoleLine>,
}

impl CommandConsole {
    pub fn new() -> Self {
        Self::with_capacity(MAX_COMMAND_HISTORY)
    }

    /// Console remembering at most `capacity` commands for recall.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            history: RingBuffer::new(capacity),
            cursor: 0,
            transcript: Vec::new(),
        }
    }

    /// Append a command and park the cursor past the end.
    pub fn record(&mut self, command: impl Into<String>) {
        self.history.push(command.into());
        self.cursor = self.history.len();
    }

    /// Move the recall cursor and return the command under it.
    ///
    /// Negative `direction` walks toward older commands and stops at the
    /// oldest; positive walks toward newer ones and stops on the blank line
    /// past the end, which yields an empty string.
    pub fn recall(&mut self, direction: i32) -> String {
        if direction < 0 {
            self.cursor = self.cursor.saturating_sub(1);
        } else if direction > 0 && self.cursor < self.history.len() {
            self.cursor += 1;
        }
        self.history.get(self.cursor).cloned().unwrap_or_default()
    }

    pub fn append_output(&mut self, text: impl Into<String>, kind: ConsoleKind, at: f64) {
        self.transcript.push(ConsoleLine::new(kind, text, at));
    }

    pub fn transcript(&self) -> &[ConsoleLine] {
        &self.transcript
    }

    /// Recallable commands, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history.to_vec()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for CommandConsole {
    fn default() -> Self {
        Self::new()
    }
}
