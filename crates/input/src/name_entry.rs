//! Player-name prompt shown after game over.
//!
//! Keys are fed in one at a time; the prompt edits its buffer and reports
//! when the player submits or skips. Validation of the submitted name is the
//! leaderboard's job.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Longest name the prompt accepts, in characters.
pub const NAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEdit {
    /// Buffer changed.
    Edited,
    /// Enter pressed; carries the raw buffer.
    Submit(String),
    /// Esc pressed.
    Cancel,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameEntry {
    buffer: String,
    /// Shown under the prompt after a rejected submit.
    message: Option<String>,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> NameEdit {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return NameEdit::Ignored;
        }

        match key.code {
            KeyCode::Enter => NameEdit::Submit(self.buffer.clone()),
            KeyCode::Esc => NameEdit::Cancel,
            KeyCode::Backspace => {
                if self.buffer.pop().is_some() {
                    self.message = None;
                    NameEdit::Edited
                } else {
                    NameEdit::Ignored
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if self.buffer.chars().count() >= NAME_MAX_CHARS {
                    return NameEdit::Ignored;
                }
                self.buffer.push(c);
                self.message = None;
                NameEdit::Edited
            }
            _ => NameEdit::Ignored,
        }
    }
}
