//! Composer key handling

use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::composer_state::ComposerState;

/// What the caller should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    None,
    /// The user pressed Enter; carries the text that was in the field
    Submit(String),
}

impl ComposerState {
    /// Handle a key press while the field is focused
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> ComposerAction {
        // Tab only ever accepts; without a suggestion it is swallowed
        if key.code == KeyCode::Tab {
            self.accept_suggestion();
            return ComposerAction::None;
        }

        // Every other key removes a live suggestion before it is processed
        self.discard_suggestion();

        match key.code {
            KeyCode::Enter
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.insert_newline(now);
            }
            KeyCode::Enter => {
                return ComposerAction::Submit(self.take_for_submit());
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c, now);
            }
            KeyCode::Backspace => self.backspace(now),
            KeyCode::Delete => self.delete(now),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }

        ComposerAction::None
    }
}

#[cfg(test)]
#[path = "composer_events_tests.rs"]
mod composer_events_tests;
