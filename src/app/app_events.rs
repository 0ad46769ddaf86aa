use std::time::Instant;

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app_state::{App, Focus};
use crate::composer::ComposerAction;

impl App {
    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            // Only key presses; releases and repeats would double up
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_event(key, now);
            }
            Event::Paste(text) => self.handle_paste_event(&text, now),
            _ => {}
        }
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.handle_global_keys(key) {
            return;
        }

        match self.focus {
            Focus::Input => self.handle_input_key(key, now),
            Focus::Dialogs => self.handle_dialogs_key(key),
        }
    }

    /// Pasted text goes into the input as-is
    pub fn handle_paste_event(&mut self, text: &str, now: Instant) {
        if self.focus != Focus::Input || self.input_read_only() || text.is_empty() {
            return;
        }
        self.composer.discard_suggestion();
        self.composer.insert_str(text, now);
    }

    /// Keys that work regardless of focus; returns true if handled
    fn handle_global_keys(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Char('c') && ctrl {
            self.should_quit = true;
            return true;
        }

        // Popups swallow everything else while open
        if self.swap_popup.is_some() {
            if key.code == KeyCode::Esc {
                self.swap_popup = None;
            }
            return true;
        }

        if self.prices.is_visible() {
            match key.code {
                KeyCode::Esc | KeyCode::F(2) => self.prices.close(),
                KeyCode::Char('r') if ctrl => {
                    self.prices.force_refresh();
                }
                KeyCode::Up | KeyCode::Char('k') => self.prices.scroll.scroll_up(1),
                KeyCode::Down | KeyCode::Char('j') => self.prices.scroll.scroll_down(1),
                KeyCode::PageUp => self.prices.scroll.page_up(),
                KeyCode::PageDown => self.prices.scroll.page_down(),
                _ => {}
            }
            return true;
        }

        match key.code {
            KeyCode::F(2) => {
                self.prices.open();
                true
            }
            KeyCode::Char('r') if ctrl => {
                self.prices.force_refresh();
                true
            }
            KeyCode::Char('x') if ctrl => {
                self.conversation.cancel_in_flight_request();
                true
            }
            KeyCode::Esc => {
                self.toggle_focus();
                true
            }
            KeyCode::PageUp => {
                self.dialog_scroll.page_up();
                true
            }
            KeyCode::PageDown => {
                self.dialog_scroll.page_down();
                true
            }
            _ => false,
        }
    }

    fn toggle_focus(&mut self) {
        match self.focus {
            Focus::Input => {
                self.focus = Focus::Dialogs;
                self.composer.discard_suggestion();
                self.composer.blur();
            }
            Focus::Dialogs => {
                self.focus = Focus::Input;
                if !self.input_read_only() {
                    self.composer.focus();
                }
            }
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent, now: Instant) {
        if self.input_read_only() {
            return;
        }

        if let ComposerAction::Submit(content) = self.composer.handle_key(key, now) {
            self.submit(&content);
        }
    }

    fn handle_dialogs_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.dialog_scroll.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.dialog_scroll.scroll_down(1),
            KeyCode::Char('K') => self.dialog_scroll.scroll_up(10),
            KeyCode::Char('J') => self.dialog_scroll.scroll_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.dialog_scroll.jump_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.dialog_scroll.jump_to_bottom(),
            KeyCode::Char('i') | KeyCode::Enter => self.toggle_focus(),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "app_events_tests.rs"]
mod app_events_tests;
