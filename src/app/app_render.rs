use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app_state::{App, Focus};
use crate::composer::{composer_height, render_composer};
use crate::conversation::render_conversation;
use crate::prices::render_price_popup;
use crate::swap::render_swap_popup;

pub const NOT_CONNECTED: &str = "Wallet not connected";
const KEY_HINTS: &str = "Enter send | Tab apply | F2 prices | Esc pane | Ctrl+C quit ";

impl App {
    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame, now: Instant) {
        let layout = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(composer_height(&self.composer)),
            Constraint::Length(1),
        ])
        .split(frame.area());

        let dialogs_area = layout[0];
        let input_area = layout[1];
        let status_area = layout[2];

        render_conversation(
            self.conversation.store.dialogs(),
            self.conversation.status(),
            &mut self.dialog_scroll,
            frame,
            dialogs_area,
            self.focus == Focus::Dialogs,
        );

        let read_only = self.input_read_only();
        render_composer(&mut self.composer, frame, input_area, read_only, now);

        self.render_status_bar(frame, status_area);

        let full_area = frame.area();
        render_price_popup(&mut self.prices, frame, full_area);
        if let Some(swap) = &self.swap_popup {
            render_swap_popup(
                swap,
                &self.prices,
                self.wallet.is_connected(),
                frame,
                full_area,
            );
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let wallet = match self.wallet.display_address() {
            Some(address) => Span::styled(
                format!(" {} ", address),
                Style::default().fg(Color::Green),
            ),
            None => Span::styled(
                format!(" {} ", NOT_CONNECTED),
                Style::default().fg(Color::Yellow),
            ),
        };

        let [left, right] =
            Layout::horizontal([Constraint::Length(wallet.width() as u16), Constraint::Fill(1)])
                .areas(area);

        frame.render_widget(Paragraph::new(Line::from(wallet)), left);
        let hints = Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)));
        frame.render_widget(Paragraph::new(hints).right_aligned(), right);
    }
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
