//! Dialog pane rendering
//!
//! Messages are wrapped up front so the scroll bounds match what is drawn.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::types::{DialogRecord, DialogSender, ResponseStatus};
use crate::composer::visual_lines;
use crate::scroll::ScrollState;

pub const USER_LABEL: &str = "You";
pub const ASSISTANT_LABEL: &str = "flyfish";

fn header_style(sender: DialogSender) -> Style {
    let color = match sender {
        DialogSender::User => Color::Cyan,
        DialogSender::Assistant => Color::Green,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn body_style(dialog: &DialogRecord) -> Style {
    if dialog.is_being_generated {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    } else if dialog.is_error {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    }
}

/// Wrapped lines for every dialog, one blank line between records
pub fn build_dialog_lines(dialogs: &[DialogRecord], width: u16) -> Vec<Line<'static>> {
    let width = (width as usize).saturating_sub(2).max(1);
    let mut lines = Vec::new();

    for (i, dialog) in dialogs.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }

        let label = match dialog.sender {
            DialogSender::User => USER_LABEL,
            DialogSender::Assistant => ASSISTANT_LABEL,
        };
        lines.push(Line::from(Span::styled(label, header_style(dialog.sender))));

        let style = body_style(dialog);
        for range in visual_lines(&dialog.message, width) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(dialog.message[range].to_string(), style),
            ]));
        }
    }

    lines
}

/// Render the dialog pane and keep `scroll` in step with its content
pub fn render_conversation(
    dialogs: &[DialogRecord],
    status: ResponseStatus,
    scroll: &mut ScrollState,
    frame: &mut Frame,
    area: Rect,
    focused: bool,
) {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Conversation ")
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", status),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        )
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    let lines = build_dialog_lines(dialogs, inner.width);
    scroll.update_bounds(lines.len(), inner.height);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll.offset, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
#[path = "conversation_render_tests.rs"]
mod conversation_render_tests;
