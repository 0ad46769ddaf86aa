//! Composer rendering
//!
//! Projects `ComposerState` onto the input pane: plain text, highlighted
//! keywords, the dim trailing suggestion, or the placeholder.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::composer_state::{
    APPLY_HINT, ComposerState, FieldPhase, INPUT_PLACEHOLDER, visual_lines,
};
use crate::widgets::popup;

fn keyword_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

fn suggestion_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

fn placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Total rows the composer wants, borders included
pub fn composer_height(state: &ComposerState) -> u16 {
    state.height_hint() + 2
}

/// Render the input pane
///
/// `read_only` is set while a reply is pending; the field is drawn dimmed
/// and no cursor is shown.
pub fn render_composer(
    state: &mut ComposerState,
    frame: &mut Frame,
    area: Rect,
    read_only: bool,
    now: Instant,
) {
    let (title, border_color) = if read_only {
        (" Responding... ", Color::DarkGray)
    } else if state.is_focused() {
        (" Message ", Color::Cyan)
    } else {
        (" Message ", Color::Gray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    state.set_wrap_width(inner.width);

    let paragraph = Paragraph::new(build_lines(state)).block(block);
    frame.render_widget(paragraph, area);

    if state.is_focused() && !read_only {
        let (row, col) = state.cursor_position();
        if row < inner.height {
            frame.set_cursor_position((inner.x + col, inner.y + row));
        }
    }

    if state.show_apply_hint(now) {
        render_apply_hint(frame, area);
    }
}

/// Build the styled lines for the current state
pub fn build_lines(state: &ComposerState) -> Vec<Line<'static>> {
    if state.phase() == FieldPhase::Placeholder {
        return vec![Line::from(Span::styled(
            INPUT_PLACEHOLDER,
            placeholder_style(),
        ))];
    }

    let content = state.extract_content();
    let width = state.wrap_width() as usize;

    visual_lines(&content, width)
        .into_iter()
        .map(|line| {
            let mut spans = Vec::new();
            let mut pos = line.start;
            while pos < line.end {
                let (style, segment_end) = segment_at(state, pos);
                let end = segment_end.min(line.end);
                spans.push(Span::styled(content[pos..end].to_string(), style));
                pos = end;
            }
            Line::from(spans)
        })
        .collect()
}

/// Style of the segment starting at `pos` and where that segment ends
fn segment_at(state: &ComposerState, pos: usize) -> (Style, usize) {
    let text_len = state.text().len();
    if pos >= text_len {
        return (suggestion_style(), usize::MAX);
    }

    if let Some(range) = state.highlights().iter().find(|r| r.contains(&pos)) {
        return (keyword_style(), range.end);
    }

    let next_highlight = state
        .highlights()
        .iter()
        .map(|r| r.start)
        .filter(|&start| start > pos)
        .min()
        .unwrap_or(text_len);
    (Style::default(), next_highlight.min(text_len))
}

fn render_apply_hint(frame: &mut Frame, anchor: Rect) {
    let width = APPLY_HINT.width() as u16 + 4;
    let area = popup::popup_above_anchor(anchor, width, 3, 1);
    if area.height < 3 {
        return;
    }

    popup::clear_area(frame, area);
    let hint = Paragraph::new(Line::from(Span::styled(
        APPLY_HINT,
        Style::default().fg(Color::Yellow),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(hint, area);
}

#[cfg(test)]
#[path = "composer_render_tests.rs"]
mod composer_render_tests;
