//! Tests for composer rendering

use super::*;
use crate::test_utils::test_helpers::{buffer_line, type_text};
use ratatui::{Terminal, backend::TestBackend};

fn draw(state: &mut ComposerState, read_only: bool, now: Instant) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(50, 8)).unwrap();
    terminal
        .draw(|frame| {
            let area = Rect::new(0, 5, 50, 3);
            render_composer(state, frame, area, read_only, now);
        })
        .unwrap();
    terminal
}

#[test]
fn test_placeholder_is_rendered() {
    let mut state = ComposerState::default();
    state.mount();
    let terminal = draw(&mut state, false, Instant::now());
    assert!(buffer_line(terminal.backend().buffer(), 6).contains(INPUT_PLACEHOLDER));
}

#[test]
fn test_text_and_suggestion_are_rendered() {
    let mut state = ComposerState::default();
    state.mount();
    state.focus();
    type_text(&mut state, "swap");
    let terminal = draw(&mut state, false, Instant::now());
    let line = buffer_line(terminal.backend().buffer(), 6);
    assert!(line.contains("swap {{AMOUNT}}"), "line was {:?}", line);
}

#[test]
fn test_keyword_and_suggestion_styles() {
    let mut state = ComposerState::default();
    state.focus();
    type_text(&mut state, "swap");
    state.set_wrap_width(48);

    let lines = build_lines(&state);
    assert_eq!(lines.len(), 1);
    let spans = &lines[0].spans;
    assert_eq!(spans[0].content, "swap");
    assert_eq!(spans[0].style, keyword_style());
    assert_eq!(spans[1].content, " ");
    assert_eq!(spans[1].style, Style::default());
    assert_eq!(spans[2].style, suggestion_style());
}

#[test]
fn test_apply_hint_shown_above_input() {
    let mut state = ComposerState::default();
    state.focus();
    let now = Instant::now();
    for c in "swap".chars() {
        state.insert_char(c, now);
    }
    let terminal = draw(&mut state, false, now);
    assert!(buffer_line(terminal.backend().buffer(), 3).contains(APPLY_HINT));
}

#[test]
fn test_read_only_title() {
    let mut state = ComposerState::default();
    state.mount();
    let terminal = draw(&mut state, true, Instant::now());
    assert!(buffer_line(terminal.backend().buffer(), 5).contains("Responding"));
}

#[test]
fn test_composer_height_includes_borders() {
    let state = ComposerState::default();
    assert_eq!(composer_height(&state), state.height_hint() + 2);
}
