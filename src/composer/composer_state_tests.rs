//! Tests for ComposerState

use super::*;
use crate::test_utils::test_helpers::type_text;

const SWAP_TEMPLATE: &str = "{{AMOUNT}} of {{Token A}} to {{Token B}}";

fn focused_composer() -> ComposerState {
    let mut composer = ComposerState::default();
    composer.mount();
    composer.focus();
    composer
}

// =========================================================================
// Phases
// =========================================================================

#[test]
fn test_new_composer_is_empty() {
    let composer = ComposerState::default();
    assert_eq!(composer.phase(), FieldPhase::Empty);
    assert!(!composer.has_content());
    assert!(!composer.is_focused());
}

#[test]
fn test_mount_shows_placeholder() {
    let mut composer = ComposerState::default();
    composer.mount();
    assert_eq!(composer.phase(), FieldPhase::Placeholder);
}

#[test]
fn test_focus_removes_placeholder() {
    let composer = focused_composer();
    assert_eq!(composer.phase(), FieldPhase::Editing);
    assert!(composer.is_focused());
}

#[test]
fn test_blur_empty_restores_placeholder() {
    let mut composer = focused_composer();
    composer.blur();
    assert_eq!(composer.phase(), FieldPhase::Placeholder);
}

#[test]
fn test_blur_with_content_keeps_editing() {
    let mut composer = focused_composer();
    type_text(&mut composer, "hi");
    composer.blur();
    assert_eq!(composer.phase(), FieldPhase::Editing);
    assert_eq!(composer.text(), "hi");
}

#[test]
fn test_deleting_everything_leaves_field_empty() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "a");
    composer.backspace(now);
    assert_eq!(composer.text(), "");
    assert_eq!(composer.phase(), FieldPhase::Empty);
}

#[test]
fn test_lone_newline_is_removed() {
    let mut composer = focused_composer();
    composer.insert_newline(Instant::now());
    assert_eq!(composer.text(), "");
    assert_eq!(composer.cursor(), 0);
    assert_eq!(composer.phase(), FieldPhase::Empty);
}

// =========================================================================
// Keyword detection
// =========================================================================

#[test]
fn test_typing_trigger_inserts_suggestion() {
    let mut composer = focused_composer();
    type_text(&mut composer, "Please swap");

    assert_eq!(composer.phase(), FieldPhase::Suggesting);
    assert_eq!(composer.text(), "Please swap ");
    assert_eq!(composer.highlights(), &[7..11]);
    assert_eq!(composer.cursor(), composer.text().len());

    let pending = composer.pending().unwrap();
    assert_eq!(pending.rule_id, "swap");
    assert_eq!(pending.text, SWAP_TEMPLATE);
}

#[test]
fn test_trigger_detection_is_case_insensitive() {
    let mut composer = focused_composer();
    type_text(&mut composer, "SWAP");
    assert_eq!(composer.pending().unwrap().rule_id, "swap");
    assert_eq!(&composer.text()[composer.highlights()[0].clone()], "SWAP");
}

#[test]
fn test_no_suggestion_for_plain_text() {
    let mut composer = focused_composer();
    type_text(&mut composer, "hello world");
    assert!(composer.pending().is_none());
    assert!(composer.highlights().is_empty());
    assert_eq!(composer.phase(), FieldPhase::Editing);
}

#[test]
fn test_no_detection_when_cursor_not_at_end() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swa!");
    composer.move_left();
    composer.insert_char('p', now);
    assert_eq!(composer.text(), "swap!");
    assert!(composer.pending().is_none());
}

#[test]
fn test_suggestion_uses_wallet_address() {
    let mut composer = focused_composer();
    composer.set_context(SuggestionContext::with_wallet("0xfeed"));
    type_text(&mut composer, "transfer");
    assert_eq!(composer.pending().unwrap().text, "{{AMOUNT}} to 0xfeed");
}

#[test]
fn test_suggestion_without_wallet_keeps_placeholder_token() {
    let mut composer = focused_composer();
    type_text(&mut composer, "balance");
    assert_eq!(composer.pending().unwrap().text, "of {{WALLET ADDRESS}}");
}

#[test]
fn test_highlighted_keyword_does_not_retrigger() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swap");
    composer.discard_suggestion();
    // Remove the separating space; the keyword is still highlighted
    composer.backspace(now);
    assert_eq!(composer.text(), "swap");
    assert_eq!(composer.highlights(), &[0..4]);
    assert!(composer.pending().is_none());
}

#[test]
fn test_editing_inside_keyword_removes_highlight() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swap");
    composer.discard_suggestion();
    composer.backspace(now); // space
    composer.backspace(now); // 'p'
    assert_eq!(composer.text(), "swa");
    assert!(composer.highlights().is_empty());
}

#[test]
fn test_extending_keyword_removes_highlight() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swap");
    composer.discard_suggestion();
    composer.backspace(now); // space
    composer.insert_char('s', now);
    assert_eq!(composer.text(), "swaps");
    assert!(composer.highlights().is_empty());
    assert!(composer.pending().is_none());
}

#[test]
fn test_typing_after_separator_keeps_highlight() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swap");
    composer.discard_suggestion();
    composer.insert_char('1', now);
    assert_eq!(composer.text(), "swap 1");
    assert_eq!(composer.highlights(), &[0..4]);
}

#[test]
fn test_typing_before_keyword_shifts_highlight() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "swap");
    composer.discard_suggestion();
    composer.move_home();
    composer.insert_char('>', now);
    assert_eq!(composer.text(), ">swap ");
    assert_eq!(composer.highlights(), &[1..5]);
}

#[test]
fn test_apply_hint_expires() {
    let mut composer = focused_composer();
    let now = Instant::now();
    for c in "swap".chars() {
        composer.insert_char(c, now);
    }
    assert!(composer.show_apply_hint(now));
    assert!(!composer.show_apply_hint(now + APPLY_HINT_DURATION));
}

// =========================================================================
// Accept / discard / extract
// =========================================================================

#[test]
fn test_accept_suggestion_makes_plain_text() {
    let mut composer = focused_composer();
    type_text(&mut composer, "Please swap");

    assert!(composer.accept_suggestion());
    assert_eq!(composer.phase(), FieldPhase::Editing);
    assert!(composer.pending().is_none());
    assert_eq!(
        composer.extract_content(),
        format!("Please swap {}", SWAP_TEMPLATE)
    );
    assert_eq!(composer.cursor(), composer.text().len());
}

#[test]
fn test_accept_without_suggestion_is_noop() {
    let mut composer = focused_composer();
    type_text(&mut composer, "hi");
    assert!(!composer.accept_suggestion());
    assert_eq!(composer.text(), "hi");
}

#[test]
fn test_discard_suggestion_keeps_keyword() {
    let mut composer = focused_composer();
    type_text(&mut composer, "swap");
    assert!(composer.discard_suggestion());
    assert_eq!(composer.extract_content(), "swap ");
    assert!(!composer.extract_content().contains(SWAP_TEMPLATE));
}

#[test]
fn test_extract_includes_live_suggestion() {
    let mut composer = focused_composer();
    type_text(&mut composer, "swap");
    assert_eq!(composer.extract_content(), format!("swap {}", SWAP_TEMPLATE));
}

#[test]
fn test_take_for_submit_discards_suggestion_and_clears() {
    let mut composer = focused_composer();
    type_text(&mut composer, "swap");
    let content = composer.take_for_submit();
    assert_eq!(content, "swap ");
    assert_eq!(composer.text(), "");
    assert!(!composer.is_focused());
    assert_eq!(composer.phase(), FieldPhase::Placeholder);
}

// =========================================================================
// Cursor movement
// =========================================================================

#[test]
fn test_cursor_moves_by_char() {
    let mut composer = focused_composer();
    type_text(&mut composer, "héllo");
    composer.move_home();
    composer.move_right();
    composer.move_right();
    assert_eq!(composer.cursor(), "hé".len());
    composer.move_left();
    assert_eq!(composer.cursor(), 1);
}

#[test]
fn test_home_end_work_per_line() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "ab");
    composer.insert_newline(now);
    type_text(&mut composer, "cd");
    composer.move_home();
    assert_eq!(composer.cursor(), 3);
    composer.move_end();
    assert_eq!(composer.cursor(), 5);
}

#[test]
fn test_delete_removes_char_under_cursor() {
    let mut composer = focused_composer();
    type_text(&mut composer, "abc");
    composer.move_home();
    composer.delete(Instant::now());
    assert_eq!(composer.text(), "bc");
    assert_eq!(composer.cursor(), 0);
}

// =========================================================================
// Layout
// =========================================================================

#[test]
fn test_visual_lines_wrap_and_break() {
    assert_eq!(visual_lines("abcdef", 4), vec![0..4, 4..6]);
    assert_eq!(visual_lines("ab\ncd", 10), vec![0..2, 3..5]);
    assert_eq!(visual_lines("", 10), vec![0..0]);
}

#[test]
fn test_height_hint_grows_and_clamps() {
    let mut composer = focused_composer();
    composer.set_wrap_width(10);
    assert_eq!(composer.height_hint(), MIN_ROWS);

    type_text(&mut composer, "0123456789abc");
    assert_eq!(composer.height_hint(), 2);

    type_text(&mut composer, &"x".repeat(200));
    assert_eq!(composer.height_hint(), MAX_ROWS);
}

#[test]
fn test_cursor_position_after_wrap() {
    let mut composer = focused_composer();
    composer.set_wrap_width(4);
    type_text(&mut composer, "abcdef");
    assert_eq!(composer.cursor_position(), (1, 2));
}

#[test]
fn test_cursor_position_at_full_line_end() {
    let mut composer = focused_composer();
    composer.set_wrap_width(4);
    type_text(&mut composer, "abcd");
    assert_eq!(composer.cursor_position(), (1, 0));
}

#[test]
fn test_cursor_position_after_newline() {
    let mut composer = focused_composer();
    let now = Instant::now();
    type_text(&mut composer, "ab");
    composer.insert_newline(now);
    assert_eq!(composer.cursor_position(), (1, 0));
}
