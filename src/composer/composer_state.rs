//! Composer state
//!
//! The chat input is modelled as plain text plus a few annotations: byte
//! ranges that render as highlighted keywords, and at most one pending
//! suggestion that trails the text until it is accepted or discarded. The
//! renderer projects this onto the input pane; nothing is inferred from the
//! rendered output.

use std::ops::Range;
use std::time::{Duration, Instant};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::suggestion::{SuggestionContext, SuggestionEngine};

/// Text shown while the field is empty and unfocused
pub const INPUT_PLACEHOLDER: &str = "Start conversation with flyfish...";

/// Hint shown next to a freshly highlighted keyword
pub const APPLY_HINT: &str = "Press Tab to apply";

/// How long the apply hint stays visible
pub const APPLY_HINT_DURATION: Duration = Duration::from_millis(2000);

/// Minimum and maximum rows the input pane asks for
pub const MIN_ROWS: u16 = 1;
pub const MAX_ROWS: u16 = 6;

/// Which state the editable field is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// No content and no placeholder
    Empty,
    /// Decorative placeholder text is showing
    Placeholder,
    /// User content present, no live suggestion
    Editing,
    /// A suggestion trails the content and has not been accepted or discarded
    Suggesting,
}

/// Suggestion text waiting for the user to press Tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSuggestion {
    /// Id of the keyword rule that produced it
    pub rule_id: &'static str,
    /// Rendered template text
    pub text: String,
}

/// State of the chat input field
#[derive(Debug, Clone)]
pub struct ComposerState {
    text: String,
    /// Byte offset into `text`, always on a char boundary
    cursor: usize,
    highlights: Vec<Range<usize>>,
    pending: Option<PendingSuggestion>,
    phase: FieldPhase,
    focused: bool,
    engine: SuggestionEngine,
    context: SuggestionContext,
    wrap_width: u16,
    height_hint: u16,
    hint_until: Option<Instant>,
}

impl ComposerState {
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            highlights: Vec::new(),
            pending: None,
            phase: FieldPhase::Empty,
            focused: false,
            engine,
            context: SuggestionContext::default(),
            wrap_width: 80,
            height_hint: MIN_ROWS,
            hint_until: None,
        }
    }

    /// Show the placeholder if the field has never been filled
    pub fn mount(&mut self) {
        if self.phase == FieldPhase::Empty && !self.focused && self.text.is_empty() {
            self.phase = FieldPhase::Placeholder;
        }
    }

    /// Replace the values used to fill suggestion placeholders
    pub fn set_context(&mut self, context: SuggestionContext) {
        self.context = context;
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn highlights(&self) -> &[Range<usize>] {
        &self.highlights
    }

    pub fn pending(&self) -> Option<&PendingSuggestion> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn height_hint(&self) -> u16 {
        self.height_hint
    }

    /// Whether the field holds anything the user typed
    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
    }

    /// Whether the "Press Tab to apply" hint should be drawn at `now`
    pub fn show_apply_hint(&self, now: Instant) -> bool {
        self.pending.is_some() && self.hint_until.is_some_and(|until| now < until)
    }

    /// Text followed by the pending suggestion, if any
    ///
    /// A live suggestion is included verbatim, so callers that submit must
    /// discard it first.
    pub fn extract_content(&self) -> String {
        match &self.pending {
            Some(pending) => format!("{}{}", self.text, pending.text),
            None => self.text.clone(),
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focus(&mut self) {
        self.focused = true;
        if matches!(self.phase, FieldPhase::Empty | FieldPhase::Placeholder) {
            self.phase = FieldPhase::Editing;
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
        if !self.has_content() {
            self.pending = None;
            self.phase = FieldPhase::Placeholder;
        }
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    /// Turn the pending suggestion into plain text at the end of the field
    ///
    /// Returns false when there was nothing to accept.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.text.push_str(&pending.text);
        self.cursor = self.text.len();
        self.phase = FieldPhase::Editing;
        self.hint_until = None;
        self.recompute_height();
        log::debug!("Accepted suggestion for '{}'", pending.rule_id);
        true
    }

    /// Drop the pending suggestion without touching the text
    pub fn discard_suggestion(&mut self) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.phase = FieldPhase::Editing;
        self.hint_until = None;
        self.recompute_height();
        true
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn insert_char(&mut self, ch: char, now: Instant) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf), now);
    }

    pub fn insert_newline(&mut self, now: Instant) {
        self.insert_str("\n", now);
    }

    /// Insert text at the cursor and run the content-change pass
    pub fn insert_str(&mut self, s: &str, now: Instant) {
        if s.is_empty() {
            return;
        }
        if self.phase == FieldPhase::Placeholder {
            self.phase = FieldPhase::Editing;
        }

        let at = self.cursor;
        let len = s.len();
        self.text.insert_str(at, s);
        self.highlights.retain_mut(|range| {
            if at <= range.start {
                range.start += len;
                range.end += len;
                true
            } else {
                at > range.end
            }
        });
        self.cursor = at + len;
        self.on_content_change(now);
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self, now: Instant) {
        if self.cursor == 0 {
            return;
        }
        let start = prev_boundary(&self.text, self.cursor);
        self.remove_range(start..self.cursor);
        self.cursor = start;
        self.on_content_change(now);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self, now: Instant) {
        if self.cursor >= self.text.len() {
            return;
        }
        let end = next_boundary(&self.text, self.cursor);
        self.remove_range(self.cursor..end);
        self.on_content_change(now);
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_boundary(&self.text, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.text.len() {
            self.cursor = next_boundary(&self.text, self.cursor);
        }
    }

    /// Move to the start of the current line
    pub fn move_home(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// Move to the end of the current line
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i);
    }

    /// Remove everything, including any pending suggestion
    pub fn clear(&mut self) {
        self.text.clear();
        self.highlights.clear();
        self.pending = None;
        self.hint_until = None;
        self.cursor = 0;
        self.phase = FieldPhase::Empty;
        self.recompute_height();
    }

    /// Discard any live suggestion, return the text, then clear and blur
    pub fn take_for_submit(&mut self) -> String {
        self.discard_suggestion();
        let content = self.extract_content();
        self.clear();
        self.blur();
        content
    }

    fn remove_range(&mut self, removed: Range<usize>) {
        let len = removed.end - removed.start;
        self.text.replace_range(removed.clone(), "");
        self.highlights.retain_mut(|range| {
            if range.end <= removed.start {
                true
            } else if range.start >= removed.end {
                range.start -= len;
                range.end -= len;
                true
            } else {
                false
            }
        });
    }

    /// Content-change pass: height, placeholder, keyword detection, cleanup
    fn on_content_change(&mut self, now: Instant) {
        self.recompute_height();

        if self.text.is_empty() {
            self.highlights.clear();
            self.phase = FieldPhase::Placeholder;
        } else {
            if self.pending.is_none() {
                self.phase = FieldPhase::Editing;
            }
            self.detect_keyword(now);
        }

        self.normalize();
    }

    /// Highlight a trigger word typed at the end and attach its suggestion
    fn detect_keyword(&mut self, now: Instant) {
        if self.pending.is_some() || self.cursor != self.text.len() {
            return;
        }

        let run_start = self
            .text
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map_or(0, |(i, c)| i + c.len_utf8());
        if run_start == self.text.len() || self.highlights.iter().any(|r| r.end > run_start) {
            return;
        }

        let Some(found) = self.engine.match_trailing(&self.text[run_start..]) else {
            return;
        };

        let span_start = self.text.len() - found.matched_span.len();
        self.highlights.push(span_start..self.text.len());
        self.text.push(' ');
        self.cursor = self.text.len();
        self.pending = Some(PendingSuggestion {
            rule_id: found.rule.id,
            text: SuggestionEngine::render(found.rule, &self.context),
        });
        self.phase = FieldPhase::Suggesting;
        self.hint_until = Some(now + APPLY_HINT_DURATION);
        self.recompute_height();
        log::debug!("Keyword '{}' detected", found.rule.id);
    }

    /// Drop a lone line break or a placeholder with nothing else around it
    fn normalize(&mut self) {
        if self.text == "\n" {
            self.text.clear();
            self.highlights.clear();
            self.cursor = 0;
            self.recompute_height();
            self.phase = FieldPhase::Empty;
        } else if self.phase == FieldPhase::Placeholder && self.text.is_empty() {
            self.phase = FieldPhase::Empty;
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Update the width used for wrapping; called by the renderer
    pub fn set_wrap_width(&mut self, width: u16) {
        let width = width.max(1);
        if width != self.wrap_width {
            self.wrap_width = width;
            self.recompute_height();
        }
    }

    pub fn wrap_width(&self) -> u16 {
        self.wrap_width
    }

    fn recompute_height(&mut self) {
        let rows = visual_lines(&self.extract_content(), self.wrap_width as usize).len();
        self.height_hint = (rows.min(u16::MAX as usize) as u16).clamp(MIN_ROWS, MAX_ROWS);
    }

    /// Row and column of the cursor inside the wrapped content
    pub fn cursor_position(&self) -> (u16, u16) {
        let width = self.wrap_width.max(1) as usize;
        let content = self.extract_content();
        let lines = visual_lines(&content, width);

        let (row, range) = lines
            .iter()
            .enumerate()
            .rfind(|(_, r)| r.start <= self.cursor && self.cursor <= r.end)
            .map(|(row, r)| (row, r.clone()))
            .unwrap_or((0, 0..0));

        let col = content[range.start..self.cursor].width();
        if col >= width {
            ((row + 1) as u16, 0)
        } else {
            (row as u16, col as u16)
        }
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new(SuggestionEngine::default())
    }
}

/// Split `s` into byte ranges of visual lines, wrapping at `width` columns
///
/// Line breaks are not part of any range; an empty logical line yields an
/// empty range.
pub fn visual_lines(s: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut offset = 0;

    for logical in s.split('\n') {
        let mut start = offset;
        let mut line_width = 0;
        for (i, ch) in logical.char_indices() {
            let w = ch.width().unwrap_or(0);
            if line_width + w > width && line_width > 0 {
                lines.push(start..offset + i);
                start = offset + i;
                line_width = 0;
            }
            line_width += w;
        }
        lines.push(start..offset + logical.len());
        offset += logical.len() + 1;
    }

    lines
}

fn prev_boundary(s: &str, at: usize) -> usize {
    s[..at].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_boundary(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(at, |c| at + c.len_utf8())
}

#[cfg(test)]
#[path = "composer_state_tests.rs"]
mod composer_state_tests;
