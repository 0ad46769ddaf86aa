//! Vertical scroll position for the dialog pane
//!
//! Follows the newest message while pinned to the bottom; scrolling up
//! unpins it until the user returns to the end.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: u16,
    pub max_offset: u16,
    pub viewport_height: u16,
    /// Keep the offset at `max_offset` as content grows
    pub stick_to_bottom: bool,
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            viewport_height: 0,
            stick_to_bottom: true,
        }
    }

    pub fn update_bounds(&mut self, content_lines: usize, viewport_height: u16) {
        self.viewport_height = viewport_height;

        // Clamp to u16::MAX for ratatui compatibility
        self.max_offset = content_lines
            .saturating_sub(viewport_height as usize)
            .min(u16::MAX as usize) as u16;

        if self.stick_to_bottom {
            self.offset = self.max_offset;
        } else {
            self.offset = self.offset.min(self.max_offset);
        }
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
        self.stick_to_bottom = self.offset == self.max_offset;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.stick_to_bottom = self.offset == self.max_offset;
    }

    pub fn page_down(&mut self) {
        let half_page = (self.viewport_height / 2).max(1);
        self.scroll_down(half_page);
    }

    pub fn page_up(&mut self) {
        let half_page = (self.viewport_height / 2).max(1);
        self.scroll_up(half_page);
    }

    pub fn jump_to_top(&mut self) {
        self.offset = 0;
        self.stick_to_bottom = self.max_offset == 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.offset = self.max_offset;
        self.stick_to_bottom = true;
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}
