//! Chat input field
//!
//! A multi-line input that recognises trigger words typed at its end and
//! offers an inline suggestion the user can accept with Tab.

mod composer_events;
mod composer_render;
mod composer_state;

pub use composer_events::ComposerAction;
pub use composer_render::{build_lines, composer_height, render_composer};
pub use composer_state::{
    APPLY_HINT, APPLY_HINT_DURATION, ComposerState, FieldPhase, INPUT_PLACEHOLDER, MAX_ROWS,
    MIN_ROWS, PendingSuggestion, visual_lines,
};
