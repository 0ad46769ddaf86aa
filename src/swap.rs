//! Swap quotes proposed by the assistant

mod swap_render;
mod swap_state;

pub use swap_render::{build_swap_lines, render_swap_popup};
pub use swap_state::{SwapPopup, SwapQuote};
