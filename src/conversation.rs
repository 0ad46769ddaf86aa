//! Conversation with the chat assistant
//!
//! Dialog records, the submit/reply cycle, and the background worker that
//! talks to the chat backend.

mod backend;
mod conversation_render;
mod conversation_state;
mod store;
mod types;
mod worker;

pub use backend::{ChatBackend, ChatError, HttpChatBackend, parse_reply};
pub use conversation_render::{
    ASSISTANT_LABEL, USER_LABEL, build_dialog_lines, render_conversation,
};
pub use conversation_state::{ConversationState, SubmitOutcome};
pub use store::ConversationStore;
pub use types::{
    BotReply, DialogRecord, DialogSender, RESPONDING_MESSAGE, ResponseStatus, SwapIntent,
};
pub use worker::{ChatRequest, ChatResponse, ask_with_timeout, spawn_worker};
