//! Conversation data types

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;

/// Message shown in the assistant placeholder while a reply is pending
pub const RESPONDING_MESSAGE: &str = "Responding...";

static NEXT_DIALOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique id for a dialog record: creation time plus a process-wide sequence
fn next_dialog_id() -> String {
    let seq = NEXT_DIALOG_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), seq)
}

/// Who wrote a dialog record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSender {
    User,
    Assistant,
}

/// One message in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRecord {
    pub id: String,
    pub sender: DialogSender,
    pub message: String,
    /// Set on the placeholder shown while the assistant is replying
    pub is_being_generated: bool,
    /// Set when the record reports a failed turn instead of a real reply
    pub is_error: bool,
}

impl DialogRecord {
    pub fn new(message: impl Into<String>, sender: DialogSender) -> Self {
        Self {
            id: next_dialog_id(),
            sender,
            message: message.into(),
            is_being_generated: false,
            is_error: false,
        }
    }

    pub fn user(message: impl Into<String>) -> Self {
        Self::new(message, DialogSender::User)
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self::new(message, DialogSender::Assistant)
    }

    /// Assistant record displayed until the real reply arrives
    pub fn assistant_placeholder() -> Self {
        Self {
            is_being_generated: true,
            ..Self::assistant(RESPONDING_MESSAGE)
        }
    }

    /// Assistant record explaining why a turn produced no reply
    pub fn assistant_error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::assistant(message)
        }
    }
}

/// Where the conversation is in its request/reply cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStatus {
    /// Ready for the next message
    #[default]
    Waiting,
    /// A message was sent and no reply has arrived yet
    Responding,
    /// A reply arrived and is about to replace the placeholder
    Done,
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResponseStatus::Waiting => "WAITING",
            ResponseStatus::Responding => "RESPONDING",
            ResponseStatus::Done => "DONE",
        };
        write!(f, "{}", label)
    }
}

/// Reply from the chat backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BotReply {
    pub text: String,
    /// Optional action the assistant wants the client to take, e.g. "swap"
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub params: serde_json::Value,
}

impl BotReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
            params: serde_json::Value::Null,
        }
    }

    /// Swap request carried by a `swap` action, if the params are usable
    pub fn swap_intent(&self) -> Option<SwapIntent> {
        if !self
            .action
            .as_deref()
            .is_some_and(|a| a.eq_ignore_ascii_case("swap"))
        {
            return None;
        }

        let field = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| self.params.get(*name))
                .cloned()
        };
        let from = field(&["from", "fromSymbol", "from_symbol"])?;
        let to = field(&["to", "toSymbol", "to_symbol"])?;
        let amount = field(&["amount"])?;

        let amount = match amount {
            serde_json::Value::Number(n) => n.as_f64()?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };

        Some(SwapIntent {
            from_symbol: from.as_str()?.to_string(),
            to_symbol: to.as_str()?.to_string(),
            amount,
        })
    }
}

/// A token swap the assistant proposed
#[derive(Debug, Clone, PartialEq)]
pub struct SwapIntent {
    pub from_symbol: String,
    pub to_symbol: String,
    pub amount: f64,
}
