//! Chat worker thread
//!
//! Handles chat requests in a background thread so the UI never blocks.
//! Receives requests via channel, asks the backend on a tokio runtime, and
//! sends the outcome back tagged with the request id it belongs to.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::backend::{ChatBackend, ChatError};
use super::types::BotReply;

/// Request sent to the chat worker
#[derive(Debug)]
pub struct ChatRequest {
    pub message: String,
    /// Unique id for this request, used to filter stale responses
    pub request_id: u64,
    /// Cancelled by the UI to abandon the request
    pub cancel: CancellationToken,
}

/// Outcome of a chat request
#[derive(Debug)]
pub enum ChatResponse {
    /// The backend replied
    Reply { reply: BotReply, request_id: u64 },
    /// The backend answered with nothing
    NoReply { request_id: u64 },
    /// The request failed or timed out
    Failed { error: String, request_id: u64 },
    /// The request was cancelled before a reply arrived
    Cancelled { request_id: u64 },
}

impl ChatResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            ChatResponse::Reply { request_id, .. }
            | ChatResponse::NoReply { request_id }
            | ChatResponse::Failed { request_id, .. }
            | ChatResponse::Cancelled { request_id } => *request_id,
        }
    }
}

/// Spawn the chat worker thread
///
/// The thread exits when the request channel is closed or the response
/// channel's receiver is dropped.
pub fn spawn_worker<B: ChatBackend>(
    backend: B,
    timeout: Duration,
    request_rx: Receiver<ChatRequest>,
    response_tx: Sender<ChatResponse>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        worker_loop(backend, timeout, request_rx, response_tx);
    })
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop<B: ChatBackend>(
    backend: B,
    timeout: Duration,
    request_rx: Receiver<ChatRequest>,
    response_tx: Sender<ChatResponse>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => Some(rt),
        Err(e) => {
            // Keep serving so every request still gets a Failed answer
            log::error!("Failed to build chat runtime: {}", e);
            None
        }
    };

    while let Ok(request) = request_rx.recv() {
        let ChatRequest {
            message,
            request_id,
            cancel,
        } = request;

        let response = match &runtime {
            Some(rt) => rt.block_on(ask_with_timeout(
                &backend, &message, request_id, timeout, cancel,
            )),
            None => ChatResponse::Failed {
                error: "Chat runtime unavailable".to_string(),
                request_id,
            },
        };

        if response_tx.send(response).is_err() {
            // UI side disconnected
            break;
        }
    }

    log::debug!("Chat worker thread shutting down");
}

/// Ask the backend once, bounded by `timeout` and racing `cancel`
pub async fn ask_with_timeout<B: ChatBackend>(
    backend: &B,
    message: &str,
    request_id: u64,
    timeout: Duration,
    cancel: CancellationToken,
) -> ChatResponse {
    if cancel.is_cancelled() {
        return ChatResponse::Cancelled { request_id };
    }

    log::debug!("Sending chat request {}", request_id);

    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            log::debug!("Cancelled chat request {}", request_id);
            ChatResponse::Cancelled { request_id }
        }
        result = tokio::time::timeout(timeout, backend.ask_bot(message)) => match result {
            Ok(Ok(Some(reply))) => ChatResponse::Reply { reply, request_id },
            Ok(Ok(None)) => ChatResponse::NoReply { request_id },
            Ok(Err(e)) => {
                log::warn!("Chat request {} failed: {}", request_id, e);
                ChatResponse::Failed { error: e.to_string(), request_id }
            }
            Err(_) => {
                let e = ChatError::Timeout(timeout.as_secs());
                log::warn!("Chat request {} timed out", request_id);
                ChatResponse::Failed { error: e.to_string(), request_id }
            }
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
