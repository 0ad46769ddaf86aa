//! Conversation submit flow
//!
//! Turns a submitted message into dialog records, hands it to the chat
//! worker, and reconciles the "Responding..." placeholder with whatever comes
//! back. Only the response for the latest request is ever applied.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::store::ConversationStore;
use super::types::{DialogRecord, ResponseStatus, SwapIntent};
use super::worker::{ChatRequest, ChatResponse};

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Records were added and the request dispatched with this id
    Sent(u64),
    /// Records were added but the worker is unavailable; the turn already failed
    Failed,
    /// A previous turn is still in progress
    Rejected,
    /// Nothing but whitespace was submitted
    Empty,
}

/// Request currently waiting for a response
#[derive(Debug)]
struct InFlight {
    request_id: u64,
    cancel: CancellationToken,
}

/// Reply waiting out the smoothing delay before it replaces the placeholder
#[derive(Debug)]
struct PendingReply {
    due: Instant,
    dialog: DialogRecord,
}

/// Conversation state and the channel handles to the chat worker
pub struct ConversationState {
    pub store: ConversationStore,
    request_tx: Option<Sender<ChatRequest>>,
    response_rx: Option<Receiver<ChatResponse>>,
    /// Incremented for every request; used to filter stale responses
    request_id: u64,
    in_flight: Option<InFlight>,
    pending_reply: Option<PendingReply>,
    reply_delay: Duration,
    swap_intent: Option<SwapIntent>,
}

impl ConversationState {
    pub fn new(reply_delay: Duration) -> Self {
        Self {
            store: ConversationStore::new(),
            request_tx: None,
            response_rx: None,
            request_id: 0,
            in_flight: None,
            pending_reply: None,
            reply_delay,
            swap_intent: None,
        }
    }

    /// Set the channel handles for communication with the worker thread
    pub fn set_channels(
        &mut self,
        request_tx: Sender<ChatRequest>,
        response_rx: Receiver<ChatResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn status(&self) -> ResponseStatus {
        self.store.status()
    }

    /// Whether a turn is in progress and new submits would be rejected
    pub fn is_busy(&self) -> bool {
        self.store.status() != ResponseStatus::Waiting
    }

    pub fn current_request_id(&self) -> u64 {
        self.request_id
    }

    pub fn has_in_flight_request(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Swap proposed by the most recent reply, if any
    pub fn take_swap_intent(&mut self) -> Option<SwapIntent> {
        self.swap_intent.take()
    }

    /// Submit a user message
    ///
    /// Appends the user record and the assistant placeholder as one batch,
    /// flips the status to RESPONDING, then dispatches the message.
    pub fn submit(&mut self, raw_content: &str) -> SubmitOutcome {
        if raw_content.trim().is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.is_busy() {
            log::debug!("Submit rejected: status is {}", self.store.status());
            return SubmitOutcome::Rejected;
        }

        let user_dialog = DialogRecord::user(raw_content);
        let message = user_dialog.message.clone();
        self.store
            .add_dialogs([user_dialog, DialogRecord::assistant_placeholder()]);
        self.store.set_response_status(ResponseStatus::Responding);

        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let cancel = CancellationToken::new();

        let sent = self.request_tx.as_ref().is_some_and(|tx| {
            tx.send(ChatRequest {
                message,
                request_id,
                cancel: cancel.clone(),
            })
            .is_ok()
        });

        if !sent {
            log::warn!("Chat worker unavailable for request {}", request_id);
            self.fail_turn("The assistant is not available right now.".to_string());
            return SubmitOutcome::Failed;
        }

        self.in_flight = Some(InFlight { request_id, cancel });
        SubmitOutcome::Sent(request_id)
    }

    /// Ask the worker to abandon the in-flight request
    ///
    /// The worker answers with `Cancelled`, which is applied like any other
    /// response. Returns false if nothing was in flight.
    pub fn cancel_in_flight_request(&mut self) -> bool {
        match &self.in_flight {
            Some(in_flight) => {
                in_flight.cancel.cancel();
                log::debug!("Cancelled request {}", in_flight.request_id);
                true
            }
            None => false,
        }
    }

    /// Drain worker responses; returns true if the conversation changed
    pub fn poll_responses(&mut self, now: Instant) -> bool {
        let mut responses = Vec::new();
        if let Some(rx) = &self.response_rx {
            while let Ok(response) = rx.try_recv() {
                responses.push(response);
            }
        }

        let mut changed = false;
        for response in responses {
            changed |= self.apply_response(response, now);
        }
        changed
    }

    /// Apply one worker response if it belongs to the in-flight request
    pub fn apply_response(&mut self, response: ChatResponse, now: Instant) -> bool {
        let request_id = response.request_id();
        if self.in_flight.as_ref().map(|f| f.request_id) != Some(request_id) {
            log::debug!(
                "Discarding stale response for request {} (current: {})",
                request_id,
                self.request_id
            );
            return false;
        }
        self.in_flight = None;

        match response {
            ChatResponse::Reply { reply, .. } => {
                self.swap_intent = reply.swap_intent();
                self.store.set_response_status(ResponseStatus::Done);
                self.pending_reply = Some(PendingReply {
                    due: now + self.reply_delay,
                    dialog: DialogRecord::assistant(reply.text),
                });
            }
            ChatResponse::NoReply { .. } => {
                self.fail_turn("The assistant did not send a reply.".to_string());
            }
            ChatResponse::Failed { error, .. } => {
                self.fail_turn(format!("Sorry, something went wrong: {}", error));
            }
            ChatResponse::Cancelled { .. } => {
                self.fail_turn("Request cancelled.".to_string());
            }
        }
        true
    }

    /// Swap the placeholder for the real reply once its delay has passed
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.pending_reply.as_ref().is_some_and(|p| now >= p.due) {
            return false;
        }
        let Some(pending) = self.pending_reply.take() else {
            return false;
        };

        self.store.set_response_status(ResponseStatus::Waiting);
        self.store.remove_last_dialog();
        self.store.add_dialog(pending.dialog);
        true
    }

    /// End the turn with an error record in place of the placeholder
    fn fail_turn(&mut self, message: String) {
        self.store.set_response_status(ResponseStatus::Waiting);
        if self
            .store
            .last_dialog()
            .is_some_and(|d| d.is_being_generated)
        {
            self.store.remove_last_dialog();
        }
        self.store.add_dialog(DialogRecord::assistant_error(message));
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

#[cfg(test)]
#[path = "conversation_state_tests.rs"]
mod conversation_state_tests;
