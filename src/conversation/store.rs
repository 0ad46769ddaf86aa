//! Conversation store
//!
//! Ordered dialog list plus the response status. Every mutation bumps a
//! revision counter so views can tell when to re-layout.

use super::types::{DialogRecord, ResponseStatus};

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    dialogs: Vec<DialogRecord>,
    status: ResponseStatus,
    revision: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> &[DialogRecord] {
        &self.dialogs
    }

    pub fn status(&self) -> ResponseStatus {
        self.status
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn last_dialog(&self) -> Option<&DialogRecord> {
        self.dialogs.last()
    }

    pub fn add_dialog(&mut self, dialog: DialogRecord) {
        self.dialogs.push(dialog);
        self.bump();
    }

    /// Append several records as one change
    pub fn add_dialogs(&mut self, dialogs: impl IntoIterator<Item = DialogRecord>) {
        self.dialogs.extend(dialogs);
        self.bump();
    }

    pub fn remove_last_dialog(&mut self) -> Option<DialogRecord> {
        let removed = self.dialogs.pop();
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    pub fn set_response_status(&mut self, status: ResponseStatus) {
        if self.status != status {
            log::debug!("Conversation status {} -> {}", self.status, status);
            self.status = status;
            self.bump();
        }
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
