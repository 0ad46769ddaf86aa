use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::composer::ComposerState;
use crate::config::Config;
use crate::conversation::{
    ChatBackend, ConversationState, HttpChatBackend, SubmitOutcome, spawn_worker,
};
use crate::error::FlyfishError;
use crate::prices::{
    Clock, HttpPriceService, PriceCache, PricesState, TokenPriceService, spawn_price_worker,
};
use crate::scroll::ScrollState;
use crate::suggestion::SuggestionEngine;
use crate::swap::SwapPopup;
use crate::wallet::WalletContext;

/// Which pane has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Dialogs,
}

/// Application state
pub struct App {
    pub composer: ComposerState,
    pub conversation: ConversationState,
    pub prices: PricesState,
    pub wallet: WalletContext,
    pub focus: Focus,
    pub dialog_scroll: ScrollState,
    pub swap_popup: Option<SwapPopup>,
    pub should_quit: bool,
}

impl App {
    /// Create the app without background workers
    pub fn new(config: &Config) -> Self {
        let wallet = WalletContext::new(config.wallet.address.clone());

        let mut composer = ComposerState::new(SuggestionEngine::default());
        composer.set_context(wallet.suggestion_context());
        composer.mount();
        composer.focus();

        Self {
            composer,
            conversation: ConversationState::new(config.chat.reply_delay()),
            prices: PricesState::new(),
            wallet,
            focus: Focus::Input,
            dialog_scroll: ScrollState::new(),
            swap_popup: None,
            should_quit: false,
        }
    }

    /// Spawn the HTTP-backed chat and price workers
    pub fn start_workers(&mut self, config: &Config) -> Result<(), FlyfishError> {
        let service = HttpPriceService::new(
            &config.prices.price_url,
            &config.prices.coins_url,
            &config.prices.balance_url,
        )
        .map_err(|e| FlyfishError::Worker(e.to_string()))?;
        self.connect_prices(PriceCache::new(service, config.prices.ttl()));

        let backend = HttpChatBackend::new(&config.chat.endpoint)
            .map_err(|e| FlyfishError::Worker(e.to_string()))?;
        log::debug!("Chat backend at {}", backend.endpoint());
        self.connect_chat(backend, config.chat.timeout());
        Ok(())
    }

    /// Spawn a chat worker for `backend` and wire it to the conversation
    pub fn connect_chat<B: ChatBackend>(&mut self, backend: B, timeout: Duration) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_worker(backend, timeout, request_rx, response_tx);
        self.conversation.set_channels(request_tx, response_rx);
    }

    /// Spawn a price worker owning `cache` and wire it to the price board
    pub fn connect_prices<S: TokenPriceService, C: Clock>(&mut self, cache: PriceCache<S, C>) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        spawn_price_worker(cache, request_rx, response_tx);
        self.prices.set_channels(request_tx, response_rx);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The input pane refuses edits while a turn is in progress
    pub fn input_read_only(&self) -> bool {
        self.conversation.is_busy()
    }

    /// Send the composer's content as a new turn
    pub fn submit(&mut self, content: &str) -> SubmitOutcome {
        let outcome = self.conversation.submit(content);
        if outcome != SubmitOutcome::Rejected {
            self.dialog_scroll.jump_to_bottom();
        }
        outcome
    }

    /// Advance background work; returns true if anything visible changed
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.conversation.poll_responses(now);
        changed |= self.conversation.tick(now);
        changed |= self.prices.poll_responses();

        if let Some(intent) = self.conversation.take_swap_intent() {
            log::debug!(
                "Opening swap {} {} -> {}",
                intent.amount,
                intent.from_symbol,
                intent.to_symbol
            );
            self.swap_popup = Some(SwapPopup::new(intent));
            self.prices.refresh();
            changed = true;
        }

        self.request_swap_balance();

        // Input comes back once the turn is over
        if self.focus == Focus::Input
            && !self.input_read_only()
            && !self.composer.is_focused()
        {
            self.composer.focus();
            changed = true;
        }

        changed
    }

    /// Once the input token is priced, look up how much of it the wallet holds
    fn request_swap_balance(&mut self) {
        let (Some(swap), Some(address)) = (&self.swap_popup, self.wallet.address()) else {
            return;
        };
        let Some(coin_type) = self
            .prices
            .find(&swap.intent.from_symbol)
            .map(|token| token.coin_type.clone())
        else {
            return;
        };
        self.prices.request_balance(address, &coin_type);
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
