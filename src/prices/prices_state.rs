//! UI-side price board state
//!
//! Holds the last price list received from the worker and tracks the refresh
//! in flight. Responses for older refreshes are dropped. Wallet balances are
//! kept per coin type and fetched at most once until the next forced refresh.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

use super::types::TokenPrice;
use super::worker::{PriceRequest, PriceResponse};
use crate::scroll::ScrollState;

pub struct PricesState {
    entries: Arc<Vec<TokenPrice>>,
    loading: bool,
    visible: bool,
    request_id: u64,
    balances: HashMap<String, String>,
    pending_balances: HashSet<String>,
    request_tx: Option<Sender<PriceRequest>>,
    response_rx: Option<Receiver<PriceResponse>>,
    pub scroll: ScrollState,
}

impl PricesState {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            loading: false,
            visible: false,
            request_id: 0,
            balances: HashMap::new(),
            pending_balances: HashSet::new(),
            request_tx: None,
            response_rx: None,
            scroll: ScrollState::new(),
        }
    }

    pub fn set_channels(
        &mut self,
        request_tx: Sender<PriceRequest>,
        response_rx: Receiver<PriceResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn entries(&self) -> &[TokenPrice] {
        &self.entries
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the board and ask for prices
    pub fn open(&mut self) {
        self.visible = true;
        self.scroll.jump_to_top();
        self.refresh();
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Ask the worker for prices; the cache answers while it is fresh
    pub fn refresh(&mut self) -> bool {
        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        let sent = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(PriceRequest::Refresh { request_id }).is_ok());
        self.loading = sent;
        if !sent {
            log::debug!("Price worker unavailable");
        }
        sent
    }

    /// Drop the cached list and known balances, then refetch
    pub fn force_refresh(&mut self) -> bool {
        if let Some(tx) = &self.request_tx {
            let _ = tx.send(PriceRequest::Clear);
        }
        self.balances.clear();
        self.pending_balances.clear();
        self.refresh()
    }

    /// Ask for the wallet's balance of `coin_type` unless it is known or pending
    pub fn request_balance(&mut self, address: &str, coin_type: &str) -> bool {
        if self.balances.contains_key(coin_type) || self.pending_balances.contains(coin_type) {
            return false;
        }
        let sent = self.request_tx.as_ref().is_some_and(|tx| {
            tx.send(PriceRequest::Balance {
                address: address.to_string(),
                coin_type: coin_type.to_string(),
            })
            .is_ok()
        });
        if sent {
            self.pending_balances.insert(coin_type.to_string());
        }
        sent
    }

    /// Raw balance of `coin_type`, once fetched
    pub fn balance(&self, coin_type: &str) -> Option<&str> {
        self.balances.get(coin_type).map(String::as_str)
    }

    /// Apply the response to the latest refresh; returns true if applied
    pub fn poll_responses(&mut self) -> bool {
        let Some(rx) = &self.response_rx else {
            return false;
        };

        let mut applied = false;
        while let Ok(response) = rx.try_recv() {
            match response {
                PriceResponse::Prices {
                    entries,
                    request_id,
                } => {
                    if request_id != self.request_id {
                        log::debug!("Discarding stale price response {}", request_id);
                        continue;
                    }
                    self.entries = entries;
                    self.loading = false;
                    applied = true;
                }
                PriceResponse::Balance { coin_type, balance } => {
                    // Answers to requests dropped by a forced refresh are stale
                    if self.pending_balances.remove(&coin_type) {
                        self.balances.insert(coin_type, balance);
                        applied = true;
                    }
                }
            }
        }
        applied
    }

    /// Case-insensitive lookup by symbol
    pub fn find(&self, symbol: &str) -> Option<&TokenPrice> {
        self.entries
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol.trim()))
    }
}

impl Default for PricesState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn token(symbol: &str) -> TokenPrice {
        TokenPrice {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            logo: String::new(),
            decimals: 9,
            coin_type: format!("0x1::{}::{}", symbol.to_lowercase(), symbol),
            price: 1.0,
            price_change_24h: 0.0,
            balance: None,
        }
    }

    fn connected() -> (
        PricesState,
        mpsc::Receiver<PriceRequest>,
        mpsc::Sender<PriceResponse>,
    ) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        let mut state = PricesState::new();
        state.set_channels(request_tx, response_rx);
        (state, request_rx, response_tx)
    }

    #[test]
    fn test_open_requests_refresh() {
        let (mut state, request_rx, _response_tx) = connected();

        state.open();

        assert!(state.is_visible());
        assert!(state.is_loading());
        assert_eq!(
            request_rx.try_recv().unwrap(),
            PriceRequest::Refresh { request_id: 1 }
        );
    }

    #[test]
    fn test_force_refresh_clears_first() {
        let (mut state, request_rx, _response_tx) = connected();

        state.force_refresh();

        assert_eq!(request_rx.try_recv().unwrap(), PriceRequest::Clear);
        assert!(matches!(
            request_rx.try_recv().unwrap(),
            PriceRequest::Refresh { .. }
        ));
    }

    #[test]
    fn test_latest_response_is_applied() {
        let (mut state, _request_rx, response_tx) = connected();
        state.refresh();
        state.refresh();

        response_tx
            .send(PriceResponse::Prices {
                entries: Arc::new(vec![token("OLD")]),
                request_id: 1,
            })
            .unwrap();
        response_tx
            .send(PriceResponse::Prices {
                entries: Arc::new(vec![token("SUI"), token("NEW")]),
                request_id: 2,
            })
            .unwrap();

        assert!(state.poll_responses());
        assert_eq!(state.entries().len(), 2);
        assert!(!state.is_loading());
        assert!(state.find("new").is_some());
        assert!(state.find("OLD").is_none());
    }

    #[test]
    fn test_balance_requested_once() {
        let (mut state, request_rx, response_tx) = connected();

        assert!(state.request_balance("0xabc", "0x2::sui::SUI"));
        assert!(!state.request_balance("0xabc", "0x2::sui::SUI"));
        assert_eq!(
            request_rx.try_recv().unwrap(),
            PriceRequest::Balance {
                address: "0xabc".to_string(),
                coin_type: "0x2::sui::SUI".to_string(),
            }
        );
        assert!(request_rx.try_recv().is_err());
        assert_eq!(state.balance("0x2::sui::SUI"), None);

        response_tx
            .send(PriceResponse::Balance {
                coin_type: "0x2::sui::SUI".to_string(),
                balance: "2500000000".to_string(),
            })
            .unwrap();

        assert!(state.poll_responses());
        assert_eq!(state.balance("0x2::sui::SUI"), Some("2500000000"));
        assert!(!state.request_balance("0xabc", "0x2::sui::SUI"));
    }

    #[test]
    fn test_force_refresh_forgets_balances() {
        let (mut state, request_rx, response_tx) = connected();
        state.request_balance("0xabc", "0x2::sui::SUI");
        state.force_refresh();

        // Answer to the request made before the forced refresh
        response_tx
            .send(PriceResponse::Balance {
                coin_type: "0x2::sui::SUI".to_string(),
                balance: "1".to_string(),
            })
            .unwrap();
        state.poll_responses();

        assert_eq!(state.balance("0x2::sui::SUI"), None);
        while request_rx.try_recv().is_ok() {}
        assert!(state.request_balance("0xabc", "0x2::sui::SUI"));
    }

    #[test]
    fn test_refresh_without_worker() {
        let mut state = PricesState::new();
        assert!(!state.refresh());
        assert!(!state.is_loading());
        assert!(!state.poll_responses());
        assert!(!state.request_balance("0xabc", "0x2::sui::SUI"));
    }
}
