//! Price worker thread
//!
//! Owns the price cache and serves refresh and balance requests off the UI
//! thread.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

use super::cache::{Clock, PriceCache};
use super::service::{TokenPriceService, ZERO_BALANCE};
use super::types::TokenPrice;

/// Request sent to the price worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceRequest {
    /// Fetch prices, served from the cache while it is fresh
    Refresh { request_id: u64 },
    /// Drop the cached list so the next refresh refetches
    Clear,
    /// Look up what `address` holds of `coin_type`
    Balance { address: String, coin_type: String },
}

/// Result sent back by the price worker
#[derive(Debug, Clone)]
pub enum PriceResponse {
    /// Price list for a refresh request
    Prices {
        entries: Arc<Vec<TokenPrice>>,
        request_id: u64,
    },
    /// Raw balance for a balance request, `"0"` when the lookup failed
    Balance { coin_type: String, balance: String },
}

/// Spawn the price worker thread
///
/// The thread exits when the request channel is closed or the response
/// channel's receiver is dropped.
pub fn spawn_price_worker<S, C>(
    cache: PriceCache<S, C>,
    request_rx: Receiver<PriceRequest>,
    response_tx: Sender<PriceResponse>,
) -> std::thread::JoinHandle<()>
where
    S: TokenPriceService,
    C: Clock,
{
    std::thread::spawn(move || {
        worker_loop(cache, request_rx, response_tx);
    })
}

fn worker_loop<S, C>(
    cache: PriceCache<S, C>,
    request_rx: Receiver<PriceRequest>,
    response_tx: Sender<PriceResponse>,
) where
    S: TokenPriceService,
    C: Clock,
{
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => Some(rt),
        Err(e) => {
            log::error!("Failed to build price runtime: {}", e);
            None
        }
    };

    while let Ok(request) = request_rx.recv() {
        let response = match request {
            PriceRequest::Clear => {
                cache.clear_cache();
                continue;
            }
            PriceRequest::Refresh { request_id } => {
                let entries = match &runtime {
                    Some(rt) => rt.block_on(cache.get_prices()),
                    None => cache.cached().unwrap_or_default(),
                };
                PriceResponse::Prices {
                    entries,
                    request_id,
                }
            }
            PriceRequest::Balance { address, coin_type } => {
                let balance = match &runtime {
                    Some(rt) => rt.block_on(cache.get_balance(&address, &coin_type)),
                    None => ZERO_BALANCE.to_string(),
                };
                PriceResponse::Balance { coin_type, balance }
            }
        };

        if response_tx.send(response).is_err() {
            break;
        }
    }

    log::debug!("Price worker thread shutting down");
}
