//! Price list cache
//!
//! A single slot holding the last aggregated price list and when it was
//! fetched. Within the TTL the slot is served without touching the network;
//! after it, the next call refetches. Fetch failures fall back to whatever
//! the slot holds, or an empty list.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use futures::future::{join_all, try_join};

use super::service::{PriceError, TokenPriceService};
use super::types::{MSEND, SUI, TokenPrice, WellKnownToken};

/// Injectable time source
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Contents of the cache slot
#[derive(Debug, Clone)]
pub struct CachedPriceList {
    pub entries: Arc<Vec<TokenPrice>>,
    pub fetched_at: Instant,
}

pub struct PriceCache<S, C = SystemClock> {
    service: S,
    clock: C,
    ttl: Duration,
    slot: Mutex<Option<CachedPriceList>>,
}

impl<S: TokenPriceService> PriceCache<S, SystemClock> {
    pub fn new(service: S, ttl: Duration) -> Self {
        Self::with_clock(service, SystemClock, ttl)
    }
}

impl<S: TokenPriceService, C: Clock> PriceCache<S, C> {
    pub fn with_clock(service: S, clock: C, ttl: Duration) -> Self {
        Self {
            service,
            clock,
            ttl,
            slot: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Current price list
    ///
    /// Never fails: on a fetch error the previous list is returned if there
    /// is one, otherwise an empty list.
    pub async fn get_prices(&self) -> Arc<Vec<TokenPrice>> {
        let now = self.clock.now();
        let fresh = self
            .lock_slot()
            .as_ref()
            .filter(|cached| now.saturating_duration_since(cached.fetched_at) < self.ttl)
            .map(|cached| Arc::clone(&cached.entries));
        if let Some(entries) = fresh {
            return entries;
        }

        match self.fetch_all().await {
            Ok(entries) => {
                log::debug!("Fetched {} token prices", entries.len());
                let entries = Arc::new(entries);
                *self.lock_slot() = Some(CachedPriceList {
                    entries: Arc::clone(&entries),
                    fetched_at: now,
                });
                entries
            }
            Err(e) => {
                log::warn!("Error fetching token prices: {}", e);
                self.cached().unwrap_or_default()
            }
        }
    }

    /// Entries in the slot regardless of age
    pub fn cached(&self) -> Option<Arc<Vec<TokenPrice>>> {
        self.lock_slot()
            .as_ref()
            .map(|cached| Arc::clone(&cached.entries))
    }

    /// Wallet balance lookup; balances are never cached
    pub async fn get_balance(&self, address: &str, coin_type: &str) -> String {
        self.service.get_balance(address, coin_type).await
    }

    /// Empty the slot so the next `get_prices` refetches
    pub fn clear_cache(&self) {
        *self.lock_slot() = None;
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<CachedPriceList>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn fetch_well_known(&self, token: &WellKnownToken) -> Result<TokenPrice, PriceError> {
        let quote = self.service.get_price(token.coin_type).await?;
        Ok(TokenPrice::well_known(token, quote))
    }

    /// Well-known tokens first, then every other listed token sorted by symbol
    async fn fetch_all(&self) -> Result<Vec<TokenPrice>, PriceError> {
        let (sui, msend) =
            try_join(self.fetch_well_known(&SUI), self.fetch_well_known(&MSEND)).await?;
        let listed = self.service.list_tokens().await?;

        let mut seen: HashSet<String> =
            HashSet::from([sui.coin_type.clone(), msend.coin_type.clone()]);
        let unique: Vec<_> = listed
            .into_iter()
            .filter(|info| seen.insert(info.coin_type.clone()))
            .collect();

        let lookups = unique.iter().map(|info| async move {
            match self.service.get_price(&info.coin_type).await {
                Ok(quote) => Some(TokenPrice::from_listing(info, &quote)),
                Err(e) => {
                    log::debug!("Skipping {}: {}", info.symbol, e);
                    None
                }
            }
        });
        let mut priced: Vec<TokenPrice> = join_all(lookups).await.into_iter().flatten().collect();
        priced.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let mut entries = Vec::with_capacity(priced.len() + 2);
        entries.push(sui);
        entries.push(msend);
        entries.extend(priced);
        Ok(entries)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
