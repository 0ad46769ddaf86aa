//! Token prices
//!
//! Aggregates per-token price lookups into one list, cached for a fixed TTL,
//! and serves it to the UI through a background worker.

mod cache;
mod prices_render;
mod prices_state;
mod service;
mod types;
mod worker;

pub use cache::{CachedPriceList, Clock, PriceCache, SystemClock};
pub use prices_render::{build_price_lines, format_change, format_price, render_price_popup};
pub use prices_state::PricesState;
pub use service::{
    HttpPriceService, PriceError, TokenPriceService, ZERO_BALANCE, parse_balance, parse_price,
    parse_token_list,
};
pub use types::{
    MSEND, MSEND_COIN_TYPE, PriceQuote, SUI, SUI_COIN_TYPE, TokenInfo, TokenPrice, WellKnownToken,
};
pub use worker::{PriceRequest, PriceResponse, spawn_price_worker};
