//! Swap quote math

use crate::conversation::SwapIntent;
use crate::prices::TokenPrice;

/// Priced view of a proposed swap
#[derive(Debug, Clone, PartialEq)]
pub struct SwapQuote {
    pub from_symbol: String,
    pub to_symbol: String,
    pub amount: f64,
    pub from_price: Option<f64>,
    pub to_price: Option<f64>,
}

fn find_price(prices: &[TokenPrice], symbol: &str) -> Option<f64> {
    prices
        .iter()
        .find(|t| t.symbol.to_lowercase() == symbol.to_lowercase())
        .map(|t| t.price)
        .filter(|p| *p > 0.0 && p.is_finite())
}

impl SwapQuote {
    /// Look both symbols up case-insensitively; missing or zero prices stay `None`
    pub fn build(
        prices: &[TokenPrice],
        from_symbol: &str,
        to_symbol: &str,
        amount: f64,
    ) -> Self {
        Self {
            from_symbol: from_symbol.to_string(),
            to_symbol: to_symbol.to_string(),
            amount,
            from_price: find_price(prices, from_symbol),
            to_price: find_price(prices, to_symbol),
        }
    }

    pub fn from_intent(prices: &[TokenPrice], intent: &SwapIntent) -> Self {
        Self::build(prices, &intent.from_symbol, &intent.to_symbol, intent.amount)
    }

    pub fn is_priced(&self) -> bool {
        self.from_price.is_some() && self.to_price.is_some()
    }

    /// Units of `to` received for one unit of `from`
    pub fn rate(&self) -> Option<f64> {
        Some(self.from_price? / self.to_price?)
    }

    pub fn output_amount(&self) -> Option<f64> {
        Some(self.amount * self.rate()?)
    }

    /// USD value of the input, two decimals
    pub fn usd_value(&self) -> String {
        match self.from_price {
            Some(price) => format!("{:.2}", self.amount * price),
            None => "0".to_string(),
        }
    }

    /// Six decimals, "0" when either side is unpriced
    pub fn exchange_rate(&self) -> String {
        self.rate()
            .map_or_else(|| "0".to_string(), |rate| format!("{:.6}", rate))
    }

    pub fn estimated_output(&self) -> String {
        self.output_amount()
            .map_or_else(|| "0".to_string(), |out| format!("{:.6}", out))
    }

    pub fn estimated_output_usd(&self) -> String {
        match (self.output_amount(), self.to_price) {
            (Some(out), Some(price)) => format!("{:.2}", out * price),
            _ => "0".to_string(),
        }
    }
}

/// Swap popup opened from an assistant reply
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPopup {
    pub intent: SwapIntent,
}

impl SwapPopup {
    pub fn new(intent: SwapIntent) -> Self {
        Self { intent }
    }

    pub fn quote(&self, prices: &[TokenPrice]) -> SwapQuote {
        SwapQuote::from_intent(prices, &self.intent)
    }
}
