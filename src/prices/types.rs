//! Token price data types

use serde::{Deserialize, Deserializer};

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
pub const MSEND_COIN_TYPE: &str = "0xda097d57ae887fbd002fb5847dd0ab47ae7e1b183fd36832a51182c52257e1bc::msend_series_1::MSEND_SERIES_1";

/// Token that is always listed first, looked up by coin type directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnownToken {
    pub symbol: &'static str,
    pub name: &'static str,
    pub logo: &'static str,
    pub coin_type: &'static str,
}

pub const SUI: WellKnownToken = WellKnownToken {
    symbol: "SUI",
    name: "Sui",
    logo: "/tokens/Sui.png",
    coin_type: SUI_COIN_TYPE,
};

pub const MSEND: WellKnownToken = WellKnownToken {
    symbol: "mSEND",
    name: "mSend",
    logo: "/tokens/mSend.png",
    coin_type: MSEND_COIN_TYPE,
};

/// Entry of the verified coin listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenInfo {
    pub coin_type: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub decimals: u8,
}

/// Per-token price lookup result
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceQuote {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default, rename = "priceChange24h")]
    pub price_change_24h: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub balance: Option<String>,
    #[serde(default)]
    pub decimals: u8,
}

/// Accepts `"12"`, `12`, or `null`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A token with its current price, as shown in the price board
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPrice {
    pub symbol: String,
    pub name: String,
    pub logo: String,
    pub decimals: u8,
    /// Unique key of the token on chain
    pub coin_type: String,
    pub price: f64,
    pub price_change_24h: f64,
    pub balance: Option<String>,
}

impl TokenPrice {
    /// Price entry for a listed token; the symbol is uppercased
    pub fn from_listing(info: &TokenInfo, quote: &PriceQuote) -> Self {
        Self {
            symbol: info.symbol.to_uppercase(),
            name: info.name.clone(),
            logo: info.logo_url.clone(),
            decimals: info.decimals,
            coin_type: info.coin_type.clone(),
            price: quote.value.unwrap_or(0.0),
            price_change_24h: quote.price_change_24h.unwrap_or(0.0),
            balance: None,
        }
    }

    pub fn well_known(token: &WellKnownToken, quote: PriceQuote) -> Self {
        Self {
            symbol: token.symbol.to_string(),
            name: token.name.to_string(),
            logo: token.logo.to_string(),
            decimals: quote.decimals,
            coin_type: token.coin_type.to_string(),
            price: quote.value.unwrap_or(0.0),
            price_change_24h: quote.price_change_24h.unwrap_or(0.0),
            balance: quote.balance,
        }
    }
}
