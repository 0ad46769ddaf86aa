//! Token price service client
//!
//! Per-token price lookups, the verified coin listing and wallet balances.
//! Every endpoint wraps its payload in `{"data": ...}`.

use std::future::Future;

use thiserror::Error;

use serde::Deserialize;

use super::types::{PriceQuote, TokenInfo};

/// Balance reported when the lookup fails or the wallet holds none
pub const ZERO_BALANCE: &str = "0";

/// Errors that can occur while fetching prices
#[derive(Debug, Error)]
pub enum PriceError {
    /// Network error during the request
    #[error("Network error: {0}")]
    Network(String),

    /// Service returned an error status
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Body parsed but carried no data for the request
    #[error("No price data for {0}")]
    MissingData(String),
}

/// Source of token prices
pub trait TokenPriceService: Send + Sync + 'static {
    fn get_price(
        &self,
        coin_type: &str,
    ) -> impl Future<Output = Result<PriceQuote, PriceError>> + Send;

    fn list_tokens(&self) -> impl Future<Output = Result<Vec<TokenInfo>, PriceError>> + Send;

    /// Raw on-chain balance of `coin_type` held by `address`
    ///
    /// Never fails: any error reads as [`ZERO_BALANCE`].
    fn get_balance(&self, address: &str, coin_type: &str) -> impl Future<Output = String> + Send;
}

/// HTTP price service
#[derive(Debug, Clone)]
pub struct HttpPriceService {
    client: reqwest::Client,
    price_url: String,
    coins_url: String,
    balance_url: String,
}

impl HttpPriceService {
    pub fn new(
        price_url: impl Into<String>,
        coins_url: impl Into<String>,
        balance_url: impl Into<String>,
    ) -> Result<Self, PriceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PriceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            price_url: price_url.into(),
            coins_url: coins_url.into(),
            balance_url: balance_url.into(),
        })
    }

    async fn get_body(&self, url: &str, query: &[(&str, &str)]) -> Result<String, PriceError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PriceError::Api {
                code: status.as_u16(),
                message,
            });
        }

        response
            .text()
            .await
            .map_err(|e| PriceError::Network(e.to_string()))
    }
}

impl TokenPriceService for HttpPriceService {
    async fn get_price(&self, coin_type: &str) -> Result<PriceQuote, PriceError> {
        let body = self
            .get_body(&self.price_url, &[("address", coin_type)])
            .await?;
        parse_price(&body, coin_type)
    }

    async fn list_tokens(&self) -> Result<Vec<TokenInfo>, PriceError> {
        let body = self
            .get_body(&self.coins_url, &[("is_verified_coin", "true")])
            .await?;
        parse_token_list(&body)
    }

    async fn get_balance(&self, address: &str, coin_type: &str) -> String {
        match self.get_body(&self.balance_url, &[("address", address)]).await {
            Ok(body) => parse_balance(&body, coin_type),
            Err(e) => {
                log::warn!("Error fetching token balance: {}", e);
                ZERO_BALANCE.to_string()
            }
        }
    }
}

fn data_field(body: &str) -> Result<serde_json::Value, PriceError> {
    let mut value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| PriceError::Parse(e.to_string()))?;
    Ok(value
        .get_mut("data")
        .map(serde_json::Value::take)
        .unwrap_or(serde_json::Value::Null))
}

/// Parse `{"data": {"value": ..., "priceChange24h": ..., ...}}`
pub fn parse_price(body: &str, coin_type: &str) -> Result<PriceQuote, PriceError> {
    let data = data_field(body)?;
    if data.is_null() {
        return Err(PriceError::MissingData(coin_type.to_string()));
    }
    serde_json::from_value(data).map_err(|e| PriceError::Parse(e.to_string()))
}

/// Parse `{"data": {"list": [...]}}`
pub fn parse_token_list(body: &str) -> Result<Vec<TokenInfo>, PriceError> {
    let mut data = data_field(body)?;
    let list = data
        .get_mut("list")
        .map(serde_json::Value::take)
        .ok_or_else(|| PriceError::MissingData("coin list".to_string()))?;
    serde_json::from_value(list).map_err(|e| PriceError::Parse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct BalanceList {
    #[serde(default)]
    status: bool,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct BalanceEntry {
    coin_type: String,
    #[serde(default)]
    balance: serde_json::Value,
}

/// Pick `coin_type` out of `{"data": {"status": true, "data": [...]}}`
///
/// A `status: false` body, a missing entry or an empty balance all read as
/// [`ZERO_BALANCE`].
pub fn parse_balance(body: &str, coin_type: &str) -> String {
    let list = match data_field(body).and_then(|data| {
        serde_json::from_value::<BalanceList>(data).map_err(|e| PriceError::Parse(e.to_string()))
    }) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("Error parsing token balance: {}", e);
            return ZERO_BALANCE.to_string();
        }
    };

    if !list.status {
        log::warn!("Balance service refused the request: {}", list.data);
        return ZERO_BALANCE.to_string();
    }

    let entries: Vec<BalanceEntry> = serde_json::from_value(list.data).unwrap_or_default();
    entries
        .into_iter()
        .find(|entry| entry.coin_type == coin_type)
        .and_then(|entry| match entry.balance {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| ZERO_BALANCE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        let quote = parse_price(
            r#"{"data": {"value": 3.5, "priceChange24h": 2.0, "decimals": 9}}"#,
            "0x2::sui::SUI",
        )
        .unwrap();
        assert_eq!(quote.value, Some(3.5));
        assert_eq!(quote.price_change_24h, Some(2.0));
        assert_eq!(quote.decimals, 9);
    }

    #[test]
    fn test_parse_price_null_data() {
        let err = parse_price(r#"{"data": null}"#, "0x2::sui::SUI").unwrap_err();
        assert!(matches!(err, PriceError::MissingData(ref c) if c == "0x2::sui::SUI"));
    }

    #[test]
    fn test_parse_price_invalid_json() {
        let err = parse_price("not json", "x").unwrap_err();
        assert!(matches!(err, PriceError::Parse(_)));
    }

    #[test]
    fn test_parse_token_list() {
        let body = r#"{"data": {"list": [
            {"coin_type": "0x1::a::A", "symbol": "a", "name": "A", "logo_url": "a.png", "decimals": 6},
            {"coin_type": "0x1::b::B", "symbol": "b"}
        ]}}"#;

        let tokens = parse_token_list(body).unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].logo_url, "a.png");
        assert_eq!(tokens[1].name, "");
        assert_eq!(tokens[1].decimals, 0);
    }

    #[test]
    fn test_parse_token_list_missing_list() {
        let err = parse_token_list(r#"{"data": {}}"#).unwrap_err();
        assert!(matches!(err, PriceError::MissingData(_)));
    }

    #[test]
    fn test_parse_balance_finds_coin() {
        let body = r#"{"data": {"status": true, "data": [
            {"coin_type": "0x1::a::A", "balance": "15"},
            {"coin_type": "0x2::sui::SUI", "balance": "2500000000"}
        ]}}"#;
        assert_eq!(parse_balance(body, "0x2::sui::SUI"), "2500000000");
    }

    #[test]
    fn test_parse_balance_numeric_balance() {
        let body = r#"{"data": {"status": true, "data": [
            {"coin_type": "0x2::sui::SUI", "balance": 42}
        ]}}"#;
        assert_eq!(parse_balance(body, "0x2::sui::SUI"), "42");
    }

    #[test]
    fn test_parse_balance_status_false() {
        let body = r#"{"data": {"status": false, "data": "address not found"}}"#;
        assert_eq!(parse_balance(body, "0x2::sui::SUI"), ZERO_BALANCE);
    }

    #[test]
    fn test_parse_balance_missing_entry() {
        let body = r#"{"data": {"status": true, "data": [
            {"coin_type": "0x1::a::A", "balance": "15"}
        ]}}"#;
        assert_eq!(parse_balance(body, "0x2::sui::SUI"), ZERO_BALANCE);
    }

    #[test]
    fn test_parse_balance_invalid_json() {
        assert_eq!(parse_balance("<html>", "0x2::sui::SUI"), ZERO_BALANCE);
    }

    #[tokio::test]
    async fn test_get_balance_network_error_is_zero() {
        // Nothing listens on port 1
        let service = HttpPriceService::new(
            "http://127.0.0.1:1/price",
            "http://127.0.0.1:1/coins",
            "http://127.0.0.1:1/allTokens",
        )
        .unwrap();

        let balance = service.get_balance("0xabc", "0x2::sui::SUI").await;

        assert_eq!(balance, ZERO_BALANCE);
    }

    #[test]
    fn test_error_display() {
        let err = PriceError::Api {
            code: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API error (503): down");
    }
}
