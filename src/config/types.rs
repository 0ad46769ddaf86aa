// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

/// Default chat backend endpoint
pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:8000/ask";
/// Default per-token price endpoint
pub const DEFAULT_PRICE_URL: &str = "https://api.suilend.fi/price";
/// Default verified coin list endpoint
pub const DEFAULT_COINS_URL: &str = "https://api-sui.cetus.zone/v2/sui/coins_info";
/// Default wallet balance endpoint (served next to the chat backend)
pub const DEFAULT_BALANCE_URL: &str = "http://127.0.0.1:8000/allTokens";

/// Wallet section
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct WalletConfig {
    /// Address of the connected wallet; `None` means not connected
    #[serde(default)]
    pub address: Option<String>,
}

/// Chat backend section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    #[serde(default = "default_chat_endpoint")]
    pub endpoint: String,
    /// Seconds to wait for the backend before giving up on a reply
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delay between receiving a reply and swapping it into the dialog list
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

impl ChatConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            endpoint: default_chat_endpoint(),
            timeout_secs: default_timeout_secs(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// Token price section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PriceConfig {
    #[serde(default = "default_price_url")]
    pub price_url: String,
    #[serde(default = "default_coins_url")]
    pub coins_url: String,
    #[serde(default = "default_balance_url")]
    pub balance_url: String,
    /// How long a fetched price list stays fresh
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl PriceConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for PriceConfig {
    fn default() -> Self {
        PriceConfig {
            price_url: default_price_url(),
            coins_url: default_coins_url(),
            balance_url: default_balance_url(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub prices: PriceConfig,
}

fn default_chat_endpoint() -> String {
    DEFAULT_CHAT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_reply_delay_ms() -> u64 {
    50
}

fn default_price_url() -> String {
    DEFAULT_PRICE_URL.to_string()
}

fn default_coins_url() -> String {
    DEFAULT_COINS_URL.to_string()
}

fn default_balance_url() -> String {
    DEFAULT_BALANCE_URL.to_string()
}

fn default_ttl_secs() -> u64 {
    90
}
