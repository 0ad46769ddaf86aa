//! Wallet helpers
//!
//! The wallet itself lives outside this program; all we keep is the
//! address it reported, used for suggestion placeholders and the status bar.

use crate::suggestion::SuggestionContext;

/// Connected wallet, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletContext {
    address: Option<String>,
}

impl WalletContext {
    pub fn new(address: Option<String>) -> Self {
        let address = address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());
        Self { address }
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Substitution values for keyword suggestions
    pub fn suggestion_context(&self) -> SuggestionContext {
        SuggestionContext {
            wallet_address: self.address.clone(),
        }
    }

    /// Short form for display, e.g. `0x1234...abcd`
    pub fn display_address(&self) -> Option<String> {
        self.address.as_deref().map(|a| censor_address(a, 6, 4))
    }
}

/// Shorten an address to its first `start` and last `end` characters
///
/// Addresses too short to shorten are returned unchanged.
pub fn censor_address(address: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= start + end {
        return address.to_string();
    }

    let head: String = chars[..start].iter().collect();
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Render a raw on-chain balance in whole tokens, four decimals
///
/// `decimals` is the token's precision, e.g. 9 for SUI. Unparseable input
/// reads as zero.
pub fn format_balance(raw: &str, decimals: u8) -> String {
    let units = raw.trim().parse::<f64>().unwrap_or(0.0);
    let scaled = units / 10f64.powi(i32::from(decimals));
    format!("{:.4}", scaled)
}
