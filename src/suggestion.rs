//! Keyword suggestion engine
//!
//! Finds a trigger word at the end of the user's input and renders the
//! suggestion template that goes with it. Pure functions only; the composer
//! owns all state.

use crate::keywords::{KeywordRule, KeywordTable, WALLET_ADDRESS_TOKEN};

/// Values available for placeholder substitution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionContext {
    /// Address of the connected wallet, if any
    pub wallet_address: Option<String>,
}

impl SuggestionContext {
    pub fn with_wallet(address: impl Into<String>) -> Self {
        Self {
            wallet_address: Some(address.into()),
        }
    }
}

/// A rule that matched the end of some input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub rule: &'static KeywordRule,
    /// The trailing text that matched, as the user typed it
    pub matched_span: String,
}

/// Matches trailing trigger words against a keyword table
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionEngine {
    table: KeywordTable,
}

impl SuggestionEngine {
    pub fn new(table: KeywordTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> KeywordTable {
        self.table
    }

    /// Return the first rule (in table order) whose trigger ends `text`
    pub fn match_trailing(&self, text: &str) -> Option<KeywordMatch> {
        self.table.rules().iter().find_map(|rule| {
            rule.matched_span(text).map(|span| KeywordMatch {
                rule,
                matched_span: span.to_string(),
            })
        })
    }

    /// Render a rule's template for display
    ///
    /// Only the wallet address token is substituted. Without an address the
    /// token stays visible so the user can see what still needs filling in.
    pub fn render(rule: &KeywordRule, context: &SuggestionContext) -> String {
        match context
            .wallet_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
        {
            Some(address) => rule.template.replace(WALLET_ADDRESS_TOKEN, address),
            None => rule.template.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
