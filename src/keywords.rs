//! Keyword table
//!
//! Static list of trigger words that activate an inline suggestion when typed
//! at the very end of the chat input. Order matters: the first rule whose
//! trigger matches wins.

/// Placeholder token filled with the connected wallet address
pub const WALLET_ADDRESS_TOKEN: &str = "{{WALLET ADDRESS}}";

/// A trigger word and the suggestion template it unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Stable identifier, also the canonical spelling of the trigger
    pub id: &'static str,
    /// Word that must appear at the end of the input (case-insensitive)
    pub trigger: &'static str,
    /// Suggestion text, may contain `{{...}}` placeholder tokens
    pub template: &'static str,
}

impl KeywordRule {
    /// Check whether `text` ends with this rule's trigger, ignoring ASCII case
    ///
    /// The match is anchored to the end of the string only, so "unswap"
    /// matches the `swap` rule just like "swap" does.
    pub fn matches_end(&self, text: &str) -> bool {
        self.matched_span(text).is_some()
    }

    /// Return the suffix of `text` that matched the trigger, in the user's casing
    pub fn matched_span<'a>(&self, text: &'a str) -> Option<&'a str> {
        let len = self.trigger.len();
        if text.len() < len || !text.is_char_boundary(text.len() - len) {
            return None;
        }
        let tail = &text[text.len() - len..];
        tail.eq_ignore_ascii_case(self.trigger).then_some(tail)
    }
}

/// Built-in keyword rules, in match priority order
pub const KEYWORDS: &[KeywordRule] = &[
    KeywordRule {
        id: "swap",
        trigger: "swap",
        template: "{{AMOUNT}} of {{Token A}} to {{Token B}}",
    },
    KeywordRule {
        id: "balance",
        trigger: "balance",
        template: "of {{WALLET ADDRESS}}",
    },
    KeywordRule {
        id: "transfer",
        trigger: "transfer",
        template: "{{AMOUNT}} to {{WALLET ADDRESS}}",
    },
    KeywordRule {
        id: "deposit",
        trigger: "deposit",
        template: "DONT KNOW YET",
    },
    KeywordRule {
        id: "portfolio",
        trigger: "portfolio",
        template: "of {{WALLET ADDRESS}}",
    },
    KeywordRule {
        id: "repay",
        trigger: "repay",
        template: "{{AMOUNT}} to {{WALLET ADDRESS}}",
    },
    KeywordRule {
        id: "withdraw",
        trigger: "withdraw",
        template: "{{AMOUNT}} from my {{WALLET ADDRESS}}",
    },
];

/// Read-only view over a set of keyword rules
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    rules: &'static [KeywordRule],
}

impl KeywordTable {
    /// Table backed by the built-in [`KEYWORDS`]
    pub const fn builtin() -> Self {
        Self { rules: KEYWORDS }
    }

    /// Table backed by a custom rule list
    pub const fn from_rules(rules: &'static [KeywordRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [KeywordRule] {
        self.rules
    }

    /// Look up a rule by its id
    pub fn find(&self, id: &str) -> Option<&'static KeywordRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod keywords_tests;
