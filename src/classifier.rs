// 🏷️ Action Classifier - free-text action label → category
// Ordered keyword rules, first match wins

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Interest,
    Transaction,
    Order,
    Dividend,
}

impl ActionCategory {
    /// All categories, in classification priority order
    pub const ALL: [ActionCategory; 4] = [
        ActionCategory::Interest,
        ActionCategory::Transaction,
        ActionCategory::Order,
        ActionCategory::Dividend,
    ];

    /// Human-readable name for display
    pub fn name(&self) -> &'static str {
        match self {
            ActionCategory::Interest => "Interest",
            ActionCategory::Transaction => "Transaction",
            ActionCategory::Order => "Order",
            ActionCategory::Dividend => "Dividend",
        }
    }

    /// Heading of the category's detail ledger
    pub fn ledger_title(&self) -> &'static str {
        match self {
            ActionCategory::Interest => "Interest",
            ActionCategory::Transaction => "Transactions",
            ActionCategory::Order => "Orders",
            ActionCategory::Dividend => "Dividends",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// RULES
// ============================================================================

struct CategoryRule {
    category: ActionCategory,
    keywords: &'static [&'static str],
}

impl CategoryRule {
    /// `label` must already be lowercased
    fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }
}

// Priority order matters: labels can satisfy several rules, e.g.
// "Interest on dividend" is Interest, "Currency conversion (deposit)" is Transaction.
const RULES: [CategoryRule; 4] = [
    CategoryRule {
        category: ActionCategory::Interest,
        keywords: &["interest"],
    },
    CategoryRule {
        category: ActionCategory::Transaction,
        keywords: &["deposit", "withdraw", "currency conversion"],
    },
    CategoryRule {
        category: ActionCategory::Order,
        keywords: &["buy", "sell", "market"],
    },
    CategoryRule {
        category: ActionCategory::Dividend,
        keywords: &["dividend"],
    },
];

/// Category of an action label, or `None` when no rule matches
pub fn category_of(label: &str) -> Option<ActionCategory> {
    let label = label.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&label))
        .map(|rule| rule.category)
}

/// Classify the action label found on `line` of the export
pub fn classify(label: &str, line: usize) -> Result<ActionCategory> {
    category_of(label).ok_or_else(|| LedgerError::UnrecognizedAction {
        line,
        action: label.to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
