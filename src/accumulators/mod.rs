// 📒 Category Accumulators - detail ledger + per-currency summary per category
//
// Every accumulator reads and validates all the fields it needs before it
// touches its state, so a failing line never leaves a partial entry behind.

pub mod dividends;
pub mod interest;
pub mod orders;
pub mod transactions;

pub use dividends::{DividendTotals, Dividends};
pub use interest::{Interest, InterestTotals};
pub use orders::{OrderSide, OrderTotals, Orders};
pub use transactions::{TransactionKind, TransactionTotals, Transactions};

use crate::classifier::ActionCategory;
use crate::error::{LedgerError, Result};
use crate::money::Amount;
use crate::record::Record;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Token joining the fields of a detail entry
pub const SEPARATOR: &str = " ---> ";

// ============================================================================
// DETAIL LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailEntry {
    /// 1-based, arrival order, contiguous within a session
    pub sequence: usize,
    pub text: String,
}

/// Ordered, human-readable entries of one category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailLedger {
    entries: Vec<DetailEntry>,
}

impl DetailLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its sequence number
    pub fn push(&mut self, text: String) -> usize {
        let sequence = self.entries.len() + 1;
        self.entries.push(DetailEntry { sequence, text });
        sequence
    }

    pub fn get(&self, sequence: usize) -> Option<&str> {
        sequence
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(|entry| entry.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetailEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// Serialized as { "1": "...", "2": "..." }
impl Serialize for DetailLedger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|e| (e.sequence, &e.text)))
    }
}

/// `field ---> field ---> total currency`
pub(crate) fn detail_text(fields: &[&str], total: &str, currency: &str) -> String {
    let mut parts: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
    parts.push(format!("{} {}", total, currency));
    parts.join(SEPARATOR)
}

pub(crate) fn overflow(record: &Record<'_>, currency: &str) -> LedgerError {
    LedgerError::AmountOverflow {
        line: record.line(),
        currency: currency.to_string(),
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

/// Currency code (as written in the export) → category metrics
pub type CurrencySummary<M> = BTreeMap<String, M>;

/// Metric name → display value, per currency
pub type SummaryTable = BTreeMap<String, BTreeMap<&'static str, String>>;

/// Named figures one category tracks per currency
pub trait MetricSet: Default + Serialize {
    fn metrics(&self) -> Vec<(&'static str, Amount)>;
}

// ============================================================================
// ACCUMULATOR TRAIT
// ============================================================================

pub trait Accumulator {
    type Metrics: MetricSet;

    fn category(&self) -> ActionCategory;

    /// Consume one record already classified into this category
    fn parse(&mut self, record: &Record<'_>) -> Result<()>;

    /// Empty the ledger and the summary
    fn clear(&mut self);

    fn ledger(&self) -> &DetailLedger;

    fn summary(&self) -> &CurrencySummary<Self::Metrics>;

    /// Summary as currency → metric name → two-decimal string
    fn summary_table(&self) -> SummaryTable {
        self.summary()
            .iter()
            .map(|(currency, metrics)| {
                let row: BTreeMap<&'static str, String> = metrics
                    .metrics()
                    .into_iter()
                    .map(|(name, amount)| (name, amount.to_string()))
                    .collect();
                (currency.clone(), row)
            })
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
