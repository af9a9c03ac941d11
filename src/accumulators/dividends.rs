// Dividends accumulator

use super::{detail_text, overflow, Accumulator, CurrencySummary, DetailLedger, MetricSet};
use crate::classifier::ActionCategory;
use crate::error::Result;
use crate::header::{CURRENCY, NAME, TOTAL};
use crate::money::Amount;
use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendTotals {
    pub total_dividends: Amount,
}

impl MetricSet for DividendTotals {
    fn metrics(&self) -> Vec<(&'static str, Amount)> {
        vec![("totalDividends", self.total_dividends)]
    }
}

/// Entry: `name ---> total currency`
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dividends {
    ledger: DetailLedger,
    summary: CurrencySummary<DividendTotals>,
}

impl Dividends {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Dividends {
    type Metrics = DividendTotals;

    fn category(&self) -> ActionCategory {
        ActionCategory::Dividend
    }

    fn parse(&mut self, record: &Record<'_>) -> Result<()> {
        let name = record.get(NAME)?.trim();
        let total = record.get(TOTAL)?;
        let currency = record.get(CURRENCY)?;
        let amount = record.decimal(TOTAL)?;

        let current = self.summary.get(currency).copied().unwrap_or_default();
        let total_dividends = current
            .total_dividends
            .checked_add_raw(amount)
            .ok_or_else(|| overflow(record, currency))?;

        self.ledger.push(detail_text(&[name], total, currency));
        self.summary.entry(currency.to_string()).or_default().total_dividends = total_dividends;

        Ok(())
    }

    fn clear(&mut self) {
        self.ledger.clear();
        self.summary.clear();
    }

    fn ledger(&self) -> &DetailLedger {
        &self.ledger
    }

    fn summary(&self) -> &CurrencySummary<DividendTotals> {
        &self.summary
    }
}
