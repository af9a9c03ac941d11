// Interest accumulator

use super::{detail_text, overflow, Accumulator, CurrencySummary, DetailLedger, MetricSet};
use crate::classifier::ActionCategory;
use crate::error::Result;
use crate::header::{CURRENCY, NOTES, TOTAL};
use crate::money::Amount;
use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestTotals {
    pub total_interest: Amount,
}

impl MetricSet for InterestTotals {
    fn metrics(&self) -> Vec<(&'static str, Amount)> {
        vec![("totalInterest", self.total_interest)]
    }
}

/// Entry: `notes ---> total currency`
#[derive(Debug, Clone, Default, Serialize)]
pub struct Interest {
    ledger: DetailLedger,
    summary: CurrencySummary<InterestTotals>,
}

impl Interest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Interest {
    type Metrics = InterestTotals;

    fn category(&self) -> ActionCategory {
        ActionCategory::Interest
    }

    fn parse(&mut self, record: &Record<'_>) -> Result<()> {
        let notes = record.get(NOTES)?;
        let total = record.get(TOTAL)?;
        let currency = record.get(CURRENCY)?;
        let amount = record.decimal(TOTAL)?;

        let current = self.summary.get(currency).copied().unwrap_or_default();
        let total_interest = current
            .total_interest
            .checked_add_raw(amount)
            .ok_or_else(|| overflow(record, currency))?;

        self.ledger.push(detail_text(&[notes], total, currency));
        self.summary.entry(currency.to_string()).or_default().total_interest = total_interest;

        Ok(())
    }

    fn clear(&mut self) {
        self.ledger.clear();
        self.summary.clear();
    }

    fn ledger(&self) -> &DetailLedger {
        &self.ledger
    }

    fn summary(&self) -> &CurrencySummary<InterestTotals> {
        &self.summary
    }
}
