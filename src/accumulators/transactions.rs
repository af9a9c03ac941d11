// Transactions accumulator (deposits and withdrawals)

use super::{detail_text, overflow, Accumulator, CurrencySummary, DetailLedger, MetricSet};
use crate::classifier::ActionCategory;
use crate::error::{LedgerError, Result};
use crate::header::{ACTION, CURRENCY, NOTES, TOTAL};
use crate::money::Amount;
use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Case-sensitive on the literal words, "Deposit" checked first
    pub fn from_action(action: &str) -> Option<Self> {
        if action.contains("Deposit") {
            Some(TransactionKind::Deposit)
        } else if action.contains("Withdraw") {
            Some(TransactionKind::Withdrawal)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    pub total_deposits: Amount,
    pub total_withdrawals: Amount,
}

impl MetricSet for TransactionTotals {
    fn metrics(&self) -> Vec<(&'static str, Amount)> {
        vec![
            ("totalDeposits", self.total_deposits),
            ("totalWithdrawals", self.total_withdrawals),
        ]
    }
}

/// Entry: `notes ---> total currency`
///
/// Transaction lines that are neither deposits nor withdrawals (currency
/// conversions, for instance) are skipped without an entry unless `strict`
/// is set, in which case they fail with `UnmatchedTransaction`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transactions {
    ledger: DetailLedger,
    summary: CurrencySummary<TransactionTotals>,
    #[serde(skip)]
    strict: bool,
    #[serde(skip)]
    ignored: usize,
}

impl Transactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(strict: bool) -> Self {
        Transactions {
            strict,
            ..Self::default()
        }
    }

    /// Lines skipped because they were neither deposit nor withdrawal
    pub fn ignored(&self) -> usize {
        self.ignored
    }
}

impl Accumulator for Transactions {
    type Metrics = TransactionTotals;

    fn category(&self) -> ActionCategory {
        ActionCategory::Transaction
    }

    fn parse(&mut self, record: &Record<'_>) -> Result<()> {
        let action = record.get(ACTION)?;
        let notes = record.get(NOTES)?;
        let total = record.get(TOTAL)?;
        let currency = record.get(CURRENCY)?;

        let kind = match TransactionKind::from_action(action) {
            Some(kind) => kind,
            None if self.strict => {
                return Err(LedgerError::UnmatchedTransaction {
                    line: record.line(),
                    action: action.to_string(),
                });
            }
            None => {
                tracing::warn!(
                    line = record.line(),
                    action,
                    "transaction is neither a deposit nor a withdrawal, skipped"
                );
                self.ignored += 1;
                return Ok(());
            }
        };
        let amount = record.decimal(TOTAL)?;

        let mut totals = self.summary.get(currency).copied().unwrap_or_default();
        let updated = match kind {
            TransactionKind::Deposit => totals.total_deposits.checked_add_raw(amount),
            TransactionKind::Withdrawal => totals.total_withdrawals.checked_add_raw(amount),
        }
        .ok_or_else(|| overflow(record, currency))?;
        match kind {
            TransactionKind::Deposit => totals.total_deposits = updated,
            TransactionKind::Withdrawal => totals.total_withdrawals = updated,
        }

        self.ledger.push(detail_text(&[notes], total, currency));
        self.summary.insert(currency.to_string(), totals);

        Ok(())
    }

    fn clear(&mut self) {
        self.ledger.clear();
        self.summary.clear();
        self.ignored = 0;
    }

    fn ledger(&self) -> &DetailLedger {
        &self.ledger
    }

    fn summary(&self) -> &CurrencySummary<TransactionTotals> {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DuplicateColumns, HeaderIndex};

    fn header() -> HeaderIndex {
        HeaderIndex::from_line(
            "Action,Notes,Total,Currency (Total)",
            DuplicateColumns::LastWins,
        )
        .unwrap()
    }

    #[test]
    fn test_transaction_kind() {
        assert_eq!(TransactionKind::from_action("Deposit"), Some(TransactionKind::Deposit));
        assert_eq!(TransactionKind::from_action("Withdrawal"), Some(TransactionKind::Withdrawal));
        assert_eq!(TransactionKind::from_action("deposit"), None, "Match is case-sensitive");
        assert_eq!(TransactionKind::from_action("Currency conversion"), None);
    }

    #[test]
    fn test_deposits_and_withdrawals_per_currency() {
        let header = header();
        let mut transactions = Transactions::new();

        for (i, line) in [
            "Deposit,Bank transfer,500,USD",
            "Withdrawal,Sent to bank,-200,USD",
            "Deposit,Card top-up,100.5,USD",
            "Withdrawal,Sent to bank,-50,EUR",
        ]
        .iter()
        .enumerate()
        {
            transactions
                .parse(&Record::from_line(&header, line, i + 2))
                .unwrap();
        }

        assert_eq!(transactions.ledger().len(), 4);
        assert_eq!(transactions.ledger().get(1), Some("Bank transfer ---> 500 USD"));

        let table = transactions.summary_table();
        assert_eq!(table["USD"]["totalDeposits"], "600.50");
        assert_eq!(table["USD"]["totalWithdrawals"], "-200.00");
        assert_eq!(table["EUR"]["totalDeposits"], "0.00");
        assert_eq!(table["EUR"]["totalWithdrawals"], "-50.00");
    }

    #[test]
    fn test_unmatched_transaction_is_skipped() {
        let header = header();
        let mut transactions = Transactions::new();

        let result = transactions.parse(&Record::from_line(
            &header,
            "Currency conversion,EUR to USD,10,USD",
            2,
        ));

        assert!(result.is_ok());
        assert!(transactions.ledger().is_empty());
        assert!(transactions.summary().is_empty());
        assert_eq!(transactions.ignored(), 1);
    }

    #[test]
    fn test_unmatched_transaction_rejected_when_strict() {
        let header = header();
        let mut transactions = Transactions::strict(true);

        let result = transactions.parse(&Record::from_line(
            &header,
            "Currency conversion,EUR to USD,10,USD",
            7,
        ));

        assert!(matches!(
            result,
            Err(LedgerError::UnmatchedTransaction { line: 7, .. })
        ));
        assert!(transactions.ledger().is_empty());
    }

    #[test]
    fn test_clear_resets_ignored_count() {
        let header = header();
        let mut transactions = Transactions::new();
        transactions
            .parse(&Record::from_line(&header, "Currency conversion,x,1,USD", 2))
            .unwrap();

        transactions.clear();

        assert_eq!(transactions.ignored(), 0);
    }
}
