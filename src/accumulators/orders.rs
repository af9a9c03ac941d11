// Orders accumulator (buys and sells)

use super::{detail_text, overflow, Accumulator, CurrencySummary, DetailLedger, MetricSet};
use crate::classifier::ActionCategory;
use crate::error::{LedgerError, Result};
use crate::header::{ACTION, CURRENCY, NAME, TOTAL};
use crate::money::Amount;
use crate::record::Record;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// "buy" is checked before "sell"
    pub fn from_action(action: &str) -> Option<Self> {
        let action = action.to_lowercase();
        if action.contains("buy") {
            Some(OrderSide::Buy)
        } else if action.contains("sell") {
            Some(OrderSide::Sell)
        } else {
            None
        }
    }
}

/// Income from sells, expenses from buys, profit = income - expenses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub total_profit: Amount,
}

impl OrderTotals {
    /// Totals after one more order, `None` when a figure overflows
    fn apply(self, side: OrderSide, amount: rust_decimal::Decimal) -> Option<Self> {
        let mut next = self;
        match side {
            OrderSide::Buy => next.total_expenses = self.total_expenses.checked_add_raw(amount)?,
            OrderSide::Sell => next.total_income = self.total_income.checked_add_raw(amount)?,
        }
        next.total_profit = next.total_income.checked_sub(next.total_expenses)?;
        Some(next)
    }
}

impl MetricSet for OrderTotals {
    fn metrics(&self) -> Vec<(&'static str, Amount)> {
        vec![
            ("totalIncome", self.total_income),
            ("totalExpenses", self.total_expenses),
            ("totalProfit", self.total_profit),
        ]
    }
}

/// Entry: `action ---> name ---> total currency`
#[derive(Debug, Clone, Default, Serialize)]
pub struct Orders {
    ledger: DetailLedger,
    summary: CurrencySummary<OrderTotals>,
}

impl Orders {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for Orders {
    type Metrics = OrderTotals;

    fn category(&self) -> ActionCategory {
        ActionCategory::Order
    }

    fn parse(&mut self, record: &Record<'_>) -> Result<()> {
        let action = record.get(ACTION)?;
        let name = record.get(NAME)?;
        let total = record.get(TOTAL)?;
        let currency = record.get(CURRENCY)?;

        let side = OrderSide::from_action(action).ok_or_else(|| LedgerError::InvalidOrderAction {
            line: record.line(),
            action: action.to_string(),
        })?;
        let amount = record.decimal(TOTAL)?;

        let totals = self
            .summary
            .get(currency)
            .copied()
            .unwrap_or_default()
            .apply(side, amount)
            .ok_or_else(|| overflow(record, currency))?;

        self.ledger.push(detail_text(&[action, name], total, currency));
        self.summary.insert(currency.to_string(), totals);

        Ok(())
    }

    fn clear(&mut self) {
        self.ledger.clear();
        self.summary.clear();
    }

    fn ledger(&self) -> &DetailLedger {
        &self.ledger
    }

    fn summary(&self) -> &CurrencySummary<OrderTotals> {
        &self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{DuplicateColumns, HeaderIndex};

    fn header() -> HeaderIndex {
        HeaderIndex::from_line(
            "Action,Name,Total,Currency (Total)",
            DuplicateColumns::LastWins,
        )
        .unwrap()
    }

    fn parse_all(orders: &mut Orders, header: &HeaderIndex, lines: &[&str]) {
        for (i, line) in lines.iter().enumerate() {
            orders.parse(&Record::from_line(header, line, i + 2)).unwrap();
        }
    }

    #[test]
    fn test_order_side() {
        assert_eq!(OrderSide::from_action("buy"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_action("Market buy"), Some(OrderSide::Buy));
        assert_eq!(OrderSide::from_action("Limit Sell"), Some(OrderSide::Sell));
        assert_eq!(OrderSide::from_action("Market"), None);
    }

    #[test]
    fn test_buy_line() {
        let header = header();
        let mut orders = Orders::new();
        parse_all(&mut orders, &header, &["buy,Company A,100,USD"]);

        assert_eq!(orders.ledger().get(1), Some("buy ---> Company A ---> 100 USD"));

        let table = orders.summary_table();
        assert_eq!(table["USD"]["totalExpenses"], "100.00");
        assert_eq!(table["USD"]["totalIncome"], "0.00");
        assert_eq!(table["USD"]["totalProfit"], "-100.00");
    }

    #[test]
    fn test_profit_per_currency() {
        let header = header();
        let mut orders = Orders::new();
        parse_all(
            &mut orders,
            &header,
            &[
                "buy,Company A,100,USD",
                "sell,Company B,200,EUR",
                "buy,Company C,50,GBP",
            ],
        );

        assert_eq!(orders.ledger().len(), 3);
        assert_eq!(orders.ledger().get(2), Some("sell ---> Company B ---> 200 EUR"));

        let table = orders.summary_table();
        assert_eq!(table["EUR"]["totalIncome"], "200.00");
        assert_eq!(table["EUR"]["totalExpenses"], "0.00");
        assert_eq!(table["EUR"]["totalProfit"], "200.00");
        assert_eq!(table["GBP"]["totalExpenses"], "50.00");
        assert_eq!(table["GBP"]["totalProfit"], "-50.00");
    }

    #[test]
    fn test_profit_invariant_after_every_update() {
        let header = header();
        let mut orders = Orders::new();

        for (i, line) in [
            "Market buy,A,10.10,USD",
            "Market sell,A,12.345,USD",
            "Limit buy,B,0.005,USD",
            "Market sell,B,1,USD",
        ]
        .iter()
        .enumerate()
        {
            orders.parse(&Record::from_line(&header, line, i + 2)).unwrap();
            let totals = orders.summary()["USD"];
            assert_eq!(
                Some(totals.total_profit),
                totals.total_income.checked_sub(totals.total_expenses)
            );
        }
    }

    #[test]
    fn test_invalid_order_action() {
        let header = header();
        let mut orders = Orders::new();

        let result = orders.parse(&Record::from_line(&header, "invalid,Company D,400,USD", 5));

        assert!(matches!(
            result,
            Err(LedgerError::InvalidOrderAction { line: 5, ref action }) if action == "invalid"
        ));
        assert!(orders.ledger().is_empty());
        assert!(orders.summary().is_empty());
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let header = header();
        let mut orders = Orders::new();
        parse_all(&mut orders, &header, &["buy,A,500000000000000000000000000,USD"]);

        let result = orders.parse(&Record::from_line(
            &header,
            "buy,B,500000000000000000000000000,USD",
            3,
        ));

        assert!(matches!(
            result,
            Err(LedgerError::AmountOverflow { line: 3, ref currency }) if currency == "USD"
        ));
        assert_eq!(orders.ledger().len(), 1, "Failed line leaves no entry");
        assert_eq!(
            orders.summary_table()["USD"]["totalExpenses"],
            "500000000000000000000000000.00"
        );
    }

    #[test]
    fn test_clear() {
        let header = header();
        let mut orders = Orders::new();
        parse_all(&mut orders, &header, &["buy,A,100,USD", "sell,B,200,EUR"]);

        orders.clear();

        assert!(orders.ledger().is_empty());
        assert!(orders.summary().is_empty());
    }
}
