// Trading Ledger - Core Library
// Brokerage export → per-category detail ledgers + per-currency summaries

pub mod accumulators;
pub mod classifier;
pub mod config;
pub mod error;
pub mod header;
pub mod ingest;
pub mod money;
pub mod record;

// Re-export commonly used types
pub use accumulators::{
    Accumulator, CurrencySummary, DetailEntry, DetailLedger, DividendTotals, Dividends,
    Interest, InterestTotals, MetricSet, OrderSide, OrderTotals, Orders, SummaryTable,
    TransactionKind, TransactionTotals, Transactions, SEPARATOR,
};
pub use classifier::{category_of, classify, ActionCategory};
pub use config::IngestConfig;
pub use error::{LedgerError, Result};
pub use header::{DuplicateColumns, HeaderIndex, DELIMITER};
pub use ingest::{ingest, Coverage, IngestReport, Ingestor, LedgerSet};
pub use money::Amount;
pub use record::Record;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
