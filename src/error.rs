// ⚠️ Ledger Errors - one typed error for the whole ingestion pipeline
// Every failure aborts the session; callers match on the variant to react.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A column an accumulator needs is not in the header
    #[error("missing column '{column}' in export header")]
    MissingColumn { column: String },

    /// Header names a column twice (only raised with `DuplicateColumns::Reject`)
    #[error("duplicate column '{column}' in export header")]
    DuplicateColumn { column: String },

    #[error("export is empty: no header line found")]
    EmptyExport,

    /// Record is shorter than the column position the header promised
    #[error("line {line}: no value for column '{column}'")]
    MissingField { line: usize, column: String },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: invalid order action '{action}', expected buy or sell")]
    InvalidOrderAction { line: usize, action: String },

    #[error("line {line}: invalid number format '{value}'")]
    InvalidNumberFormat { line: usize, value: String },

    /// A running total no longer fits two fractional digits
    #[error("line {line}: {currency} total overflows")]
    AmountOverflow { line: usize, currency: String },

    /// Transaction line that is neither a deposit nor a withdrawal
    /// (only raised with `strict_transactions`)
    #[error("line {line}: transaction '{action}' is neither a deposit nor a withdrawal")]
    UnmatchedTransaction { line: usize, action: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Stable short name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::MissingColumn { .. } => "MissingColumn",
            LedgerError::DuplicateColumn { .. } => "DuplicateColumn",
            LedgerError::EmptyExport => "EmptyExport",
            LedgerError::MissingField { .. } => "MissingField",
            LedgerError::UnrecognizedAction { .. } => "UnrecognizedAction",
            LedgerError::InvalidOrderAction { .. } => "InvalidOrderAction",
            LedgerError::InvalidNumberFormat { .. } => "InvalidNumberFormat",
            LedgerError::AmountOverflow { .. } => "AmountOverflow",
            LedgerError::UnmatchedTransaction { .. } => "UnmatchedTransaction",
            LedgerError::Csv(_) => "Csv",
            LedgerError::Io(_) => "Io",
        }
    }

    /// Export line the error points at, when known
    pub fn line(&self) -> Option<usize> {
        match self {
            LedgerError::MissingField { line, .. }
            | LedgerError::UnrecognizedAction { line, .. }
            | LedgerError::InvalidOrderAction { line, .. }
            | LedgerError::InvalidNumberFormat { line, .. }
            | LedgerError::AmountOverflow { line, .. }
            | LedgerError::UnmatchedTransaction { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
