// 📥 Ingestion Orchestrator - header once, then classify + dispatch per line
//
// One pass, one thread. Every call owns a fresh `LedgerSet`, so sessions never
// share state and a failed session hands nothing back.

use crate::accumulators::{
    Accumulator, DetailLedger, Dividends, Interest, Orders, SummaryTable, Transactions,
};
use crate::classifier::{classify, ActionCategory};
use crate::config::IngestConfig;
use crate::error::{LedgerError, Result};
use crate::header::{HeaderIndex, ACTION, DELIMITER};
use crate::record::Record;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use uuid::Uuid;

// ============================================================================
// LEDGER SET
// ============================================================================

/// The four category accumulators of one session
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerSet {
    pub dividends: Dividends,
    pub interest: Interest,
    pub transactions: Transactions,
    pub orders: Orders,
}

impl LedgerSet {
    pub fn new(config: &IngestConfig) -> Self {
        LedgerSet {
            transactions: Transactions::strict(config.strict_transactions),
            ..Self::default()
        }
    }

    /// Reset every accumulator to empty
    pub fn clear(&mut self) {
        self.dividends.clear();
        self.interest.clear();
        self.transactions.clear();
        self.orders.clear();
    }

    /// Hand a classified record to its accumulator
    pub fn dispatch(&mut self, category: ActionCategory, record: &Record<'_>) -> Result<()> {
        match category {
            ActionCategory::Interest => self.interest.parse(record),
            ActionCategory::Transaction => self.transactions.parse(record),
            ActionCategory::Order => self.orders.parse(record),
            ActionCategory::Dividend => self.dividends.parse(record),
        }
    }

    pub fn ledger(&self, category: ActionCategory) -> &DetailLedger {
        match category {
            ActionCategory::Interest => self.interest.ledger(),
            ActionCategory::Transaction => self.transactions.ledger(),
            ActionCategory::Order => self.orders.ledger(),
            ActionCategory::Dividend => self.dividends.ledger(),
        }
    }

    pub fn summary_table(&self, category: ActionCategory) -> SummaryTable {
        match category {
            ActionCategory::Interest => self.interest.summary_table(),
            ActionCategory::Transaction => self.transactions.summary_table(),
            ActionCategory::Order => self.orders.summary_table(),
            ActionCategory::Dividend => self.dividends.summary_table(),
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Which categories an export contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Coverage {
    pub dividends: bool,
    pub interest: bool,
    pub orders: bool,
    pub transactions: bool,
}

/// Result of one successful ingestion
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub session_id: Uuid,
    pub source: String,
    pub ingested_at: DateTime<Utc>,
    /// SHA-256 over the consumed lines
    pub fingerprint: String,
    /// Data lines consumed, header excluded
    pub lines: usize,
    pub ignored_transactions: usize,
    pub ledgers: LedgerSet,
}

impl IngestReport {
    pub fn coverage(&self) -> Coverage {
        Coverage {
            dividends: !self.ledgers.dividends.ledger().is_empty(),
            interest: !self.ledgers.interest.ledger().is_empty(),
            orders: !self.ledgers.orders.ledger().is_empty(),
            transactions: !self.ledgers.transactions.ledger().is_empty(),
        }
    }

    pub fn ledger(&self, category: ActionCategory) -> &DetailLedger {
        self.ledgers.ledger(category)
    }

    pub fn summary_table(&self, category: ActionCategory) -> SummaryTable {
        self.ledgers.summary_table(category)
    }
}

// ============================================================================
// SESSION
// ============================================================================

struct Session {
    config: IngestConfig,
    header: Option<HeaderIndex>,
    ledgers: LedgerSet,
    hasher: Sha256,
    lines: usize,
}

impl Session {
    fn new(config: &IngestConfig) -> Self {
        let mut ledgers = LedgerSet::new(config);
        ledgers.clear();

        Session {
            config: config.clone(),
            header: None,
            ledgers,
            hasher: Sha256::new(),
            lines: 0,
        }
    }

    fn feed(&mut self, fields: StringRecord, line: usize) -> Result<()> {
        self.hash(&fields);

        let header = match &self.header {
            Some(header) => header,
            None => {
                let header = HeaderIndex::from_fields(fields.iter(), self.config.duplicate_columns)?;
                tracing::debug!(columns = ?header.columns(), "export header resolved");
                self.header = Some(header);
                return Ok(());
            }
        };

        let record = Record::new(header, fields, line);
        let category = classify(record.get(ACTION)?, line)?;
        self.ledgers.dispatch(category, &record)?;
        self.lines += 1;

        Ok(())
    }

    fn hash(&mut self, fields: &StringRecord) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.hasher.update([DELIMITER as u8]);
            }
            self.hasher.update(field.as_bytes());
        }
        self.hasher.update(b"\n");
    }

    fn finish(self, source: String) -> Result<IngestReport> {
        if self.header.is_none() {
            return Err(LedgerError::EmptyExport);
        }

        let report = IngestReport {
            session_id: Uuid::new_v4(),
            source,
            ingested_at: Utc::now(),
            fingerprint: format!("{:x}", self.hasher.finalize()),
            lines: self.lines,
            ignored_transactions: self.ledgers.transactions.ignored(),
            ledgers: self.ledgers,
        };

        tracing::debug!(
            session = %report.session_id,
            source = %report.source,
            lines = report.lines,
            ignored_transactions = report.ignored_transactions,
            "ingestion finished"
        );

        Ok(report)
    }
}

// ============================================================================
// INGESTOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(config: IngestConfig) -> Self {
        Ingestor { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Ingest an export given as lines, the first being the header.
    ///
    /// Blank lines are skipped everywhere, before the header too, the same
    /// way the CSV reader skips them. Stopping the iterator early ends the session
    /// normally with whatever was consumed so far.
    pub fn ingest_lines<I, S>(&self, lines: I) -> Result<IngestReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tracing::debug!("ingestion started from lines");
        let mut session = Session::new(&self.config);

        for (index, text) in lines.into_iter().enumerate() {
            let text = text.as_ref().trim_end_matches(['\r', '\n']);
            if text.is_empty() {
                continue;
            }
            let fields: StringRecord = text.split(DELIMITER).collect();
            session.feed(fields, index + 1)?;
        }

        session.finish("<lines>".to_string())
    }

    /// Ingest an export from any reader
    pub fn ingest_reader<R: Read>(&self, reader: R) -> Result<IngestReport> {
        self.ingest_csv(reader, "<reader>".to_string())
    }

    /// Ingest an export file from disk
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestReport> {
        let path = path.as_ref();
        let file = File::open(path)?;
        self.ingest_csv(file, path.display().to_string())
    }

    fn ingest_csv<R: Read>(&self, reader: R, source: String) -> Result<IngestReport> {
        tracing::debug!(source = %source, "ingestion started");

        // No quoting: a comma is always a delimiter
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut session = Session::new(&self.config);
        for (index, result) in reader.records().enumerate() {
            let fields = result?;
            let line = fields
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 1);
            session.feed(fields, line)?;
        }

        session.finish(source)
    }
}

/// Ingest lines with the default config
pub fn ingest<I, S>(lines: I) -> Result<IngestReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ingestor::default().ingest_lines(lines)
}

// ============================================================================
// TESTS
// ============================================================================
