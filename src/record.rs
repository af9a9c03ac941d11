// 📄 Record - one data line of the export, addressed by column name

use crate::error::{LedgerError, Result};
use crate::header::{HeaderIndex, DELIMITER};
use crate::money::{parse_decimal, Amount};
use csv::StringRecord;
use rust_decimal::Decimal;

/// Raw fields of one data line.
///
/// Fields are only reachable through the session's `HeaderIndex`, never by
/// hard-coded position.
#[derive(Debug, Clone)]
pub struct Record<'h> {
    header: &'h HeaderIndex,
    fields: StringRecord,
    line: usize,
}

impl<'h> Record<'h> {
    pub fn new(header: &'h HeaderIndex, fields: StringRecord, line: usize) -> Self {
        Record {
            header,
            fields,
            line,
        }
    }

    /// Split a raw line on the export delimiter
    pub fn from_line(header: &'h HeaderIndex, text: &str, line: usize) -> Self {
        let text = text.trim_end_matches(['\r', '\n']);
        let fields: StringRecord = text.split(DELIMITER).collect();
        Record::new(header, fields, line)
    }

    /// 1-based line number in the export (header is line 1)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Result<&str> {
        let position = self.header.position(column)?;
        self.fields
            .get(position)
            .ok_or_else(|| LedgerError::MissingField {
                line: self.line,
                column: column.to_string(),
            })
    }

    /// Value of a named column parsed as a decimal that fits a two-digit amount
    pub fn decimal(&self, column: &str) -> Result<Decimal> {
        let text = self.get(column)?;
        parse_decimal(text)
            .filter(|value| Amount::new(*value).is_some())
            .ok_or_else(|| LedgerError::InvalidNumberFormat {
                line: self.line,
                value: text.to_string(),
            })
    }

    /// The line as it appeared in the export
    pub fn raw(&self) -> String {
        self.fields
            .iter()
            .collect::<Vec<_>>()
            .join(DELIMITER.to_string().as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
