// 🧭 Header Index - column name → position, built once per session

use crate::error::{LedgerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field delimiter of the export. Quoting is not supported.
pub const DELIMITER: char = ',';

// Column names the accumulators read
pub const ACTION: &str = "Action";
pub const NAME: &str = "Name";
pub const NOTES: &str = "Notes";
pub const TOTAL: &str = "Total";
pub const CURRENCY: &str = "Currency (Total)";

/// What to do when the header names the same column twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateColumns {
    /// Later occurrence overwrites the earlier position
    #[default]
    LastWins,
    /// Fail with `DuplicateColumn`
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    width: usize,
}

impl HeaderIndex {
    /// Build from an already split header row
    pub fn from_fields<'a, I>(fields: I, duplicates: DuplicateColumns) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut positions = HashMap::new();
        let mut width = 0;

        for (position, raw) in fields.into_iter().enumerate() {
            // Exports saved by spreadsheet tools often carry a BOM
            let name = if position == 0 {
                raw.trim_start_matches('\u{feff}')
            } else {
                raw
            };

            if let Some(previous) = positions.insert(name.to_string(), position) {
                match duplicates {
                    DuplicateColumns::LastWins => {
                        tracing::warn!(
                            column = name,
                            previous,
                            position,
                            "duplicate header column, later position wins"
                        );
                    }
                    DuplicateColumns::Reject => {
                        return Err(LedgerError::DuplicateColumn {
                            column: name.to_string(),
                        });
                    }
                }
            }
            width = position + 1;
        }

        Ok(HeaderIndex { positions, width })
    }

    /// Build from the raw first line of the export
    pub fn from_line(line: &str, duplicates: DuplicateColumns) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        Self::from_fields(line.split(DELIMITER), duplicates)
    }

    /// Position of a column, `MissingColumn` when absent
    pub fn position(&self, column: &str) -> Result<usize> {
        self.positions
            .get(column)
            .copied()
            .ok_or_else(|| LedgerError::MissingColumn {
                column: column.to_string(),
            })
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    /// Number of fields in the header line
    pub fn width(&self) -> usize {
        self.width
    }

    /// Column names ordered by position
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<(&str, usize)> = self
            .positions
            .iter()
            .map(|(name, pos)| (name.as_str(), *pos))
            .collect();
        columns.sort_by_key(|(_, pos)| *pos);
        columns.into_iter().map(|(name, _)| name).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
