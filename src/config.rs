// ⚙️ Ingestion Config - the few switches the engine allows
// Delimiter, column names and separator token stay fixed constants.

use crate::header::DuplicateColumns;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Header policy for repeated column names
    pub duplicate_columns: DuplicateColumns,

    /// Reject transaction lines that are neither deposit nor withdrawal
    /// instead of skipping them
    pub strict_transactions: bool,
}

impl IngestConfig {
    /// Load config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_export_tool() {
        let config = IngestConfig::default();

        assert_eq!(config.duplicate_columns, DuplicateColumns::LastWins);
        assert!(!config.strict_transactions);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ingest.json");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, r#"{{"duplicate_columns": "reject"}}"#).unwrap();

        let config = IngestConfig::from_file(&path).unwrap();

        assert_eq!(config.duplicate_columns, DuplicateColumns::Reject);
        assert!(!config.strict_transactions, "Missing keys fall back to defaults");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = IngestConfig::from_file(dir.path().join("nope.json"));

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
