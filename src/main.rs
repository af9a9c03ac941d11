use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use trading_ledger::{ActionCategory, DuplicateColumns, IngestConfig, IngestReport, Ingestor};

/// Summarise a brokerage transaction export
#[derive(Debug, Parser)]
#[command(name = "trading-ledger", version)]
struct Cli {
    /// Exported CSV file
    export: PathBuf,

    /// JSON file with ingestion settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on repeated header columns instead of keeping the last one
    #[arg(long)]
    strict_header: bool,

    /// Fail on transactions that are neither deposits nor withdrawals
    #[arg(long)]
    strict_transactions: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Only show one category
    #[arg(long, value_enum)]
    category: Option<Category>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Category {
    Dividends,
    Transactions,
    Interest,
    Orders,
}

impl From<Category> for ActionCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Dividends => ActionCategory::Dividend,
            Category::Transactions => ActionCategory::Transaction,
            Category::Interest => ActionCategory::Interest,
            Category::Orders => ActionCategory::Order,
        }
    }
}

// Same order the detail view has always listed them in
const DISPLAY_ORDER: [ActionCategory; 4] = [
    ActionCategory::Dividend,
    ActionCategory::Transaction,
    ActionCategory::Interest,
    ActionCategory::Order,
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "trading_ledger=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let report = Ingestor::new(config)
        .ingest_path(&cli.export)
        .with_context(|| format!("Failed to ingest export: {}", cli.export.display()))?;

    tracing::info!(
        source = %report.source,
        lines = report.lines,
        fingerprint = %report.fingerprint,
        "export ingested"
    );
    if report.ignored_transactions > 0 {
        tracing::warn!(
            count = report.ignored_transactions,
            "transactions that are neither deposits nor withdrawals were skipped"
        );
    }

    let categories: Vec<ActionCategory> = match cli.category {
        Some(category) => vec![category.into()],
        None => DISPLAY_ORDER.to_vec(),
    };

    match cli.format {
        Format::Json => print_json(&report, &categories)?,
        Format::Text => print_text(&report, &categories),
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<IngestConfig> {
    let mut config = match &cli.config {
        Some(path) => IngestConfig::from_file(path)?,
        None => IngestConfig::default(),
    };

    if cli.strict_header {
        config.duplicate_columns = DuplicateColumns::Reject;
    }
    if cli.strict_transactions {
        config.strict_transactions = true;
    }

    Ok(config)
}

fn print_text(report: &IngestReport, categories: &[ActionCategory]) {
    for category in categories {
        println!("{}:", category.ledger_title());
        for entry in report.ledger(*category).iter() {
            println!("  {}. {}", entry.sequence, entry.text);
        }
    }

    println!();
    println!("Summary:");
    for category in categories {
        let table = report.summary_table(*category);
        if table.is_empty() {
            continue;
        }
        println!("{}:", category.ledger_title());
        for (currency, metrics) in &table {
            for (name, value) in metrics {
                println!("  {:<18} {} {}", name, value, currency);
            }
        }
    }
}

fn print_json(report: &IngestReport, categories: &[ActionCategory]) -> Result<()> {
    let json = if categories.len() == DISPLAY_ORDER.len() {
        serde_json::to_string_pretty(report)?
    } else {
        let mut selected = serde_json::Map::new();
        for category in categories {
            selected.insert(
                category.ledger_title().to_lowercase(),
                serde_json::json!({
                    "ledger": report.ledger(*category),
                    "summary": report.summary_table(*category),
                }),
            );
        }
        serde_json::to_string_pretty(&selected)?
    };

    println!("{}", json);
    Ok(())
}
