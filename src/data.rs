//! Transaction log loading and record normalization

use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::path::Path;

/// Column holding the transaction timestamp
pub const TIMESTAMP_COLUMN: &str = "Transaction Date";
/// Column holding the raw product field
pub const PRODUCT_COLUMN: &str = "Product";
/// Column holding the customer name
pub const CUSTOMER_COLUMN: &str = "Name";

/// Timestamp layouts accepted in addition to RFC 3339
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M",
];

/// One purchase event from the input log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// 0-based ordinal of the source row; stable across runs, with gaps
    /// where duplicate or unparseable rows were dropped
    pub id: u64,
    /// Parsed purchase timestamp
    pub timestamp: NaiveDateTime,
    /// Customer name as read (whitespace-trimmed)
    pub customer: String,
    /// Raw product field, tokenized later by the analysis layer
    pub raw_products: String,
}

impl Transaction {
    /// Hour of day (0-23)
    pub fn hour(&self) -> usize {
        self.timestamp.hour() as usize
    }

    /// Weekday index, Monday-first (0-6)
    pub fn weekday_index(&self) -> usize {
        self.timestamp.weekday().num_days_from_monday() as usize
    }
}

/// Loaded transaction table plus row-level bookkeeping
#[derive(Debug)]
pub struct TransactionLog {
    /// Retained transactions in input order
    pub transactions: Vec<Transaction>,
    /// Data rows read from the file
    pub source_rows: u64,
    /// Exact-duplicate rows removed before normalization
    pub duplicate_rows: u64,
    /// Rows dropped for an unparseable timestamp
    pub dropped_rows: u64,
}

/// Load a transaction CSV and normalize it into typed records
///
/// # Arguments
/// * `path` - Path to the input CSV file
///
/// # Returns
/// * `TransactionLog` with the retained transactions and drop counts
pub fn load_transactions(path: &Path) -> crate::Result<TransactionLog> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let timestamp_idx = column_index(&headers, TIMESTAMP_COLUMN)?;
    let product_idx = column_index(&headers, PRODUCT_COLUMN)?;
    let customer_idx = column_index(&headers, CUSTOMER_COLUMN)?;

    let mut seen_rows: HashSet<Vec<String>> = HashSet::new();
    let mut transactions = Vec::new();
    let mut source_rows = 0u64;
    let mut duplicate_rows = 0u64;
    let mut dropped_rows = 0u64;

    for (position, result) in reader.records().enumerate() {
        let record =
            result.with_context(|| format!("Failed to read CSV row {}", position + 1))?;
        source_rows += 1;

        // Exact duplicates are removed before normalization; first wins
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        if !seen_rows.insert(fields) {
            duplicate_rows += 1;
            continue;
        }

        // A bad timestamp drops the row silently; it is not an error
        let timestamp = match parse_timestamp(record.get(timestamp_idx).unwrap_or_default()) {
            Some(ts) => ts,
            None => {
                dropped_rows += 1;
                continue;
            }
        };

        transactions.push(Transaction {
            id: position as u64,
            timestamp,
            customer: record.get(customer_idx).unwrap_or_default().to_string(),
            raw_products: record.get(product_idx).unwrap_or_default().to_string(),
        });
    }

    Ok(TransactionLog {
        transactions,
        source_rows,
        duplicate_rows,
        dropped_rows,
    })
}

/// Find a required column in the (already trimmed) header row
fn column_index(headers: &StringRecord, name: &str) -> crate::Result<usize> {
    headers.iter().position(|header| header == name).ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required column '{}' (found: {})",
            name,
            headers.iter().collect::<Vec<_>>().join(", ")
        )
    })
}

/// Parse a timestamp string, trying RFC 3339 first, then the common layouts
///
/// Returns `None` when no layout matches; callers treat that as a dropped row.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.naive_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }

    // Bare dates parse to midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
