//! Basket explosion and co-purchase aggregation

use crate::data::{Transaction, TransactionLog};
use std::collections::{BTreeMap, BTreeSet};

/// Short weekday labels, Monday-first
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tues", "Wed", "Thurs", "Fri", "Sat", "Sun"];

/// Normalize a raw product field into item tokens
///
/// Pipes are translated to commas, the field is split on commas and
/// semicolons, and each piece is trimmed and lower-cased. Empty pieces are
/// dropped, so every returned token is non-empty.
pub fn tokenize_products(raw: &str) -> Vec<String> {
    raw.replace('|', ",")
        .replace(';', ",")
        .split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

/// One exploded (transaction, item) row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionItem {
    pub transaction_id: u64,
    pub item: String,
}

/// Explode transactions into one row per retained token
///
/// Duplicate tokens within a transaction each produce a row; a transaction
/// with no tokens produces none.
pub fn explode_transactions(transactions: &[Transaction]) -> Vec<TransactionItem> {
    transactions
        .iter()
        .flat_map(|txn| {
            tokenize_products(&txn.raw_products)
                .into_iter()
                .map(|item| TransactionItem {
                    transaction_id: txn.id,
                    item,
                })
        })
        .collect()
}

/// Unordered pair of two distinct items; members are kept sorted so that
/// (a, b) and (b, a) collapse to one key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemPair {
    pub first: String,
    pub second: String,
}

impl ItemPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Display label for charts and console output
    pub fn label(&self) -> String {
        format!("{} + {}", self.first, self.second)
    }
}

/// Co-purchase pair frequencies across all transactions
pub type PairCount = BTreeMap<ItemPair, u64>;

/// Count co-purchase pairs over all transactions
///
/// Each transaction contributes every 2-combination of its deduplicated,
/// sorted token set exactly once, regardless of within-transaction
/// multiplicity. Transactions with fewer than two distinct tokens are
/// skipped.
pub fn count_pairs(transactions: &[Transaction]) -> PairCount {
    let mut counts = PairCount::new();

    for txn in transactions {
        let unique: BTreeSet<String> = tokenize_products(&txn.raw_products).into_iter().collect();
        if unique.len() < 2 {
            continue;
        }

        let items: Vec<&String> = unique.iter().collect();
        for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                let pair = ItemPair::new(items[i].clone(), items[j].clone());
                *counts.entry(pair).or_insert(0) += 1;
            }
        }
    }

    counts
}

/// All derived tables consumed by the reporting layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketAnalysis {
    /// Exploded (transaction, item) rows in input order
    pub items: Vec<TransactionItem>,
    /// Item frequency over the full item multiset
    pub item_counts: BTreeMap<String, u64>,
    /// Transactions per customer name
    pub customer_counts: BTreeMap<String, u64>,
    /// Co-purchase pair frequencies
    pub pair_counts: PairCount,
    /// Transactions per hour of day
    pub hourly: [u64; 24],
    /// Transactions per weekday, Monday-first
    pub weekday: [u64; 7],
    /// Item rows per (weekday, hour) cell
    pub weekday_hour_items: [[u64; 24]; 7],
    /// Token-row count per transaction id; 0 for token-less transactions
    pub basket_sizes: BTreeMap<u64, u64>,
}

impl BasketAnalysis {
    /// Derive every aggregate table from a loaded transaction log
    pub fn from_log(log: &TransactionLog) -> Self {
        let items = explode_transactions(&log.transactions);

        let mut customer_counts = BTreeMap::new();
        let mut hourly = [0u64; 24];
        let mut weekday = [0u64; 7];
        let mut basket_sizes = BTreeMap::new();
        let mut slots = BTreeMap::new();

        for txn in &log.transactions {
            *customer_counts.entry(txn.customer.clone()).or_insert(0) += 1;
            let (day, hour) = (txn.weekday_index(), txn.hour());
            hourly[hour] += 1;
            weekday[day] += 1;
            basket_sizes.insert(txn.id, 0u64);
            slots.insert(txn.id, (day, hour));
        }

        let mut item_counts = BTreeMap::new();
        let mut weekday_hour_items = [[0u64; 24]; 7];

        for item in &items {
            *item_counts.entry(item.item.clone()).or_insert(0) += 1;
            if let Some(&(day, hour)) = slots.get(&item.transaction_id) {
                weekday_hour_items[day][hour] += 1;
            }
            if let Some(size) = basket_sizes.get_mut(&item.transaction_id) {
                *size += 1;
            }
        }

        let pair_counts = count_pairs(&log.transactions);

        Self {
            items,
            item_counts,
            customer_counts,
            pair_counts,
            hourly,
            weekday,
            weekday_hour_items,
            basket_sizes,
        }
    }

    /// Top N products by sold-item count
    pub fn top_items(&self, n: usize) -> Vec<(String, u64)> {
        top_n(&self.item_counts, n)
    }

    /// Top N customers by transaction count
    pub fn top_customers(&self, n: usize) -> Vec<(String, u64)> {
        top_n(&self.customer_counts, n)
    }

    /// Top N co-purchased pairs
    pub fn top_pairs(&self, n: usize) -> Vec<(ItemPair, u64)> {
        top_n(&self.pair_counts, n)
    }

    /// Basket-size histogram: size -> number of transactions with that size
    pub fn basket_size_histogram(&self) -> BTreeMap<u64, u64> {
        let mut histogram = BTreeMap::new();
        for &size in self.basket_sizes.values() {
            *histogram.entry(size).or_insert(0) += 1;
        }
        histogram
    }
}

/// Select the N largest entries: count descending, then key ascending.
/// Deterministic on identical input, which makes top-N output reproducible.
fn top_n<K: Clone + Ord>(counts: &BTreeMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.iter().map(|(k, &v)| (k.clone(), v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}
