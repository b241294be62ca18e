//! BasketLens: A Rust CLI application for market basket analysis on retail
//! transaction logs
//!
//! This library loads a transaction CSV, normalizes it into typed records,
//! explodes each basket into item rows, counts co-purchase pairs, and renders
//! a fixed set of descriptive charts.

pub mod analysis;
pub mod cli;
pub mod data;
pub mod viz;

// Re-export public items for easier access
pub use analysis::{
    count_pairs, explode_transactions, tokenize_products, BasketAnalysis, ItemPair, PairCount,
    TransactionItem,
};
pub use cli::Args;
pub use data::{load_transactions, Transaction, TransactionLog};
pub use viz::generate_visualization_report;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
