//! Integration tests for BasketLens

use basketlens::{
    generate_visualization_report, load_transactions, BasketAnalysis, ItemPair,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// Create a test CSV file with sample transactions
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, " Transaction Date ,Product, Name ").unwrap();

    // Monday morning basket, duplicated exactly once
    writeln!(file, "2024-01-01 10:15,Bread|Milk, Alice").unwrap();
    writeln!(file, "2024-01-01 10:15,Bread|Milk, Alice").unwrap();

    // Duplicate tokens within one basket
    writeln!(file, "2024-01-01 11:30,\"Tea,Tea,Sugar\",Bob").unwrap();

    // Unparseable timestamp, excluded from everything
    writeln!(file, "not-a-date,Juice,Carol").unwrap();

    // Empty product field, retained with an empty basket
    writeln!(file, "2024-01-02 09:00,,Dave").unwrap();

    // Same pair as the first basket, reversed token order
    writeln!(file, "2024-01-03 18:45,\"milk, bread\",Eve").unwrap();

    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();
    let log = load_transactions(test_file.path()).unwrap();

    // Row bookkeeping: 6 read, 1 duplicate, 1 bad timestamp
    assert_eq!(log.source_rows, 6);
    assert_eq!(log.duplicate_rows, 1);
    assert_eq!(log.dropped_rows, 1);
    assert_eq!(log.transactions.len(), 4);

    let analysis = BasketAnalysis::from_log(&log);

    // Exploded item rows: 2 + 3 + 0 + 2
    assert_eq!(analysis.items.len(), 7);
    assert_eq!(analysis.item_counts["bread"], 2);
    assert_eq!(analysis.item_counts["milk"], 2);
    assert_eq!(analysis.item_counts["tea"], 2);
    assert_eq!(analysis.item_counts["sugar"], 1);

    // "Bread|Milk" and "milk, bread" both increment (bread, milk);
    // "Tea,Tea,Sugar" contributes (sugar, tea) once
    assert_eq!(analysis.pair_counts.len(), 2);
    assert_eq!(analysis.pair_counts[&ItemPair::new("bread", "milk")], 2);
    assert_eq!(analysis.pair_counts[&ItemPair::new("sugar", "tea")], 1);

    // The dropped row's item never appears anywhere
    assert!(!analysis.item_counts.contains_key("juice"));
    assert!(!analysis.customer_counts.contains_key("Carol"));

    // Dave's empty basket still counts as a transaction
    assert_eq!(analysis.customer_counts["Dave"], 1);
    assert_eq!(analysis.basket_sizes[&4], 0);

    // Jan 1 2024 is a Monday
    assert_eq!(analysis.weekday[0], 2);
    assert_eq!(analysis.weekday[1], 1);
    assert_eq!(analysis.weekday[2], 1);
    assert_eq!(analysis.hourly[10], 1);
    assert_eq!(analysis.hourly[18], 1);
}

#[test]
fn test_pipeline_is_idempotent() {
    let test_file = create_test_csv();

    let first_log = load_transactions(test_file.path()).unwrap();
    let second_log = load_transactions(test_file.path()).unwrap();
    assert_eq!(first_log.transactions, second_log.transactions);

    let first = BasketAnalysis::from_log(&first_log);
    let second = BasketAnalysis::from_log(&second_log);
    assert_eq!(first, second);
}

#[test]
fn test_transaction_ids_are_stable() {
    let test_file = create_test_csv();
    let log = load_transactions(test_file.path()).unwrap();

    // Ids follow file positions, with gaps for the duplicate and the
    // unparseable row
    let ids: Vec<u64> = log.transactions.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![0, 2, 4, 5]);
}

#[test]
fn test_top_n_ordering() {
    let test_file = create_test_csv();
    let log = load_transactions(test_file.path()).unwrap();
    let analysis = BasketAnalysis::from_log(&log);

    // bread, milk, tea all have count 2: ties resolve lexicographically
    let top = analysis.top_items(4);
    assert_eq!(top[0], ("bread".to_string(), 2));
    assert_eq!(top[1], ("milk".to_string(), 2));
    assert_eq!(top[2], ("tea".to_string(), 2));
    assert_eq!(top[3], ("sugar".to_string(), 1));

    let top_pairs = analysis.top_pairs(10);
    assert_eq!(top_pairs[0], (ItemPair::new("bread", "milk"), 2));
    assert_eq!(top_pairs[1], (ItemPair::new("sugar", "tea"), 1));
}

#[test]
fn test_report_generation_writes_all_charts() {
    let test_file = create_test_csv();
    let log = load_transactions(test_file.path()).unwrap();
    let analysis = BasketAnalysis::from_log(&log);

    let temp_dir = tempdir().unwrap();
    let output_dir = temp_dir.path().join("charts");

    generate_visualization_report(&log, &analysis, &output_dir, 15, 10, 15).unwrap();

    for file_name in [
        "top_products.png",
        "transactions_per_hour.png",
        "transactions_per_weekday.png",
        "top_pairs.png",
        "weekday_hour_heatmap.png",
        "basket_size_distribution.png",
        "top_customers.png",
    ] {
        assert!(output_dir.join(file_name).exists(), "missing {}", file_name);
    }
}

#[test]
fn test_missing_column_aborts() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Transaction Date,Name").unwrap();
    writeln!(file, "2024-01-01 10:15,Alice").unwrap();

    let err = load_transactions(file.path()).unwrap_err();
    assert!(err.to_string().contains("Product"));
}

#[test]
fn test_missing_input_file_aborts() {
    let temp_dir = tempdir().unwrap();
    let missing = temp_dir.path().join("does_not_exist.csv");

    assert!(load_transactions(&missing).is_err());
}
