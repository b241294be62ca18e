//! BasketLens: Market basket analysis CLI for retail transaction logs
//!
//! This is the main entrypoint that orchestrates data loading, basket
//! analysis, visualization, and console reporting.

use anyhow::Result;
use basketlens::{load_transactions, viz, Args, BasketAnalysis};
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    args.validate()?;

    if args.verbose {
        println!("BasketLens - Market Basket Analysis");
        println!("===================================\n");
    }

    if args.summary {
        run_summary_mode(&args)
    } else {
        run_full_pipeline(&args)
    }
}

/// Run summary mode: console statistics only, no chart rendering
fn run_summary_mode(args: &Args) -> Result<()> {
    println!("=== Summary Mode ===");

    let start_time = Instant::now();

    if args.verbose {
        println!("\nLoading transactions from: {}", args.input.display());
    }
    let log = load_transactions(&args.input)?;
    let analysis = BasketAnalysis::from_log(&log);

    viz::print_summary_statistics(&log, &analysis);

    let elapsed = start_time.elapsed();
    println!("\nProcessing time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Run the full analysis pipeline with chart output
fn run_full_pipeline(args: &Args) -> Result<()> {
    println!("=== Full Analysis Pipeline ===\n");

    let start_time = Instant::now();

    // Step 1: Load and normalize the transaction log
    if args.verbose {
        println!("Step 1: Loading and normalizing transactions");
        println!("  Input file: {}", args.input.display());
    }

    let load_start = Instant::now();
    let log = load_transactions(&args.input)?;
    let load_time = load_start.elapsed();

    println!("✓ Transactions loaded: {}", log.transactions.len());
    if args.verbose {
        println!("  Loading time: {:.2}s", load_time.as_secs_f64());
        println!("  Source rows: {}", log.source_rows);
        println!("  Duplicates removed: {}", log.duplicate_rows);
        println!("  Bad timestamps dropped: {}", log.dropped_rows);
    }

    // Step 2: Explode baskets and aggregate
    if args.verbose {
        println!("\nStep 2: Exploding baskets and counting co-purchases");
    }

    let analysis_start = Instant::now();
    let analysis = BasketAnalysis::from_log(&log);
    let analysis_time = analysis_start.elapsed();

    println!("✓ Analysis complete");
    if args.verbose {
        println!("  Analysis time: {:.2}s", analysis_time.as_secs_f64());
        println!("  Item rows: {}", analysis.items.len());
        println!("  Distinct items: {}", analysis.item_counts.len());
        println!("  Co-purchase pairs: {}", analysis.pair_counts.len());
    }

    // Step 3: Generate visualizations
    if args.verbose {
        println!("\nStep 3: Generating visualizations");
        println!("  Output directory: {}", args.output_dir.display());
    }

    let viz_start = Instant::now();
    viz::generate_visualization_report(
        &log,
        &analysis,
        &args.output_dir,
        args.top_products,
        args.top_pairs,
        args.top_customers,
    )?;
    let viz_time = viz_start.elapsed();

    println!("\n✓ Visualizations generated");
    if args.verbose {
        println!("  Visualization time: {:.2}s", viz_time.as_secs_f64());
    }

    let total_time = start_time.elapsed();
    println!("\n=== Pipeline Complete ===");
    println!("Total processing time: {:.2}s", total_time.as_secs_f64());
    println!("Charts saved to: {}", args.output_dir.display());

    Ok(())
}
