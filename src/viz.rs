//! Chart rendering with Plotters and console reporting

use crate::analysis::{BasketAnalysis, WEEKDAY_LABELS};
use crate::data::TransactionLog;
use plotters::prelude::*;
use std::path::Path;

/// Fill color for bar series
const BAR_COLOR: RGBColor = RGBColor(70, 130, 180);

/// Heatmap endpoints, light yellow to dark blue
const HEAT_LOW: RGBColor = RGBColor(255, 255, 217);
const HEAT_HIGH: RGBColor = RGBColor(37, 52, 148);

/// Render the top-N sold products as horizontal bars
pub fn create_top_products_chart(
    analysis: &BasketAnalysis,
    output_path: &Path,
    top_n: usize,
) -> crate::Result<()> {
    let entries = analysis.top_items(top_n);
    horizontal_bar_chart(
        output_path,
        &format!("Top {} Sold Products", top_n),
        "Count",
        "Product",
        &entries,
    )?;
    println!("Top products chart saved to: {}", output_path.display());
    Ok(())
}

/// Render the transactions-per-hour line chart
pub fn create_hourly_chart(analysis: &BasketAnalysis, output_path: &Path) -> crate::Result<()> {
    let max_count = analysis.hourly.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(output_path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Transactions per Hour", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..24u32, 0u64..(max_count + max_count / 10 + 1))?;

    chart
        .configure_mesh()
        .x_desc("Hour of Day")
        .y_desc("Number of Transactions")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    let points: Vec<(u32, u64)> = analysis
        .hourly
        .iter()
        .enumerate()
        .map(|(hour, &count)| (hour as u32, count))
        .collect();

    chart.draw_series(LineSeries::new(points.clone(), &BAR_COLOR))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, BAR_COLOR.filled())),
    )?;

    root.present()?;
    println!("Hourly chart saved to: {}", output_path.display());
    Ok(())
}

/// Render the transactions-per-weekday bar chart, Monday-first
pub fn create_weekday_chart(analysis: &BasketAnalysis, output_path: &Path) -> crate::Result<()> {
    let max_count = analysis.weekday.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(output_path, (1000, 400)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Count of Transactions per Weekday", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..7f64, 0u64..(max_count + max_count / 10 + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(8)
        .x_label_formatter(&|x: &f64| {
            let idx = x.floor() as usize;
            if (x - idx as f64).abs() < 0.25 && idx < WEEKDAY_LABELS.len() {
                WEEKDAY_LABELS[idx].to_string()
            } else {
                String::new()
            }
        })
        .x_desc("Weekday")
        .y_desc("Transactions")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (day, &count) in analysis.weekday.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(day as f64 + 0.15, 0), (day as f64 + 0.85, count)],
            BAR_COLOR.filled(),
        )))?;
    }

    root.present()?;
    println!("Weekday chart saved to: {}", output_path.display());
    Ok(())
}

/// Render the top-N co-purchased pairs as horizontal bars
pub fn create_top_pairs_chart(
    analysis: &BasketAnalysis,
    output_path: &Path,
    top_n: usize,
) -> crate::Result<()> {
    let entries: Vec<(String, u64)> = analysis
        .top_pairs(top_n)
        .into_iter()
        .map(|(pair, count)| (pair.label(), count))
        .collect();
    horizontal_bar_chart(
        output_path,
        &format!("Top {} Co-purchased Product Pairs", top_n),
        "Count",
        "Product Pair",
        &entries,
    )?;
    println!("Top pairs chart saved to: {}", output_path.display());
    Ok(())
}

/// Render the items-by-weekday-and-hour heatmap, Monday in the top row
pub fn create_weekday_hour_heatmap(
    analysis: &BasketAnalysis,
    output_path: &Path,
) -> crate::Result<()> {
    let max_count = analysis
        .weekday_hour_items
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let root = BitMapBackend::new(output_path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Items Sold by Weekday and Hour", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..24f64, 0f64..7f64)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(25)
        .y_labels(8)
        .y_label_formatter(&|y: &f64| {
            let idx = y.floor() as usize;
            if (y - idx as f64).abs() < 0.25 && idx < WEEKDAY_LABELS.len() {
                WEEKDAY_LABELS[6 - idx].to_string()
            } else {
                String::new()
            }
        })
        .x_desc("Hour")
        .y_desc("Weekday")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (day, row) in analysis.weekday_hour_items.iter().enumerate() {
        // Flip so Monday lands in the top row
        let y0 = (6 - day) as f64;
        for (hour, &count) in row.iter().enumerate() {
            let color = heat_color(count as f64 / max_count);
            chart.draw_series(std::iter::once(Rectangle::new(
                [
                    (hour as f64 + 0.02, y0 + 0.02),
                    (hour as f64 + 0.98, y0 + 0.98),
                ],
                color.filled(),
            )))?;
        }
    }

    root.present()?;
    println!("Weekday/hour heatmap saved to: {}", output_path.display());
    Ok(())
}

/// Render the basket-size distribution histogram
pub fn create_basket_size_chart(
    analysis: &BasketAnalysis,
    output_path: &Path,
) -> crate::Result<()> {
    let histogram = analysis.basket_size_histogram();
    let max_size = histogram.keys().copied().max().unwrap_or(0).max(1);
    let max_freq = histogram.values().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Basket Size", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            0f64..(max_size as f64 + 1.0),
            0u64..(max_freq + max_freq / 10 + 1),
        )?;

    chart
        .configure_mesh()
        .x_desc("Number of Items")
        .y_desc("Frequency")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (&size, &frequency) in &histogram {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(size as f64 + 0.1, 0), (size as f64 + 0.9, frequency)],
            BAR_COLOR.filled(),
        )))?;
    }

    root.present()?;
    println!("Basket size chart saved to: {}", output_path.display());
    Ok(())
}

/// Render the top-N most active customers as horizontal bars
pub fn create_top_customers_chart(
    analysis: &BasketAnalysis,
    output_path: &Path,
    top_n: usize,
) -> crate::Result<()> {
    let entries = analysis.top_customers(top_n);
    horizontal_bar_chart(
        output_path,
        &format!("Top {} Most Active Customers", top_n),
        "Number of Transactions",
        "Customer Name",
        &entries,
    )?;
    println!("Top customers chart saved to: {}", output_path.display());
    Ok(())
}

/// Shared horizontal bar renderer; the first entry is drawn in the top row
fn horizontal_bar_chart(
    output_path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    entries: &[(String, u64)],
) -> crate::Result<()> {
    // Reverse so the largest bar renders at the top of the chart
    let rows: Vec<(String, u64)> = entries.iter().rev().cloned().collect();
    let labels: Vec<String> = rows.iter().map(|(name, _)| name.clone()).collect();

    let max_count = rows.iter().map(|&(_, count)| count).max().unwrap_or(0).max(1) as f64;
    let row_count = rows.len().max(1) as f64;

    let root = BitMapBackend::new(output_path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(220)
        .build_cartesian_2d(0f64..(max_count * 1.05), 0f64..row_count)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows.len() + 1)
        .y_label_formatter(&|y: &f64| {
            let idx = y.floor() as usize;
            if (y - idx as f64).abs() < 0.25 && idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        })
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (row, &(_, count)) in rows.iter().enumerate() {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, row as f64 + 0.15), (count as f64, row as f64 + 0.85)],
            BAR_COLOR.filled(),
        )))?;
    }

    root.present()?;
    Ok(())
}

/// Blend between the heatmap endpoint colors
fn heat_color(fraction: f64) -> RGBColor {
    let fraction = fraction.clamp(0.0, 1.0);
    let blend = |low: u8, high: u8| {
        (low as f64 + (high as f64 - low as f64) * fraction).round() as u8
    };
    RGBColor(
        blend(HEAT_LOW.0, HEAT_HIGH.0),
        blend(HEAT_LOW.1, HEAT_HIGH.1),
        blend(HEAT_LOW.2, HEAT_HIGH.2),
    )
}

/// Print summary statistics to console
pub fn print_summary_statistics(log: &TransactionLog, analysis: &BasketAnalysis) {
    println!("\n=== Transaction Log Summary ===");
    println!("Source rows: {}", log.source_rows);
    println!("Duplicate rows removed: {}", log.duplicate_rows);
    println!("Rows dropped (bad timestamp): {}", log.dropped_rows);
    println!("Transactions retained: {}", log.transactions.len());
    println!("Item rows (exploded): {}", analysis.items.len());
    println!("Distinct items: {}", analysis.item_counts.len());
    println!("Distinct customers: {}", analysis.customer_counts.len());
    println!("Co-purchase pairs observed: {}", analysis.pair_counts.len());

    println!("\nTop products:");
    for (item, count) in analysis.top_items(5) {
        println!("  {:30} {}", item, count);
    }

    println!("\nTop co-purchased pairs:");
    for (pair, count) in analysis.top_pairs(5) {
        println!("  {:40} {}", pair.label(), count);
    }

    println!("\nTransactions per weekday:");
    for (day, label) in WEEKDAY_LABELS.iter().enumerate() {
        println!("  {:5} {}", label, analysis.weekday[day]);
    }
}

/// Generate the full chart set plus the console summary
pub fn generate_visualization_report(
    log: &TransactionLog,
    analysis: &BasketAnalysis,
    output_dir: &Path,
    top_products: usize,
    top_pairs: usize,
    top_customers: usize,
) -> crate::Result<()> {
    std::fs::create_dir_all(output_dir)?;

    create_top_products_chart(analysis, &output_dir.join("top_products.png"), top_products)?;
    create_hourly_chart(analysis, &output_dir.join("transactions_per_hour.png"))?;
    create_weekday_chart(analysis, &output_dir.join("transactions_per_weekday.png"))?;
    create_top_pairs_chart(analysis, &output_dir.join("top_pairs.png"), top_pairs)?;
    create_weekday_hour_heatmap(analysis, &output_dir.join("weekday_hour_heatmap.png"))?;
    create_basket_size_chart(analysis, &output_dir.join("basket_size_distribution.png"))?;
    create_top_customers_chart(
        analysis,
        &output_dir.join("top_customers.png"),
        top_customers,
    )?;

    print_summary_statistics(log, analysis);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Transaction;
    use chrono::NaiveDate;
    use std::path::Path;
    use tempfile::tempdir;

    fn create_test_analysis() -> (TransactionLog, BasketAnalysis) {
        let baskets = ["bread|milk", "tea,sugar", "bread,tea", "bread", ""];
        let transactions: Vec<Transaction> = baskets
            .iter()
            .enumerate()
            .map(|(id, raw)| Transaction {
                id: id as u64,
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1 + id as u32)
                    .unwrap()
                    .and_hms_opt(9 + id as u32, 0, 0)
                    .unwrap(),
                customer: format!("customer-{}", id),
                raw_products: raw.to_string(),
            })
            .collect();

        let log = TransactionLog {
            source_rows: transactions.len() as u64,
            duplicate_rows: 0,
            dropped_rows: 0,
            transactions,
        };
        let analysis = BasketAnalysis::from_log(&log);
        (log, analysis)
    }

    #[test]
    fn test_create_top_products_chart() {
        let (_log, analysis) = create_test_analysis();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("top_products.png");

        let result = create_top_products_chart(&analysis, &output_path, 15);
        assert!(result.is_ok());
        assert!(Path::new(&output_path).exists());
    }

    #[test]
    fn test_create_weekday_hour_heatmap() {
        let (_log, analysis) = create_test_analysis();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("heatmap.png");

        let result = create_weekday_hour_heatmap(&analysis, &output_path);
        assert!(result.is_ok());
        assert!(Path::new(&output_path).exists());
    }

    #[test]
    fn test_charts_tolerate_empty_analysis() {
        let log = TransactionLog {
            transactions: Vec::new(),
            source_rows: 0,
            duplicate_rows: 0,
            dropped_rows: 0,
        };
        let analysis = BasketAnalysis::from_log(&log);
        let temp_dir = tempdir().unwrap();

        let pairs_path = temp_dir.path().join("pairs.png");
        assert!(create_top_pairs_chart(&analysis, &pairs_path, 10).is_ok());
        assert!(Path::new(&pairs_path).exists());

        let hourly_path = temp_dir.path().join("hourly.png");
        assert!(create_hourly_chart(&analysis, &hourly_path).is_ok());
        assert!(Path::new(&hourly_path).exists());
    }

    #[test]
    fn test_generate_visualization_report() {
        let (log, analysis) = create_test_analysis();
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("charts");

        let result = generate_visualization_report(&log, &analysis, &output_dir, 15, 10, 15);
        assert!(result.is_ok());

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
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), HEAT_LOW);
        assert_eq!(heat_color(1.0), HEAT_HIGH);
        assert_eq!(heat_color(-1.0), HEAT_LOW);
        assert_eq!(heat_color(2.0), HEAT_HIGH);
    }
}
