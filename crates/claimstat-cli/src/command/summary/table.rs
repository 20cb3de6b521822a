use claimstat_frame::missing::MissingValues;

use super::{CategoricalSummary, NumericSummary};
use crate::util::format_value;

pub(super) fn print_missing_table(rows: &[MissingValues]) {
    println!("  {:<28} {:>10} {:>9}", "Column", "Missing", "Percent");
    // label(28) + missing(10) + percent(9) + spaces(2)
    println!("  {}", "-".repeat(49));
    for row in rows.iter().filter(|row| row.count > 0) {
        println!(
            "  {:<28} {:>10} {:>8.2}%",
            row.column, row.count, row.percentage
        );
    }
    let complete = rows.iter().filter(|row| row.count == 0).count();
    println!("  ({complete} columns without missing values)");
}

pub(super) fn print_numeric_table(rows: &[NumericSummary]) {
    println!(
        "  {:<28} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "Column", "Count", "Mean", "StdDev", "Min", "P25", "Median", "P75", "Max",
    );
    // label(28) + count(8) + 7 * value(12) + spaces(8)
    println!("  {}", "-".repeat(128));
    for row in rows {
        let stats = &row.stats.stats;
        let percentile = |p| row.stats.percentiles.get(p).unwrap_or(f64::NAN);
        println!(
            "  {:<28} {:>8} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            row.column,
            stats.count,
            format_value(stats.mean, 2),
            format_value(stats.std_dev, 2),
            format_value(stats.min, 2),
            format_value(percentile(25.0), 2),
            format_value(stats.median, 2),
            format_value(percentile(75.0), 2),
            format_value(stats.max, 2),
        );
    }
}

pub(super) fn print_categorical_table(rows: &[CategoricalSummary]) {
    println!("  {:<28} {:>10} {:<30} {:>10}", "Column", "Distinct", "Mode", "Count");
    // label(28) + distinct(10) + mode(30) + count(10) + spaces(3)
    println!("  {}", "-".repeat(81));
    for row in rows {
        let (mode, count) = row
            .mode
            .as_ref()
            .map_or(("-", String::new()), |(label, count)| {
                (label.as_str(), count.to_string())
            });
        println!(
            "  {:<28} {:>10} {:<30} {:>10}",
            row.column, row.distinct, mode, count
        );
    }
}
