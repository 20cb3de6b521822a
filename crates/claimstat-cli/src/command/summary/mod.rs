//! Dataset overview command
//!
//! Prints the dataset shape, the missing-value report and distribution
//! statistics of every numeric column.

use std::{collections::BTreeMap, path::PathBuf};

use claimstat_frame::{
    missing::{self, MissingValues},
    table::DataTable,
};
use claimstat_stats::{comprehensive::ComprehensiveStats, histogram::DEFAULT_NUM_BINS};
use serde::Serialize;

use crate::util::{DataArg, Output};

mod table;

const SUMMARY_PERCENTILES: [f64; 3] = [25.0, 50.0, 75.0];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the JSON report to this file instead of stdout
    #[arg(long, requires = "json")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SummaryReport {
    rows: usize,
    columns: usize,
    missing: Vec<MissingValues>,
    numeric: Vec<NumericSummary>,
    categorical: Vec<CategoricalSummary>,
}

#[derive(Debug, Serialize)]
struct NumericSummary {
    column: String,
    stats: ComprehensiveStats,
}

#[derive(Debug, Serialize)]
struct CategoricalSummary {
    column: String,
    distinct: usize,
    /// Most frequent label and its count.
    mode: Option<(String, usize)>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;
    let report = SummaryReport::new(&data);

    if arg.json {
        return Output::save_json(&report, arg.output.clone());
    }

    println!("Dataset Summary: {}", arg.data.data_file.display());
    println!("==========================================\n");
    println!("  Rows: {}, Columns: {}\n", report.rows, report.columns);

    println!("Missing Values");
    table::print_missing_table(&report.missing);
    println!();

    println!("Numeric Columns");
    table::print_numeric_table(&report.numeric);
    println!();

    println!("Categorical Columns");
    table::print_categorical_table(&report.categorical);

    Ok(())
}

impl SummaryReport {
    fn new(data: &DataTable) -> Self {
        let mut numeric = Vec::new();
        let mut categorical = Vec::new();
        for column in data.columns() {
            if let Some(values) = column.present_values() {
                if let Some(stats) =
                    ComprehensiveStats::new(values, &SUMMARY_PERCENTILES, DEFAULT_NUM_BINS)
                {
                    numeric.push(NumericSummary {
                        column: column.name().to_owned(),
                        stats,
                    });
                }
            } else if let Some(labels) = column.as_categorical() {
                let mut counts = BTreeMap::<&str, usize>::new();
                for label in labels.iter().flatten() {
                    *counts.entry(label.as_str()).or_default() += 1;
                }
                let mode = counts
                    .iter()
                    .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
                    .map(|(label, count)| ((*label).to_owned(), *count));
                categorical.push(CategoricalSummary {
                    column: column.name().to_owned(),
                    distinct: counts.len(),
                    mode,
                });
            }
        }

        Self {
            rows: data.height(),
            columns: data.width(),
            missing: missing::missing_values_summary(data),
            numeric,
            categorical,
        }
    }
}

#[cfg(test)]
mod tests {
    use claimstat_frame::table::Column;

    use super::*;

    #[test]
    fn test_report_splits_column_kinds() {
        let data = DataTable::new(vec![
            Column::categorical(
                "Gender",
                [Some("Male"), Some("Female"), Some("Male"), None],
            ),
            Column::numeric("TotalClaims", vec![0.0, 10.0, f64::NAN, 20.0]),
            Column::numeric("Empty", vec![f64::NAN; 4]),
        ])
        .unwrap();
        let report = SummaryReport::new(&data);
        assert_eq!(report.rows, 4);
        assert_eq!(report.columns, 3);
        assert_eq!(report.missing[1].count, 1);

        assert_eq!(report.numeric.len(), 1);
        assert_eq!(report.numeric[0].column, "TotalClaims");
        assert_eq!(report.numeric[0].stats.stats.mean, 10.0);

        assert_eq!(report.categorical.len(), 1);
        assert_eq!(report.categorical[0].distinct, 2);
        assert_eq!(report.categorical[0].mode, Some(("Male".to_owned(), 2)));
    }
}
