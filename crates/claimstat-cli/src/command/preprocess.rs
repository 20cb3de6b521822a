//! Dataset preparation command
//!
//! Steps run in a fixed order: date normalization, sparse-column dropping,
//! mean imputation, incomplete-row dropping, label encoding, one-hot encoding
//! and standardization. Each step is enabled by its own flag.

use std::path::PathBuf;

use anyhow::Context as _;
use claimstat_frame::{
    cleaning::{self, DEFAULT_MISSING_THRESHOLD},
    columns,
    encoding::{self, OneHotOptions},
    missing, scaling,
    table::DataTable,
};

use crate::util::{DataArg, Output};

#[derive(Debug, Clone, clap::Args)]
#[expect(clippy::struct_excessive_bools)]
pub(crate) struct PreprocessArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Output file for the processed dataset
    #[arg(long, short = 'o')]
    pub output: PathBuf,
    /// Drop columns whose present-value share is below the threshold
    #[arg(long)]
    pub drop_sparse: bool,
    /// Required share of present values per column
    #[arg(long, default_value_t = DEFAULT_MISSING_THRESHOLD)]
    pub missing_threshold: f64,
    /// Fill missing numeric cells with the column mean
    #[arg(long)]
    pub impute: bool,
    /// Numeric columns excluded from imputation (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub impute_exclude: Vec<String>,
    /// Remove rows with any missing cell
    #[arg(long)]
    pub drop_incomplete: bool,
    /// Date columns rewritten as YYYY-MM-DD (comma-separated)
    #[arg(long, value_delimiter = ',', num_args = 0.., default_missing_value = columns::VEHICLE_INTRO_DATE)]
    pub normalize_dates: Vec<String>,
    /// Columns replaced by integer codes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub label_encode: Vec<String>,
    /// Columns replaced by indicator columns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub one_hot: Vec<String>,
    /// Prefix of indicator column names, the source column name by default
    #[arg(long, requires = "one_hot")]
    pub one_hot_prefix: Option<String>,
    /// Separator between prefix and category in indicator names
    #[arg(long, default_value = "_")]
    pub one_hot_separator: String,
    /// Keep the indicator of the first category
    #[arg(long)]
    pub keep_first: bool,
    /// Numeric columns rescaled to zero mean and unit variance (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub standardize: Vec<String>,
}

pub(crate) fn run(arg: &PreprocessArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;
    let processed = preprocess(&data, arg)?;

    let missing_after = missing::missing_values_summary(&processed)
        .iter()
        .map(|m| m.count)
        .sum::<usize>();
    log::info!(
        "Processed dataset has {} rows, {} columns and {missing_after} missing cells",
        processed.height(),
        processed.width()
    );

    let mut output = Output::open(arg.output.clone())?;
    output.write_table(&processed, arg.data.delimiter)?;
    log::info!("Saved processed dataset to {}", output.display_path());
    Ok(())
}

fn preprocess(data: &DataTable, arg: &PreprocessArg) -> anyhow::Result<DataTable> {
    let mut data = data.clone();

    for column in &arg.normalize_dates {
        data = cleaning::normalize_dates(&data, column)
            .with_context(|| format!("Failed to normalize dates in {column}"))?;
    }
    if arg.drop_sparse {
        data = cleaning::drop_sparse_columns(&data, arg.missing_threshold);
    }
    if arg.impute {
        (data, _) = cleaning::impute_numeric_columns(&data, &arg.impute_exclude)?;
    }
    if arg.drop_incomplete {
        data = cleaning::drop_incomplete_rows(&data);
    }
    if !arg.label_encode.is_empty() {
        let (encoded, mappings) = encoding::label_encode(&data, &arg.label_encode)?;
        for mapping in &mappings {
            log::info!("Label encoded {}: {:?}", mapping.column, mapping.classes);
        }
        data = encoded;
    }
    if !arg.one_hot.is_empty() {
        let options = OneHotOptions {
            prefix: arg.one_hot_prefix.clone(),
            separator: arg.one_hot_separator.clone(),
            drop_first: !arg.keep_first,
        };
        data = encoding::one_hot_encode(&data, &arg.one_hot, &options)?;
    }
    if !arg.standardize.is_empty() {
        let (scaled, params) = scaling::standardize(&data, &arg.standardize)?;
        for param in &params {
            log::info!(
                "Standardized {}: mean {:.4}, scale {:.4}",
                param.column,
                param.mean,
                param.scale
            );
        }
        data = scaled;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use claimstat_frame::table::Column;

    use super::*;

    #[derive(Debug, clap::Parser)]
    struct Wrapper {
        #[clap(flatten)]
        arg: PreprocessArg,
    }

    fn parse(args: &[&str]) -> PreprocessArg {
        let args = ["preprocess", "claims.csv", "-o", "out.csv"]
            .iter()
            .chain(args)
            .copied();
        Wrapper::try_parse_from(args).unwrap().arg
    }

    fn sample_table() -> DataTable {
        DataTable::new(vec![
            Column::categorical(
                "VehicleType",
                [Some("Bus"), Some("Passenger Vehicle"), None, Some("Bus")],
            ),
            Column::categorical(
                "VehicleIntroDate",
                [Some("6/2002"), Some("2010-01-15"), Some("1/1/2001"), None],
            ),
            Column::numeric("TotalPremium", vec![10.0, f64::NAN, 30.0, 40.0]),
            Column::numeric("Sparse", vec![f64::NAN, f64::NAN, f64::NAN, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_date_flag_defaults_to_vehicle_intro_date() {
        let arg = parse(&["--normalize-dates"]);
        assert_eq!(arg.normalize_dates, [columns::VEHICLE_INTRO_DATE]);
        let arg = parse(&[]);
        assert!(arg.normalize_dates.is_empty());
    }

    #[test]
    fn test_full_pipeline() {
        let arg = parse(&[
            "--normalize-dates",
            "--drop-sparse",
            "--impute",
            "--drop-incomplete",
            "--one-hot",
            "VehicleType",
            "--standardize",
            "TotalPremium",
        ]);
        let processed = preprocess(&sample_table(), &arg).unwrap();
        assert!(!processed.contains("Sparse"));
        // Row 2 lacks a vehicle type and row 3 an intro date
        assert_eq!(processed.height(), 2);
        assert_eq!(
            processed.column_names().collect::<Vec<_>>(),
            vec![
                "VehicleIntroDate",
                "TotalPremium",
                "VehicleType_Passenger Vehicle"
            ]
        );
        assert_eq!(
            processed.categorical("VehicleIntroDate").unwrap(),
            &[Some("2002-06-01".to_owned()), Some("2010-01-15".to_owned())]
        );
        let premium = processed.numeric("TotalPremium").unwrap();
        assert!((premium[0] + premium[1]).abs() < 1e-12);
    }
}
