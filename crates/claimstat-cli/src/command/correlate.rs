use std::path::PathBuf;

use claimstat_frame::{
    columns,
    correlation::{self, CorrelationMatrix},
};

use crate::util::{DataArg, Output, format_value};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CorrelateArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Numeric columns to correlate (comma-separated)
    #[arg(long, value_delimiter = ',', default_values = [columns::TOTAL_PREMIUM, columns::TOTAL_CLAIMS])]
    pub columns: Vec<String>,
    /// Use every numeric column of the dataset
    #[arg(long, conflicts_with = "columns")]
    pub all_numeric: bool,
    /// Emit the matrix as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the JSON matrix to this file instead of stdout
    #[arg(long, requires = "json")]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CorrelateArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;
    let matrix = if arg.all_numeric {
        correlation::correlation_matrix(&data, &data.numeric_column_names())?
    } else {
        correlation::correlation_matrix(&data, &arg.columns)?
    };

    if arg.json {
        return Output::save_json(&matrix, arg.output.clone());
    }

    println!("Pearson Correlation (pairwise complete)");
    println!("==========================================\n");
    print_matrix(&matrix);
    Ok(())
}

fn print_matrix(matrix: &CorrelationMatrix) {
    let label_width = matrix.columns.iter().map(String::len).max().unwrap_or(0);
    let cell_width = label_width.max(8);

    let mut header = format!("  {:<label_width$}", "");
    for column in &matrix.columns {
        header.push_str(&format!(" {column:>cell_width$}"));
    }
    println!("{header}");
    for (column, row) in matrix.columns.iter().zip(&matrix.values) {
        let mut line = format!("  {column:<label_width$}");
        for &value in row {
            line.push_str(&format!(" {:>cell_width$}", format_value(value, 3)));
        }
        println!("{line}");
    }
}
