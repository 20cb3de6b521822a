use std::path::PathBuf;

use claimstat_frame::crosstab::{self, Crosstab};

use crate::util::{DataArg, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CrosstabArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Column whose values label the rows
    pub row_column: String,
    /// Column whose values label the columns
    pub col_column: String,
    /// Emit the table as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the JSON table to this file instead of stdout
    #[arg(long, requires = "json")]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CrosstabArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;
    let table = crosstab::crosstab(&data, &arg.row_column, &arg.col_column)?;

    if arg.json {
        return Output::save_json(&table, arg.output.clone());
    }

    println!("Crosstab: {} x {}", table.row_column, table.col_column);
    println!("==========================================\n");
    print_crosstab(&table);
    Ok(())
}

fn print_crosstab(table: &Crosstab) {
    let label_width = table
        .row_labels
        .iter()
        .map(String::len)
        .chain([table.row_column.len(), "Total".len()])
        .max()
        .unwrap_or(0);
    let cell_width = table
        .col_labels
        .iter()
        .map(String::len)
        .chain([8])
        .max()
        .unwrap_or(8);

    let mut header = format!("  {:<label_width$}", table.row_column);
    for label in table.col_labels.iter().map(String::as_str).chain(["Total"]) {
        header.push_str(&format!(" {label:>cell_width$}"));
    }
    println!("{header}");
    println!(
        "  {}",
        "-".repeat(label_width + (cell_width + 1) * (table.col_labels.len() + 1))
    );

    let print_row = |label: &str, counts: &[u64]| {
        let mut line = format!("  {label:<label_width$}");
        for count in counts {
            line.push_str(&format!(" {count:>cell_width$}"));
        }
        line.push_str(&format!(
            " {:>cell_width$}",
            counts.iter().sum::<u64>()
        ));
        println!("{line}");
    };
    for (label, counts) in table.row_labels.iter().zip(&table.counts) {
        print_row(label, counts);
    }
    print_row("Total", &table.col_totals());
}
