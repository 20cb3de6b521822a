use std::path::PathBuf;

use claimstat_frame::{columns, comparison};
use claimstat_stats::descriptive::DescriptiveStats;

use crate::util::{DataArg, Output, format_value};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MarginArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Premium column
    #[arg(long, default_value = columns::TOTAL_PREMIUM)]
    pub premium: String,
    /// Claims column
    #[arg(long, default_value = columns::TOTAL_CLAIMS)]
    pub claims: String,
    /// Write the dataset with the margin column to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MarginArg) -> anyhow::Result<()> {
    let data = arg.data.load()?;
    let data =
        comparison::derive_margin_with(&data, &arg.premium, &arg.claims, columns::PROFIT_MARGIN)?;
    let margin = data.numeric(columns::PROFIT_MARGIN)?;

    let non_finite = margin.iter().filter(|v| !v.is_finite()).count();
    let stats = DescriptiveStats::new(margin.iter().copied().filter(|v| v.is_finite()));

    println!("Profit Margin: ({} - {}) / {} x 100", arg.premium, arg.claims, arg.premium);
    println!("==========================================\n");
    match stats {
        Some(stats) => {
            println!("  Rows:    {:>12}", stats.count);
            println!("  Mean:    {:>12}", format_value(stats.mean, 2));
            println!("  Median:  {:>12}", format_value(stats.median, 2));
            println!("  StdDev:  {:>12}", format_value(stats.std_dev, 2));
            println!("  Min:     {:>12}", format_value(stats.min, 2));
            println!("  Max:     {:>12}", format_value(stats.max, 2));
        }
        None => println!("  No finite margin values"),
    }
    if non_finite > 0 {
        println!("  ({non_finite} rows with zero or missing premium are undefined)");
    }

    if let Some(path) = &arg.output {
        let mut output = Output::open(path.clone())?;
        output.write_table(&data, arg.data.delimiter)?;
        log::info!("Saved dataset to {}", output.display_path());
    }
    Ok(())
}
