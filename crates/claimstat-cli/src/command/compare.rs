use std::path::PathBuf;

use claimstat_frame::{
    columns,
    comparison::{self, GroupComparisonResult},
    plan::{DEFAULT_ALPHA, Verdict},
};

use crate::util::{DataArg, Output, format_value};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// Column defining the two groups
    #[arg(long, default_value = columns::GENDER)]
    pub group_column: String,
    /// Value selecting group A
    #[arg(long, default_value = "Male")]
    pub group_a: String,
    /// Value selecting group B
    #[arg(long, default_value = "Female")]
    pub group_b: String,
    /// Numeric column to compare
    #[arg(long, default_value = columns::TOTAL_CLAIMS)]
    pub measure: String,
    /// Significance level
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,
    /// Derive the profit margin column before comparing
    #[arg(long)]
    pub margin: bool,
    /// Emit the result as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the JSON result to this file instead of stdout
    #[arg(long, requires = "json")]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let mut data = arg.data.load()?;
    if arg.margin {
        data = comparison::derive_margin(&data)?;
    }
    let result = comparison::compare_groups(
        &data,
        &arg.group_column,
        &arg.group_a,
        &arg.group_b,
        &arg.measure,
    )?;

    if arg.json {
        return Output::save_json(&result, arg.output.clone());
    }
    print_comparison(&result, arg.alpha);
    Ok(())
}

pub(crate) fn print_comparison(result: &GroupComparisonResult, alpha: f64) {
    println!(
        "Welch's t-test: {} by {}",
        result.measure_column, result.group_column
    );
    println!("  {:<24} {:>10} {:>14}", "Group", "Count", "Mean");
    // label(24) + count(10) + mean(14) + spaces(2)
    println!("  {}", "-".repeat(50));
    for group in [&result.group_a, &result.group_b] {
        println!(
            "  {:<24} {:>10} {:>14}",
            group.value,
            group.count,
            format_value(group.mean, 2)
        );
    }
    if result.excluded > 0 {
        println!("  ({} rows with non-finite values excluded)", result.excluded);
    }
    println!();
    println!("  t-statistic: {:>12.4}", result.statistic);
    println!("  df:          {:>12.2}", result.df);
    println!("  p-value:     {:>12.4}", result.p_value);
    println!(
        "  Conclusion (alpha = {alpha}): {}",
        Verdict::from_result(result, alpha)
    );
}
