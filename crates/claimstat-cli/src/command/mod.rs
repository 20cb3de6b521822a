use clap::{Parser, Subcommand};

use self::{
    ab_test::AbTestArg, compare::CompareArg, correlate::CorrelateArg, crosstab::CrosstabArg,
    margin::MarginArg, plot::PlotArg, preprocess::PreprocessArg, summary::SummaryArg,
};

mod ab_test;
mod compare;
mod correlate;
mod crosstab;
mod margin;
mod plot;
mod preprocess;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Report shape, missing values and per-column statistics
    Summary(#[clap(flatten)] SummaryArg),
    /// Count co-occurring values of two columns
    Crosstab(#[clap(flatten)] CrosstabArg),
    /// Compute pairwise Pearson correlations
    Correlate(#[clap(flatten)] CorrelateArg),
    /// Compare a measure between two groups with Welch's t-test
    Compare(#[clap(flatten)] CompareArg),
    /// Run a plan of hypothesis tests
    AbTest(#[clap(flatten)] AbTestArg),
    /// Derive the profit margin column
    Margin(#[clap(flatten)] MarginArg),
    /// Clean, encode and scale a dataset
    Preprocess(#[clap(flatten)] PreprocessArg),
    /// Explore distributions and relationships with TUI
    Plot(#[clap(flatten)] PlotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Crosstab(arg) => crosstab::run(&arg)?,
        Mode::Correlate(arg) => correlate::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::AbTest(arg) => ab_test::run(&arg)?,
        Mode::Margin(arg) => margin::run(&arg)?,
        Mode::Preprocess(arg) => preprocess::run(&arg)?,
        Mode::Plot(arg) => plot::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_compare_defaults() {
        let args = CommandArgs::try_parse_from(["claimstat", "compare", "claims.csv"]).unwrap();
        let Mode::Compare(arg) = args.mode else {
            panic!("expected compare mode");
        };
        assert_eq!(arg.group_column, "Gender");
        assert_eq!(arg.group_a, "Male");
        assert_eq!(arg.group_b, "Female");
        assert_eq!(arg.measure, "TotalClaims");
        assert!((arg.alpha - 0.05).abs() < f64::EPSILON);
        assert_eq!(arg.data.delimiter, b',');
    }

    #[test]
    fn test_correlate_column_list() {
        let args = CommandArgs::try_parse_from([
            "claimstat",
            "correlate",
            "claims.txt",
            "-d",
            "|",
            "--columns",
            "TotalPremium,TotalClaims,SumInsured",
        ])
        .unwrap();
        let Mode::Correlate(arg) = args.mode else {
            panic!("expected correlate mode");
        };
        assert_eq!(arg.data.delimiter, b'|');
        assert_eq!(arg.columns, ["TotalPremium", "TotalClaims", "SumInsured"]);
    }
}
