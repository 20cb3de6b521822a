use std::path::PathBuf;

use claimstat_frame::plan::{PlanOutcome, PlanReport, TestPlan};

use crate::{
    command::compare,
    util::{self, DataArg, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AbTestArg {
    #[clap(flatten)]
    pub data: DataArg,
    /// JSON test plan, the gender comparison of total claims when omitted
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Override the significance level of the plan
    #[arg(long)]
    pub alpha: Option<f64>,
    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
    /// Write the JSON report to this file instead of stdout
    #[arg(long, requires = "json")]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AbTestArg) -> anyhow::Result<()> {
    let mut plan = match &arg.plan {
        Some(path) => util::read_json_file::<TestPlan, _>("test plan", path)?,
        None => TestPlan::default(),
    };
    if let Some(alpha) = arg.alpha {
        plan.alpha = alpha;
    }
    let data = arg.data.load()?;

    log::info!("Running {} comparisons...", plan.comparisons.len());
    let report = plan.run(&data);

    if arg.json {
        return Output::save_json(&report, arg.output.clone());
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &PlanReport) {
    println!("A/B Hypothesis Testing Report (alpha = {})", report.alpha);
    println!("==========================================\n");

    for entry in &report.entries {
        println!("{}", entry.name);
        match &entry.outcome {
            PlanOutcome::Completed { result, .. } => {
                compare::print_comparison(result, report.alpha);
            }
            PlanOutcome::Failed { error } => println!("  Failed: {error}"),
        }
        println!();
    }

    let rejected = report
        .rejected()
        .map(|entry| entry.name.as_str())
        .collect::<Vec<_>>();
    if rejected.is_empty() {
        println!("No null hypothesis rejected.");
    } else {
        println!("Rejected null hypotheses: {}", rejected.join(", "));
    }
}
