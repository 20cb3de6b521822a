//! Declarative batches of group comparisons.
//!
//! A [`TestPlan`] is usually loaded from JSON:
//!
//! ```json
//! {
//!   "alpha": 0.05,
//!   "comparisons": [
//!     {
//!       "name": "Risk across provinces",
//!       "group_column": "Province",
//!       "group_a": "Gauteng",
//!       "group_b": "Western Cape",
//!       "measure": "TotalClaims"
//!     },
//!     {
//!       "name": "Margin across postal codes",
//!       "group_column": "PostalCode",
//!       "group_a": "2000",
//!       "group_b": "1459",
//!       "measure": "ProfitMargin",
//!       "derive_margin": true
//!     }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    FrameError, columns,
    comparison::{self, GroupComparisonResult},
    table::DataTable,
};

/// Significance level used when a plan does not set one.
pub const DEFAULT_ALPHA: f64 = 0.05;

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    pub comparisons: Vec<PlannedComparison>,
}

/// One null hypothesis: the measure has the same mean in both groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedComparison {
    pub name: String,
    pub group_column: String,
    pub group_a: String,
    pub group_b: String,
    pub measure: String,
    /// Derive the profit margin column before comparing.
    #[serde(default)]
    pub derive_margin: bool,
}

impl Default for TestPlan {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            comparisons: vec![PlannedComparison {
                name: "Risk differences between women and men".to_owned(),
                group_column: columns::GENDER.to_owned(),
                group_a: "Male".to_owned(),
                group_b: "Female".to_owned(),
                measure: columns::TOTAL_CLAIMS.to_owned(),
                derive_margin: false,
            }],
        }
    }
}

impl PlannedComparison {
    pub fn run(&self, table: &DataTable) -> Result<GroupComparisonResult, FrameError> {
        let derived;
        let table = if self.derive_margin {
            derived = comparison::derive_margin(table)?;
            &derived
        } else {
            table
        };
        comparison::compare_groups(
            table,
            &self.group_column,
            &self.group_a,
            &self.group_b,
            &self.measure,
        )
    }
}

impl TestPlan {
    /// Runs every comparison. A failing entry is recorded and the rest still run.
    #[must_use]
    pub fn run(&self, table: &DataTable) -> PlanReport {
        let entries = self
            .comparisons
            .iter()
            .map(|planned| {
                let outcome = match planned.run(table) {
                    Ok(result) => {
                        let verdict = Verdict::from_result(&result, self.alpha);
                        log::info!("{}: {verdict} (p = {:.4})", planned.name, result.p_value);
                        PlanOutcome::Completed { result, verdict }
                    }
                    Err(err) => {
                        log::warn!("{}: {err}", planned.name);
                        PlanOutcome::Failed {
                            error: err.to_string(),
                        }
                    }
                };
                PlanEntry {
                    name: planned.name.clone(),
                    outcome,
                }
            })
            .collect();

        PlanReport {
            alpha: self.alpha,
            entries,
        }
    }
}

/// Decision on the null hypothesis of equal means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    RejectNull,
    FailToRejectNull,
}

impl Verdict {
    #[must_use]
    pub fn from_result(result: &GroupComparisonResult, alpha: f64) -> Self {
        if result.is_significant(alpha) {
            Self::RejectNull
        } else {
            Self::FailToRejectNull
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::RejectNull => f.write_str("reject the null hypothesis"),
            Verdict::FailToRejectNull => f.write_str("fail to reject the null hypothesis"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub alpha: f64,
    pub entries: Vec<PlanEntry>,
}

impl PlanReport {
    /// Entries whose null hypothesis was rejected.
    pub fn rejected(&self) -> impl Iterator<Item = &PlanEntry> + '_ {
        self.entries.iter().filter(|entry| {
            matches!(
                entry.outcome,
                PlanOutcome::Completed {
                    verdict: Verdict::RejectNull,
                    ..
                }
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanEntry {
    pub name: String,
    pub outcome: PlanOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    Completed {
        result: GroupComparisonResult,
        verdict: Verdict,
    },
    Failed {
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn portfolio() -> DataTable {
        DataTable::new(vec![
            Column::categorical(
                "Gender",
                [Some("Male"), Some("Female"), Some("Male"), Some("Female")],
            ),
            Column::categorical(
                "Province",
                [
                    Some("Gauteng"),
                    Some("Gauteng"),
                    Some("Limpopo"),
                    Some("Limpopo"),
                ],
            ),
            Column::numeric("TotalClaims", vec![100.0, 200.0, 150.0, 50.0]),
            Column::numeric("TotalPremium", vec![200.0, 250.0, 150.0, 60.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_plan() {
        let report = TestPlan::default().run(&portfolio());
        assert_eq!(report.alpha, 0.05);
        assert_eq!(report.entries.len(), 1);
        let PlanOutcome::Completed { result, verdict } = &report.entries[0].outcome else {
            panic!("default comparison failed: {:?}", report.entries[0]);
        };
        assert_eq!(result.as_pair(), (0.0, 1.0));
        assert_eq!(*verdict, Verdict::FailToRejectNull);
        assert_eq!(report.rejected().count(), 0);
    }

    #[test]
    fn test_parse_plan_with_defaults() {
        let json = r#"{
            "comparisons": [
                {
                    "name": "Margin across provinces",
                    "group_column": "Province",
                    "group_a": "Gauteng",
                    "group_b": "Limpopo",
                    "measure": "ProfitMargin",
                    "derive_margin": true
                },
                {
                    "name": "Unknown column",
                    "group_column": "PostalCode",
                    "group_a": "2000",
                    "group_b": "1459",
                    "measure": "TotalClaims"
                }
            ]
        }"#;
        let plan = serde_json::from_str::<TestPlan>(json).unwrap();
        assert_eq!(plan.alpha, DEFAULT_ALPHA);
        assert!(plan.comparisons[0].derive_margin);
        assert!(!plan.comparisons[1].derive_margin);

        let report = plan.run(&portfolio());
        assert!(matches!(
            report.entries[0].outcome,
            PlanOutcome::Completed { .. }
        ));
        // A failing entry does not stop the plan
        let PlanOutcome::Failed { error } = &report.entries[1].outcome else {
            panic!("expected failure");
        };
        assert!(error.contains("PostalCode"));
    }

    #[test]
    fn test_report_serializes_outcome_tag() {
        let report = TestPlan::default().run(&portfolio());
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["entries"][0]["outcome"]["status"], "completed");
        assert_eq!(
            value["entries"][0]["outcome"]["verdict"],
            "fail_to_reject_null"
        );
    }
}
