//! Two-group comparison of a numeric measure.
//!
//! [`compare_groups`] splits a table into two disjoint groups by an equality
//! predicate on one column and runs Welch's t-test on a numeric measure. The
//! caller decides significance, typically by comparing the p-value against
//! `0.05`.

use claimstat_stats::hypothesis::{self, Sample, TestError};
use serde::Serialize;

use crate::{
    FrameError, columns,
    table::{Column, DataTable},
};

/// One side of a group comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSample {
    /// Key that selected the rows.
    pub value: String,
    /// Number of finite measure values used.
    pub count: usize,
    pub mean: f64,
}

/// Result of [`compare_groups`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparisonResult {
    pub group_column: String,
    pub measure_column: String,
    pub group_a: GroupSample,
    pub group_b: GroupSample,
    /// Welch t statistic, positive when group A has the larger mean.
    pub statistic: f64,
    /// Two-sided p-value in `[0, 1]`.
    pub p_value: f64,
    pub df: f64,
    /// Rows of either group dropped for a missing or non-finite measure.
    pub excluded: usize,
}

impl GroupComparisonResult {
    /// The `(statistic, p_value)` pair.
    #[must_use]
    pub fn as_pair(&self) -> (f64, f64) {
        (self.statistic, self.p_value)
    }

    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Compares `measure_column` between the rows where `group_column` equals
/// `group_a_value` and the rows where it equals `group_b_value`.
///
/// # Errors
///
/// * [`FrameError::MissingColumn`] when either column is absent.
/// * [`FrameError::NotNumeric`] when the measure is categorical.
/// * [`FrameError::OverlappingGroups`] when both keys select the same rows,
///   including numeric keys written differently such as `2000` and `2000.0`.
/// * [`FrameError::InsufficientData`] when a group has fewer than two finite
///   measure values.
/// * [`FrameError::ZeroVariance`] when both groups are constant with
///   different values.
///
/// # Examples
///
/// ```
/// # use claimstat_frame::{comparison::compare_groups, table::{Column, DataTable}};
/// let table = DataTable::new(vec![
///     Column::categorical("Gender", [Some("Male"), Some("Female"), Some("Male"), Some("Female")]),
///     Column::numeric("TotalClaims", vec![100.0, 200.0, 150.0, 50.0]),
/// ])
/// .unwrap();
/// let result = compare_groups(&table, "Gender", "Male", "Female", "TotalClaims").unwrap();
/// assert_eq!(result.as_pair(), (0.0, 1.0));
/// ```
pub fn compare_groups(
    table: &DataTable,
    group_column: &str,
    group_a_value: &str,
    group_b_value: &str,
    measure_column: &str,
) -> Result<GroupComparisonResult, FrameError> {
    let groups = table.column(group_column)?;
    let measure = table.numeric(measure_column)?;
    if group_a_value == group_b_value || groups.same_key(group_a_value, group_b_value) {
        return Err(FrameError::OverlappingGroups {
            value: group_a_value.to_owned(),
        });
    }

    let mut excluded = 0;
    let mut select = |key: &str| {
        let mut sample = Vec::new();
        for (row, &value) in measure.iter().enumerate() {
            if !groups.matches(row, key) {
                continue;
            }
            if value.is_finite() {
                sample.push(value);
            } else {
                excluded += 1;
            }
        }
        sample
    };
    let a = select(group_a_value);
    let b = select(group_b_value);
    if excluded > 0 {
        log::debug!("{excluded} non-finite '{measure_column}' values excluded from comparison");
    }

    let result = hypothesis::welch_t_test(&a, &b).map_err(|err| match err {
        TestError::InsufficientData { sample, count } => FrameError::InsufficientData {
            group: match sample {
                Sample::A => group_a_value.to_owned(),
                Sample::B => group_b_value.to_owned(),
            },
            count,
        },
        TestError::ZeroVariance => FrameError::ZeroVariance {
            measure: measure_column.to_owned(),
        },
        TestError::NonFinite { .. } => FrameError::NonFinite {
            measure: measure_column.to_owned(),
        },
    })?;

    let sample = |value: &str, values: &[f64]| GroupSample {
        value: value.to_owned(),
        count: values.len(),
        mean: mean(values),
    };
    Ok(GroupComparisonResult {
        group_column: group_column.to_owned(),
        measure_column: measure_column.to_owned(),
        group_a: sample(group_a_value, &a),
        group_b: sample(group_b_value, &b),
        statistic: result.statistic,
        p_value: result.p_value,
        df: result.df,
        excluded,
    })
}

/// Adds [`columns::PROFIT_MARGIN`] computed from the standard premium and
/// claims columns.
///
/// See [`derive_margin_with`].
pub fn derive_margin(table: &DataTable) -> Result<DataTable, FrameError> {
    derive_margin_with(
        table,
        columns::TOTAL_PREMIUM,
        columns::TOTAL_CLAIMS,
        columns::PROFIT_MARGIN,
    )
}

/// Adds `output = (premium − claims) / premium × 100` per row.
///
/// A zero premium yields an infinite or `NaN` margin. An existing `output`
/// column is replaced, so deriving twice gives the same table.
///
/// ```
/// # use claimstat_frame::{comparison::derive_margin_with, table::{Column, DataTable}};
/// let table = DataTable::new(vec![
///     Column::numeric("Premium", vec![200.0, 50.0]),
///     Column::numeric("Claims", vec![0.0, 100.0]),
/// ])
/// .unwrap();
/// let table = derive_margin_with(&table, "Premium", "Claims", "Margin").unwrap();
/// assert_eq!(table.numeric("Margin").unwrap(), &[100.0, -100.0]);
/// ```
pub fn derive_margin_with(
    table: &DataTable,
    premium_column: &str,
    claims_column: &str,
    output_column: &str,
) -> Result<DataTable, FrameError> {
    let premium = table.numeric(premium_column)?;
    let claims = table.numeric(claims_column)?;
    let margin = premium
        .iter()
        .zip(claims)
        .map(|(&premium, &claims)| (premium - claims) / premium * 100.0)
        .collect();

    let mut result = table.clone();
    result.set_column(Column::numeric(output_column, margin))?;
    Ok(result)
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
