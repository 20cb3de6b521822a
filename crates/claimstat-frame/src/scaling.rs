use claimstat_stats::descriptive::DescriptiveStats;
use serde::Serialize;

use crate::{
    FrameError,
    table::{Column, DataTable},
};

/// Center and scale applied to one column by [`standardize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingParams {
    pub column: String,
    pub mean: f64,
    /// Population standard deviation, or 1 for a constant column.
    pub scale: f64,
}

impl ScalingParams {
    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

/// Rescales numeric columns to zero mean and unit population variance.
///
/// Statistics are computed over non-missing values and missing cells stay
/// missing. A column without any present value is left unchanged.
///
/// ```
/// # use claimstat_frame::{scaling::standardize, table::{Column, DataTable}};
/// let table = DataTable::new(vec![Column::numeric("TotalPremium", vec![1.0, 2.0, 3.0])]).unwrap();
/// let (scaled, params) = standardize(&table, &["TotalPremium"]).unwrap();
/// assert_eq!(params[0].mean, 2.0);
/// assert_eq!(scaled.numeric("TotalPremium").unwrap()[1], 0.0);
/// ```
pub fn standardize<S>(
    table: &DataTable,
    columns: &[S],
) -> Result<(DataTable, Vec<ScalingParams>), FrameError>
where
    S: AsRef<str>,
{
    let mut result = table.clone();
    let mut params = Vec::with_capacity(columns.len());

    for name in columns {
        let name = name.as_ref();
        let values = table.numeric(name)?;
        let Some(stats) = DescriptiveStats::new(values.iter().copied().filter(|v| !v.is_nan()))
        else {
            continue;
        };
        let std_dev = stats.variance.sqrt();
        let param = ScalingParams {
            column: name.to_owned(),
            mean: stats.mean,
            scale: if std_dev > 0.0 { std_dev } else { 1.0 },
        };
        let scaled = values.iter().map(|&v| param.transform(v)).collect();
        result.set_column(Column::numeric(name, scaled))?;
        params.push(param);
    }

    Ok((result, params))
}
