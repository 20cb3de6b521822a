use claimstat_stats::correlation::pearson;
use serde::Serialize;

use crate::{FrameError, table::DataTable};

/// Symmetric matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major coefficients, `NaN` where undefined.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Computes Pearson correlations using pairwise-complete observations.
///
/// A pair with fewer than two complete rows or without variance gets `NaN`.
pub fn correlation_matrix<S>(
    table: &DataTable,
    columns: &[S],
) -> Result<CorrelationMatrix, FrameError>
where
    S: AsRef<str>,
{
    let data = columns
        .iter()
        .map(|name| table.numeric(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let values = data
        .iter()
        .map(|xs| {
            data.iter()
                .map(|ys| {
                    let (xs, ys): (Vec<f64>, Vec<f64>) = xs
                        .iter()
                        .zip(ys.iter())
                        .filter(|(x, y)| !x.is_nan() && !y.is_nan())
                        .map(|(&x, &y)| (x, y))
                        .unzip();
                    pearson(&xs, &ys).unwrap_or(f64::NAN)
                })
                .collect()
        })
        .collect();

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.as_ref().to_owned()).collect(),
        values,
    })
}
