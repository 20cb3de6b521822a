use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Five-number summary used to draw a box plot.
///
/// Whiskers extend to the most extreme data points within `1.5 × IQR` of the
/// quartiles; points beyond the whiskers are reported as outliers.
#[derive(Debug, Clone, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// Computes a box summary from unsorted values. `None` when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use claimstat_stats::boxplot::BoxSummary;
    /// let summary = BoxSummary::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(summary.median, 3.5);
    /// assert_eq!(summary.outliers, vec![100.0]);
    /// assert_eq!(summary.upper_whisker, 5.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes a box summary from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if sorted_values.is_empty() {
            return None;
        }

        let q1 = compute_percentile(sorted_values, 25.0);
        let median = compute_percentile(sorted_values, 50.0);
        let q3 = compute_percentile(sorted_values, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside = || {
            sorted_values
                .iter()
                .copied()
                .filter(|v| (low_fence..=high_fence).contains(v))
        };
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().last().unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            count: sorted_values.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_outliers() {
        let summary = BoxSummary::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.q1, 2.0);
        assert_eq!(summary.q3, 4.0);
        assert_eq!(summary.lower_whisker, 1.0);
        assert_eq!(summary.upper_whisker, 5.0);
        assert!(summary.outliers.is_empty());
    }

    #[test]
    fn test_low_outlier() {
        let summary = BoxSummary::new([-50.0, 10.0, 11.0, 12.0, 13.0]).unwrap();
        assert_eq!(summary.outliers, vec![-50.0]);
        assert_eq!(summary.lower_whisker, 10.0);
    }

    #[test]
    fn test_empty() {
        assert!(BoxSummary::new(std::iter::empty()).is_none());
    }
}
