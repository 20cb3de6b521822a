use serde::Serialize;

use crate::{
    boxplot::BoxSummary, descriptive::DescriptiveStats, histogram::Histogram,
    percentiles::Percentiles,
};

/// Percentile points reported alongside descriptive statistics.
pub const DEFAULT_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Comprehensive statistical analysis combining multiple measures.
///
/// This structure provides a complete statistical overview of a numeric column by combining:
/// - Basic descriptive statistics (mean, median, variance, standard deviation, etc.)
/// - Percentile values for quantile analysis
/// - Histogram for distribution visualization
/// - Box summary for outlier inspection
///
/// # Examples
///
/// ```
/// use claimstat_stats::comprehensive::ComprehensiveStats;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let stats = ComprehensiveStats::new(values, &[25.0, 50.0, 75.0], 5).unwrap();
///
/// assert_eq!(stats.stats.mean, 5.5);
/// assert_eq!(stats.percentiles.get(50.0), Some(5.5));
/// assert_eq!(stats.histogram.total(), 10);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ComprehensiveStats {
    /// Basic descriptive statistics for the dataset.
    pub stats: DescriptiveStats,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
    /// Histogram showing the distribution of values across bins.
    pub histogram: Histogram,
    /// Quartiles, whiskers and outliers.
    pub box_summary: BoxSummary,
}

impl ComprehensiveStats {
    /// Computes comprehensive statistics from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(ComprehensiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    #[must_use]
    pub fn new<I>(values: I, percentile_points: &[f64], hist_num_bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points, hist_num_bins)
    }

    /// Computes comprehensive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    #[must_use]
    pub fn from_sorted(
        sorted_values: &[f64],
        percentile_points: &[f64],
        hist_num_bins: usize,
    ) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let percentiles = Percentiles::from_sorted(sorted_values, percentile_points);
        let histogram = Histogram::from_sorted(sorted_values, hist_num_bins, None, None);
        let box_summary = BoxSummary::from_sorted(sorted_values)?;

        Some(Self {
            stats,
            percentiles,
            histogram,
            box_summary,
        })
    }
}
